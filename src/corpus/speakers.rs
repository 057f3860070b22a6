//! Static speaker metadata for the supported corpora

/// Speaker gender as recorded in the corpus documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
}

impl Gender {
    /// Single-letter code used in the description table
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// An L2-ARCTIC speaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcticSpeaker {
    /// Speaker directory name
    pub id: &'static str,
    /// First language
    pub first_language: &'static str,
    /// Gender
    pub gender: Gender,
}

const fn speaker(id: &'static str, first_language: &'static str, gender: Gender) -> ArcticSpeaker {
    ArcticSpeaker {
        id,
        first_language,
        gender,
    }
}

/// The 24 L2-ARCTIC speakers
pub static ARCTIC_SPEAKERS: &[ArcticSpeaker] = &[
    speaker("ABA", "Arabic", Gender::Male),
    speaker("SKA", "Arabic", Gender::Female),
    speaker("YBAA", "Arabic", Gender::Male),
    speaker("ZHAA", "Arabic", Gender::Female),
    speaker("BWC", "Mandarin", Gender::Male),
    speaker("LXC", "Mandarin", Gender::Female),
    speaker("NCC", "Mandarin", Gender::Female),
    speaker("TXHC", "Mandarin", Gender::Male),
    speaker("ASI", "Hindi", Gender::Male),
    speaker("RRBI", "Hindi", Gender::Male),
    speaker("SVBI", "Hindi", Gender::Female),
    speaker("TNI", "Hindi", Gender::Female),
    speaker("HJK", "Korean", Gender::Female),
    speaker("HKK", "Korean", Gender::Male),
    speaker("YDCK", "Korean", Gender::Female),
    speaker("YKWK", "Korean", Gender::Male),
    speaker("EBVS", "Spanish", Gender::Male),
    speaker("ERMS", "Spanish", Gender::Male),
    speaker("MBMPS", "Spanish", Gender::Female),
    speaker("NJS", "Spanish", Gender::Female),
    speaker("HQTV", "Vietnamese", Gender::Male),
    speaker("PNV", "Vietnamese", Gender::Female),
    speaker("THV", "Vietnamese", Gender::Female),
    speaker("TLV", "Vietnamese", Gender::Male),
];

/// TIMIT dialect regions
pub static TIMIT_DIALECTS: &[(&str, &str)] = &[
    ("DR1", "New England"),
    ("DR2", "Northern"),
    ("DR3", "North Midland"),
    ("DR4", "South Midland"),
    ("DR5", "Southern"),
    ("DR6", "New York City"),
    ("DR7", "Western"),
    ("DR8", "Army Brat"),
];

/// Look up an L2-ARCTIC speaker by directory name
pub fn arctic_speaker(id: &str) -> Option<&'static ArcticSpeaker> {
    ARCTIC_SPEAKERS.iter().find(|s| s.id.eq_ignore_ascii_case(id))
}

/// Region name for a TIMIT dialect directory such as `DR3`
pub fn timit_dialect(code: &str) -> Option<&'static str> {
    TIMIT_DIALECTS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}
