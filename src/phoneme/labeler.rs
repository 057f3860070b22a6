use crate::error::DatasetResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Class assigned to phones that match no group
pub const OTHERS_CLASS: &str = "others";

/// A named set of phone symbols
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneGroup {
    /// Class name
    pub class: String,
    /// Member phone symbols
    pub phones: Vec<String>,
}

impl PhoneGroup {
    /// Create a group from string slices
    pub fn new(class: &str, phones: &[&str]) -> Self {
        PhoneGroup {
            class: class.to_string(),
            phones: phones.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Maps raw phone symbols to coarse classes.
///
/// Groups are searched in order and the first group containing the label
/// wins; unmatched labels fall into [`OTHERS_CLASS`]. A labeler with no
/// groups is the identity: every label is its own class and has no index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhonemeLabeler {
    groups: Vec<PhoneGroup>,
}

impl PhonemeLabeler {
    /// Create a labeler from ordered groups
    pub fn new(groups: Vec<PhoneGroup>) -> Self {
        PhonemeLabeler { groups }
    }

    /// Labeler that keeps raw labels
    pub fn identity() -> Self {
        PhonemeLabeler::default()
    }

    /// Load ordered groups from a JSON array of `{"class", "phones"}` objects
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> DatasetResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let groups: Vec<PhoneGroup> = serde_json::from_reader(reader)?;
        Ok(PhonemeLabeler::new(groups))
    }

    /// Ordered groups
    pub fn groups(&self) -> &[PhoneGroup] {
        &self.groups
    }

    /// Whether this labeler passes labels through unchanged
    pub fn is_identity(&self) -> bool {
        self.groups.is_empty()
    }

    /// Class of a raw phone label
    pub fn classify<'a>(&'a self, phone_label: &'a str) -> &'a str {
        if self.is_identity() {
            return phone_label;
        }
        self.groups
            .iter()
            .find(|group| group.phones.iter().any(|p| p == phone_label))
            .map(|group| group.class.as_str())
            .unwrap_or(OTHERS_CLASS)
    }

    /// Position of `phone_class` among the group keys.
    ///
    /// [`OTHERS_CLASS`] sits one past the last group unless a group uses
    /// that name itself.
    pub fn class_index(&self, phone_class: &str) -> Option<usize> {
        if self.is_identity() {
            return None;
        }
        self.groups
            .iter()
            .position(|group| group.class == phone_class)
            .or_else(|| (phone_class == OTHERS_CLASS).then_some(self.groups.len()))
    }

    /// Class name and index for a raw label
    pub fn label(&self, phone_label: &str) -> (String, Option<usize>) {
        let class = self.classify(phone_label);
        (class.to_string(), self.class_index(class))
    }

    /// Ordered class vocabulary, including the catch-all class
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.groups.iter().map(|g| g.class.as_str()).collect();
        if !self.is_identity() && !names.contains(&OTHERS_CLASS) {
            names.push(OTHERS_CLASS);
        }
        names
    }
}

/// Drop ARPABET stress digits, e.g. `AH0` -> `AH`
pub fn strip_stress(phone_label: &str) -> String {
    phone_label.chars().filter(|c| !c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn labeler() -> PhonemeLabeler {
        PhonemeLabeler::new(vec![
            PhoneGroup::new("vowels", &["AA", "AE", "AH"]),
            PhoneGroup::new("nasals", &["M", "N", "NG"]),
            PhoneGroup::new("front", &["AE", "IY"]),
        ])
    }

    #[test]
    fn test_first_match_wins() {
        let labeler = labeler();
        assert_eq!(labeler.classify("AE"), "vowels");
        assert_eq!(labeler.classify("IY"), "front");
        assert_eq!(labeler.classify("NG"), "nasals");
    }

    #[test]
    fn test_unmatched_falls_back_to_others() {
        let labeler = labeler();
        assert_eq!(labeler.classify("sil"), OTHERS_CLASS);
        assert_eq!(labeler.label("sil"), ("others".to_string(), Some(3)));
    }

    #[test]
    fn test_class_index_is_positional() {
        let labeler = labeler();
        assert_eq!(labeler.class_index("vowels"), Some(0));
        assert_eq!(labeler.class_index("front"), Some(2));
        assert_eq!(labeler.class_index("plosives"), None);
        assert_eq!(labeler.class_names(), vec!["vowels", "nasals", "front", "others"]);
    }

    #[test]
    fn test_explicit_others_group() {
        let labeler = PhonemeLabeler::new(vec![
            PhoneGroup::new("others", &["sil"]),
            PhoneGroup::new("vowels", &["AA"]),
        ]);
        assert_eq!(labeler.class_index("others"), Some(0));
        assert_eq!(labeler.label("ZH"), ("others".to_string(), Some(0)));
        assert_eq!(labeler.class_names(), vec!["others", "vowels"]);
    }

    #[test]
    fn test_identity() {
        let labeler = PhonemeLabeler::identity();
        assert_eq!(labeler.classify("AH"), "AH");
        assert_eq!(labeler.class_index("AH"), None);
        assert!(labeler.class_names().is_empty());
    }

    #[test]
    fn test_from_json_keeps_order() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"class": "z", "phones": ["AA"]}}, {{"class": "a", "phones": ["AA", "B"]}}]"#
        )
        .unwrap();

        let labeler = PhonemeLabeler::from_json_file(file.path()).unwrap();

        assert_eq!(labeler.classify("AA"), "z");
        assert_eq!(labeler.class_index("a"), Some(1));
    }

    #[test]
    fn test_strip_stress() {
        assert_eq!(strip_stress("AH0"), "AH");
        assert_eq!(strip_stress("ER12"), "ER");
        assert_eq!(strip_stress("sil"), "sil");
    }
}
