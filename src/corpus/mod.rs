//! Corpus layouts and the alignment formats they ship with.
//!
//! Each corpus is one free function that walks its directory tree and
//! returns rows of the unified description table.

pub mod arctic;
pub mod librispeech;
pub mod phn;
pub mod speakers;
pub mod textgrid;
pub mod timit;

pub use arctic::describe_arctic;
pub use librispeech::describe_librispeech;
pub use textgrid::TextGrid;
pub use timit::describe_timit;

use crate::description::DescriptionRow;
use crate::error::{DatasetError, DatasetResult};
use crate::phoneme::PhonemeLabeler;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Index of the phone tier in ARCTIC and MFA TextGrids (tier 0 holds words)
pub const PHONES_TIER_INDEX: usize = 1;

/// Supported corpora
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corpus {
    /// L2-ARCTIC
    Arctic,
    /// DARPA TIMIT
    Timit,
    /// LibriSpeech with Montreal Forced Aligner TextGrids
    LibriSpeech,
}

impl Corpus {
    /// Walk `root` and build the description table for this corpus
    pub fn describe(&self, root: &Path, labeler: &PhonemeLabeler) -> DatasetResult<Vec<DescriptionRow>> {
        match self {
            Corpus::Arctic => describe_arctic(root, labeler),
            Corpus::Timit => describe_timit(root, labeler),
            Corpus::LibriSpeech => describe_librispeech(root, labeler),
        }
    }
}

impl FromStr for Corpus {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arctic" | "l2-arctic" => Ok(Corpus::Arctic),
            "timit" => Ok(Corpus::Timit),
            "librispeech" => Ok(Corpus::LibriSpeech),
            other => Err(DatasetError::ConfigError(format!("unknown corpus {:?}", other))),
        }
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Corpus::Arctic => "arctic",
            Corpus::Timit => "timit",
            Corpus::LibriSpeech => "librispeech",
        };
        f.write_str(name)
    }
}

/// Forward-slash path of `path` relative to `root`
pub fn relative_path(root: &Path, path: &Path) -> DatasetResult<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        DatasetError::ConfigError(format!(
            "{} is not under {}",
            path.display(),
            root.display()
        ))
    })?;

    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Ok(parts.join("/"))
}

/// Sorted subdirectories of `dir`
pub(crate) fn subdirectories(dir: &Path) -> DatasetResult<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Sorted files in `dir` whose extension matches `extension` ignoring case
pub(crate) fn files_with_extension(dir: &Path, extension: &str) -> DatasetResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Final path component, as UTF-8
pub(crate) fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name without its extension, as UTF-8
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The phone tier of an aligned TextGrid: the tier named `phones`, else the
/// second tier
pub(crate) fn phones_tier<'a>(grid: &'a TextGrid, path: &Path) -> DatasetResult<&'a textgrid::Tier> {
    grid.tier_by_name("phones")
        .or_else(|| grid.tier(PHONES_TIER_INDEX))
        .ok_or_else(|| DatasetError::ParseError {
            path: path.to_path_buf(),
            line: 0,
            message: format!("no phone tier among {} tiers", grid.tiers.len()),
        })
}

/// Speaker-level columns shared by every row of one recording
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingInfo {
    pub usage: Option<String>,
    pub speaker_id: Option<String>,
    pub gender: Option<String>,
    pub dialect: Option<String>,
    pub alignment_file_path: String,
    pub audio_file_path: String,
}

impl RecordingInfo {
    /// Row for one labelled span of this recording
    pub fn row(&self, phone_name: String, t0: f64, t1: f64, labeler: &PhonemeLabeler) -> DescriptionRow {
        let (phone_class, class_index) = labeler.label(&phone_name);
        DescriptionRow {
            phone_name,
            phone_class,
            class_index,
            usage: self.usage.clone(),
            speaker_id: self.speaker_id.clone(),
            gender: self.gender.clone(),
            dialect: self.dialect.clone(),
            alignment_file_path: self.alignment_file_path.clone(),
            audio_file_path: self.audio_file_path.clone(),
            t0,
            t1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let root = Path::new("/corpora/timit");
        let file: PathBuf = ["/corpora/timit", "TRAIN", "DR1", "FCJF0", "SA1.PHN"].iter().collect();
        assert_eq!(relative_path(root, &file).unwrap(), "TRAIN/DR1/FCJF0/SA1.PHN");
        assert!(relative_path(Path::new("/elsewhere"), &file).is_err());
    }

    #[test]
    fn test_corpus_from_str() {
        assert_eq!("ARCTIC".parse::<Corpus>().unwrap(), Corpus::Arctic);
        assert_eq!("librispeech".parse::<Corpus>().unwrap(), Corpus::LibriSpeech);
        assert!("buckeye".parse::<Corpus>().is_err());
        assert_eq!(Corpus::Timit.to_string(), "timit");
    }

    #[test]
    fn test_files_with_extension_sorted() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["b.PHN", "a.phn", "a.WRD", "c.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }

        let files = files_with_extension(dir.path(), "phn").unwrap();
        let names: Vec<String> = files.iter().map(|p| file_stem(p)).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
