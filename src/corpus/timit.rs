use super::phn::read_phn;
use super::speakers::timit_dialect;
use super::{dir_name, file_stem, files_with_extension, relative_path, subdirectories, RecordingInfo};
use crate::description::DescriptionRow;
use crate::error::{DatasetError, DatasetResult};
use crate::phoneme::PhonemeLabeler;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Audio names tried next to `<UTT>.PHN`, in order
const AUDIO_SUFFIXES: [&str; 3] = [".WAV.wav", ".WAV", ".wav"];

/// Describe a TIMIT tree: `<root>/<USAGE>/<DR>/<SPEAKER>/<UTT>.PHN`.
///
/// Gender is the first letter of the speaker directory and the dialect is
/// the region name of the `DR` directory.
pub fn describe_timit(root: &Path, labeler: &PhonemeLabeler) -> DatasetResult<Vec<DescriptionRow>> {
    let mut rows = Vec::new();

    for usage_dir in subdirectories(root)? {
        let usage = dir_name(&usage_dir);

        for dialect_dir in subdirectories(&usage_dir)? {
            let region = dir_name(&dialect_dir);
            let dialect = timit_dialect(&region).ok_or_else(|| DatasetError::UnknownDialect(region.clone()))?;

            for speaker_dir in subdirectories(&dialect_dir)? {
                let speaker_id = dir_name(&speaker_dir);
                let gender = speaker_id.chars().next().map(|c| c.to_ascii_uppercase().to_string());

                for phn_file in files_with_extension(&speaker_dir, "PHN")? {
                    let Some(audio_file) = find_audio(&phn_file) else {
                        warn!("no audio for {}, skipping", phn_file.display());
                        continue;
                    };

                    let recording = RecordingInfo {
                        usage: Some(usage.clone()),
                        speaker_id: Some(speaker_id.clone()),
                        gender: gender.clone(),
                        dialect: Some(dialect.to_string()),
                        alignment_file_path: relative_path(root, &phn_file)?,
                        audio_file_path: relative_path(root, &audio_file)?,
                    };

                    for label in read_phn(&phn_file)? {
                        rows.push(recording.row(label.phone, label.t0, label.t1, labeler));
                    }
                }
            }
        }
    }

    info!("timit: {} phones under {}", rows.len(), root.display());
    Ok(rows)
}

fn find_audio(phn_file: &Path) -> Option<PathBuf> {
    let stem = file_stem(phn_file);
    let dir = phn_file.parent()?;
    AUDIO_SUFFIXES
        .iter()
        .map(|suffix| dir.join(format!("{}{}", stem, suffix)))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_describe_timit() {
        let dir = TempDir::new().unwrap();
        let speaker = dir.path().join("TRAIN/DR2/FAEM0");
        std::fs::create_dir_all(&speaker).unwrap();
        std::fs::write(speaker.join("SA1.PHN"), "0 3050 h#\n3050 4559 sh\n").unwrap();
        std::fs::write(speaker.join("SA1.WAV.wav"), b"").unwrap();
        std::fs::write(speaker.join("SA2.PHN"), "0 100 h#\n").unwrap();

        let rows = describe_timit(dir.path(), &PhonemeLabeler::identity()).unwrap();

        assert_eq!(rows.len(), 2);
        let sh = &rows[1];
        assert_eq!(sh.phone_name, "SH");
        assert_eq!(sh.phone_class, "SH");
        assert_eq!(sh.class_index, None);
        assert_eq!(sh.usage.as_deref(), Some("TRAIN"));
        assert_eq!(sh.speaker_id.as_deref(), Some("FAEM0"));
        assert_eq!(sh.gender.as_deref(), Some("F"));
        assert_eq!(sh.dialect.as_deref(), Some("Northern"));
        assert_eq!(sh.alignment_file_path, "TRAIN/DR2/FAEM0/SA1.PHN");
        assert_eq!(sh.audio_file_path, "TRAIN/DR2/FAEM0/SA1.WAV.wav");
    }

    #[test]
    fn test_unknown_dialect() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("TEST/DR0/MABC0")).unwrap();

        let result = describe_timit(dir.path(), &PhonemeLabeler::identity());
        assert!(matches!(result, Err(DatasetError::UnknownDialect(_))));
    }
}
