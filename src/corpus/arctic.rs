use super::speakers::arctic_speaker;
use super::{dir_name, file_stem, files_with_extension, phones_tier, relative_path, subdirectories, RecordingInfo, TextGrid};
use crate::description::DescriptionRow;
use crate::error::{DatasetError, DatasetResult};
use crate::phoneme::{strip_stress, PhonemeLabeler};
use log::{debug, info, warn};
use std::path::Path;

/// Describe an L2-ARCTIC tree: `<root>/<SPEAKER>/textgrid/*.TextGrid` with
/// audio in `<root>/<SPEAKER>/wav/<stem>.wav`.
///
/// Stress digits are stripped from phone marks. Rows carry no usage tag;
/// assign one with [`crate::description::assign_random_split`].
pub fn describe_arctic(root: &Path, labeler: &PhonemeLabeler) -> DatasetResult<Vec<DescriptionRow>> {
    let mut rows = Vec::new();

    for speaker_dir in subdirectories(root)? {
        let textgrid_dir = speaker_dir.join("textgrid");
        if !textgrid_dir.is_dir() {
            debug!("skipping {}: no textgrid directory", speaker_dir.display());
            continue;
        }

        let speaker_id = dir_name(&speaker_dir);
        let speaker =
            arctic_speaker(&speaker_id).ok_or_else(|| DatasetError::UnknownSpeaker(speaker_id.clone()))?;
        let before = rows.len();

        for textgrid_file in files_with_extension(&textgrid_dir, "TextGrid")? {
            let wav_file = speaker_dir.join("wav").join(format!("{}.wav", file_stem(&textgrid_file)));
            if !wav_file.is_file() {
                warn!("no audio for {}, skipping", textgrid_file.display());
                continue;
            }

            let grid = TextGrid::from_file(&textgrid_file)?;
            let recording = RecordingInfo {
                usage: None,
                speaker_id: Some(speaker_id.clone()),
                gender: Some(speaker.gender.code().to_string()),
                dialect: Some(speaker.first_language.to_string()),
                alignment_file_path: relative_path(root, &textgrid_file)?,
                audio_file_path: relative_path(root, &wav_file)?,
            };

            for interval in phones_tier(&grid, &textgrid_file)?.intervals() {
                rows.push(recording.row(strip_stress(&interval.text), interval.xmin, interval.xmax, labeler));
            }
        }

        debug!("{}: {} phones", speaker_id, rows.len() - before);
    }

    info!("arctic: {} phones under {}", rows.len(), root.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::textgrid::tests::LONG;
    use crate::phoneme::PhoneGroup;
    use tempfile::TempDir;

    fn corpus() -> TempDir {
        let dir = TempDir::new().unwrap();
        let speaker = dir.path().join("HKK");
        std::fs::create_dir_all(speaker.join("textgrid")).unwrap();
        std::fs::create_dir_all(speaker.join("wav")).unwrap();
        std::fs::write(speaker.join("textgrid/arctic_a0001.TextGrid"), LONG).unwrap();
        std::fs::write(speaker.join("wav/arctic_a0001.wav"), b"").unwrap();
        // alignment without audio is skipped
        std::fs::write(speaker.join("textgrid/arctic_a0002.TextGrid"), LONG).unwrap();
        std::fs::write(dir.path().join("README.md"), "L2-ARCTIC").unwrap();
        dir
    }

    #[test]
    fn test_describe_arctic() {
        let dir = corpus();
        let labeler = PhonemeLabeler::new(vec![PhoneGroup::new("vowels", &["AY"])]);

        let rows = describe_arctic(dir.path(), &labeler).unwrap();

        assert_eq!(rows.len(), 3);
        let ay = &rows[2];
        assert_eq!(ay.phone_name, "AY");
        assert_eq!(ay.phone_class, "vowels");
        assert_eq!(ay.class_index, Some(0));
        assert_eq!(ay.speaker_id.as_deref(), Some("HKK"));
        assert_eq!(ay.gender.as_deref(), Some("M"));
        assert_eq!(ay.dialect.as_deref(), Some("Korean"));
        assert_eq!(ay.usage, None);
        assert_eq!(ay.audio_file_path, "HKK/wav/arctic_a0001.wav");
        assert_eq!(ay.alignment_file_path, "HKK/textgrid/arctic_a0001.TextGrid");
        assert_eq!((ay.t0, ay.t1), (0.9, 1.5));

        assert_eq!(rows[0].phone_class, "others");
        assert_eq!(rows[0].class_index, Some(1));
    }

    #[test]
    fn test_unknown_speaker() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("NOBODY/textgrid")).unwrap();

        let result = describe_arctic(dir.path(), &PhonemeLabeler::identity());
        assert!(matches!(result, Err(DatasetError::UnknownSpeaker(id)) if id == "NOBODY"));
    }
}
