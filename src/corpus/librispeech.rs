use super::{dir_name, file_stem, files_with_extension, phones_tier, relative_path, subdirectories, RecordingInfo, TextGrid};
use crate::description::DescriptionRow;
use crate::error::DatasetResult;
use crate::phoneme::PhonemeLabeler;
use log::{info, warn};
use std::path::Path;

/// Describe a LibriSpeech tree aligned with MFA:
/// `<root>/<subset>/<speaker>/<chapter>/<utt>.TextGrid` next to `<utt>.flac`.
///
/// The usage tag is the subset prefix, so `dev-clean` and `dev-other`
/// both become `dev`.
pub fn describe_librispeech(root: &Path, labeler: &PhonemeLabeler) -> DatasetResult<Vec<DescriptionRow>> {
    let mut rows = Vec::new();

    for subset_dir in subdirectories(root)? {
        let subset = dir_name(&subset_dir);
        let usage = subset.split('-').next().unwrap_or(&subset).to_string();

        for speaker_dir in subdirectories(&subset_dir)? {
            let speaker_id = dir_name(&speaker_dir);

            for chapter_dir in subdirectories(&speaker_dir)? {
                for textgrid_file in files_with_extension(&chapter_dir, "TextGrid")? {
                    let flac_file = chapter_dir.join(format!("{}.flac", file_stem(&textgrid_file)));
                    if !flac_file.is_file() {
                        warn!("no audio for {}, skipping", textgrid_file.display());
                        continue;
                    }

                    let grid = TextGrid::from_file(&textgrid_file)?;
                    let recording = RecordingInfo {
                        usage: Some(usage.clone()),
                        speaker_id: Some(speaker_id.clone()),
                        alignment_file_path: relative_path(root, &textgrid_file)?,
                        audio_file_path: relative_path(root, &flac_file)?,
                        ..RecordingInfo::default()
                    };

                    for interval in phones_tier(&grid, &textgrid_file)?.intervals() {
                        rows.push(recording.row(interval.text.clone(), interval.xmin, interval.xmax, labeler));
                    }
                }
            }
        }
    }

    info!("librispeech: {} phones under {}", rows.len(), root.display());
    Ok(rows)
}
