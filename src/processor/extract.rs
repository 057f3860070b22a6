use super::segment::FrameSegmenter;
use super::SegmentationStats;
use crate::core::{Frame, PhoneInterval};
use crate::decoder::WaveformLoader;
use crate::description::DescriptionRow;
use crate::error::DatasetResult;
use log::{debug, info};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Loads the audio behind a description table and cuts it into frames
pub struct FrameExtractor<L> {
    segmenter: FrameSegmenter,
    loader: L,
    root: PathBuf,
}

impl<L: WaveformLoader> FrameExtractor<L> {
    /// Create an extractor reading audio relative to `root`
    pub fn new<P: AsRef<Path>>(segmenter: FrameSegmenter, loader: L, root: P) -> Self {
        FrameExtractor {
            segmenter,
            loader,
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the segmenter
    pub fn segmenter(&self) -> &FrameSegmenter {
        &self.segmenter
    }

    /// Frames for every row.
    ///
    /// Each audio file is decoded once and released once its intervals are
    /// cut. Files are processed in parallel; output is grouped by file in
    /// order of first appearance, intervals in table order within a file.
    pub fn extract(&self, rows: &[DescriptionRow]) -> DatasetResult<(Vec<Frame>, SegmentationStats)> {
        let intervals = rows
            .iter()
            .map(DescriptionRow::interval)
            .collect::<DatasetResult<Vec<_>>>()?;
        let by_file = group_by_audio(intervals);

        let per_file = by_file
            .par_iter()
            .map(|(path, intervals)| self.extract_file(path, intervals))
            .collect::<DatasetResult<Vec<Vec<Frame>>>>()?;

        let frames: Vec<Frame> = per_file.into_iter().flatten().collect();
        let stats = SegmentationStats {
            files_loaded: by_file.len() as u64,
            intervals_processed: rows.len() as u64,
            frames_emitted: frames.len() as u64,
            samples_emitted: frames.iter().map(|f| f.samples.len() as u64).sum(),
        };

        info!(
            "extracted {} frames from {} intervals in {} files",
            stats.frames_emitted, stats.intervals_processed, stats.files_loaded
        );
        Ok((frames, stats))
    }

    fn extract_file(&self, path: &str, intervals: &[PhoneInterval]) -> DatasetResult<Vec<Frame>> {
        let waveform = self.loader.load(&self.root, path)?;

        let mut frames = Vec::new();
        for interval in intervals {
            frames.extend(self.segmenter.segment_waveform(&waveform, interval)?);
        }

        debug!("{}: {} intervals, {} frames", path, intervals.len(), frames.len());
        Ok(frames)
    }
}

/// Group intervals by audio file, files in order of first appearance
fn group_by_audio(intervals: Vec<PhoneInterval>) -> Vec<(String, Vec<PhoneInterval>)> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<PhoneInterval>)> = Vec::new();

    for interval in intervals {
        match slots.get(&interval.audio_path) {
            Some(&slot) => groups[slot].1.push(interval),
            None => {
                slots.insert(interval.audio_path.clone(), groups.len());
                groups.push((interval.audio_path.clone(), vec![interval]));
            }
        }
    }

    groups
}
