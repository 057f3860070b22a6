//! Frame export

pub mod wav;

pub use wav::WavEncoder;

use crate::core::{Channels, Frame};
use crate::error::DatasetResult;
use log::info;
use std::path::{Path, PathBuf};

/// Trait for frame writers
pub trait Encoder {
    /// Encode a frame to output
    fn encode(&mut self, frame: &Frame) -> DatasetResult<()>;

    /// Finalize encoding (flush any remaining data)
    fn finalize(&mut self) -> DatasetResult<()> {
        Ok(())
    }
}

/// Write each frame to `dir` as `<index>_<class>.wav`
pub fn export_frames<P: AsRef<Path>>(dir: P, frames: &[Frame]) -> DatasetResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(frames.len());
    for (index, frame) in frames.iter().enumerate() {
        let class: String = frame
            .phone_class
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        let path = dir.join(format!("{:06}_{}.wav", index, class));

        let channels = Channels::from_count(frame.channel_count() as u32)?;
        let mut encoder = WavEncoder::new(&path, frame.sample_rate, channels)?;
        encoder.encode(frame)?;
        encoder.finalize()?;
        written.push(path);
    }

    info!("exported {} frames to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BitDepth;
    use ndarray::Array2;
    use tempfile::TempDir;

    #[test]
    fn test_export_frames() {
        let dir = TempDir::new().unwrap();
        let frame = Frame {
            samples: Array2::zeros((1, 64)),
            phone_label: "AH".to_string(),
            phone_class: "mid vowels".to_string(),
            class_index: 0,
            sample_rate: 16000,
            bit_depth: BitDepth::I16,
        };

        let paths = export_frames(dir.path().join("out"), &[frame.clone(), frame]).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[1].ends_with("000001_mid_vowels.wav"));
        let reader = hound::WavReader::open(&paths[0]).unwrap();
        assert_eq!(reader.duration(), 64);
    }
}
