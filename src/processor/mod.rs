//! Phone interval to frame processing

pub mod extract;
pub mod segment;

pub use extract::FrameExtractor;
pub use segment::{fit_width, sliding_windows, FrameConfig, FramePolicy, FrameSegmenter, TailPolicy};

/// Frame extraction summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentationStats {
    /// Audio files decoded
    pub files_loaded: u64,
    /// Intervals segmented
    pub intervals_processed: u64,
    /// Frames produced
    pub frames_emitted: u64,
    /// Samples across all frames and channels
    pub samples_emitted: u64,
}
