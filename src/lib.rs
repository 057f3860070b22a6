#![warn(missing_docs)]

//! # phoneme-frames: phone-level training examples from speech corpora
//!
//! Turns aligned speech corpora into fixed-width audio frames labelled with
//! phone classes.
//!
//! ## Pipeline
//!
//! - **Describe** - walk an ARCTIC, TIMIT or LibriSpeech tree and build one
//!   [`DescriptionRow`] per aligned phone
//! - **Filter** - select rows by usage, gender, dialect, class or fraction
//! - **Segment** - decode each audio file once and cut every interval into
//!   frames
//! - **Batch** - index frames and stack them into arrays
//!
//! ## Quick Start
//!
//! ```ignore
//! use phoneme_frames::corpus::Corpus;
//! use phoneme_frames::decoder::SymphoniaLoader;
//! use phoneme_frames::processor::{FrameConfig, FrameExtractor, FrameSegmenter};
//! use phoneme_frames::{PhonemeDataset, PhonemeLabeler};
//!
//! let labeler = PhonemeLabeler::from_json_file("classes.json")?;
//! let rows = Corpus::Arctic.describe("l2arctic".as_ref(), &labeler)?;
//!
//! let segmenter = FrameSegmenter::new(FrameConfig::default())?;
//! let extractor = FrameExtractor::new(segmenter, SymphoniaLoader, "l2arctic");
//! let (frames, _stats) = extractor.extract(&rows)?;
//! let dataset = PhonemeDataset::new(frames);
//! ```

/// Core audio types and structures
pub mod core;
/// Error types for dataset operations
pub mod error;
/// Waveform loading
pub mod decoder;
/// Corpus walkers and alignment parsers
pub mod corpus;
/// Description table, caching, filtering and splits
pub mod description;
/// Phone class labelling
pub mod phoneme;
/// Frame segmentation
pub mod processor;
/// Signal transforms
pub mod transform;
/// Dataset indexing and batching
pub mod dataset;
/// Frame export
pub mod encoder;

// Export public types
pub use self::core::{BitDepth, Channels, Frame, PhoneInterval, Waveform};
pub use dataset::{Batch, PhonemeDataset};
pub use description::DescriptionRow;
pub use error::{DatasetError, DatasetResult};
pub use phoneme::PhonemeLabeler;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
