//! Core audio types and structures

/// Waveform and metadata types
pub mod audio;
/// Phone intervals and the frames cut from them
pub mod frame;

pub use audio::{AudioMetadata, BitDepth, Channels, Waveform};
pub use frame::{Frame, PhoneInterval};
