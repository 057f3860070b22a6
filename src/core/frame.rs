use super::audio::BitDepth;
use ndarray::Array2;

/// One labelled phone occurrence inside an audio file
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneInterval {
    /// Audio file path relative to the corpus root, forward-slash separated
    pub audio_path: String,
    /// Start time in seconds
    pub t0: f64,
    /// End time in seconds
    pub t1: f64,
    /// Raw phone symbol
    pub phone_label: String,
    /// Coarse class of the phone
    pub phone_class: String,
    /// Index of `phone_class` in the class vocabulary
    pub class_index: usize,
}

impl PhoneInterval {
    /// Check `0 <= t0 <= t1` with finite bounds
    pub fn is_valid(&self) -> bool {
        self.t0.is_finite() && self.t1.is_finite() && self.t0 >= 0.0 && self.t0 <= self.t1
    }
}

/// A training example: owned samples of shape (channels, width) plus labels
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Samples, owned independently of the source waveform
    pub samples: Array2<f32>,
    /// Raw phone symbol
    pub phone_label: String,
    /// Coarse class of the phone
    pub phone_class: String,
    /// Index of `phone_class` in the class vocabulary
    pub class_index: usize,
    /// Sample rate of the source recording
    pub sample_rate: u32,
    /// Bit depth of the source recording
    pub bit_depth: BitDepth,
}

impl Frame {
    /// Frame width in samples
    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.samples.nrows()
    }
}
