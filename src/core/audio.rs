use crate::error::{DatasetError, DatasetResult};
use ndarray::{s, Array2, ArrayView2};
use std::ops::Range;
use std::time::Duration;

/// Channel configuration for audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Mono (1 channel)
    Mono = 1,
    /// Stereo (2 channels)
    Stereo = 2,
    /// Quad (4 channels)
    Quad = 4,
    /// 5.1 surround sound
    SurroundFivePointOne = 6,
    /// 7.1 surround sound
    SurroundSevenPointOne = 8,
}

impl Channels {
    /// Create Channels from channel count
    pub fn from_count(count: u32) -> DatasetResult<Self> {
        match count {
            1 => Ok(Channels::Mono),
            2 => Ok(Channels::Stereo),
            4 => Ok(Channels::Quad),
            6 => Ok(Channels::SurroundFivePointOne),
            8 => Ok(Channels::SurroundSevenPointOne),
            n => Err(DatasetError::InvalidChannels {
                expected: 1,
                got: n,
            }),
        }
    }

    /// Get the number of channels
    pub fn count(&self) -> u32 {
        *self as u32
    }

    /// Get channel layout name
    pub fn name(&self) -> &'static str {
        match self {
            Channels::Mono => "Mono",
            Channels::Stereo => "Stereo",
            Channels::Quad => "Quad",
            Channels::SurroundFivePointOne => "5.1 Surround",
            Channels::SurroundSevenPointOne => "7.1 Surround",
        }
    }
}

/// Bit depth of the source recording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// 8-bit unsigned (0-255)
    I8,
    /// 16-bit signed (-32768 to 32767)
    I16,
    /// 24-bit signed
    I24,
    /// 32-bit signed
    I32,
    /// 32-bit floating point (internal standard)
    F32,
    /// 64-bit floating point
    F64,
}

impl BitDepth {
    /// Map an integer PCM bit count to a bit depth
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(BitDepth::I8),
            16 => Some(BitDepth::I16),
            24 => Some(BitDepth::I24),
            32 => Some(BitDepth::I32),
            _ => None,
        }
    }

    /// Bits per sample
    pub fn bits(&self) -> u16 {
        match self {
            BitDepth::I8 => 8,
            BitDepth::I16 => 16,
            BitDepth::I24 => 24,
            BitDepth::I32 | BitDepth::F32 => 32,
            BitDepth::F64 => 64,
        }
    }

}

/// A fully decoded recording held as planar samples of shape (channels, samples)
#[derive(Debug, Clone)]
pub struct Waveform {
    samples: Array2<f32>,
    sample_rate: u32,
    bit_depth: BitDepth,
}

impl Waveform {
    /// Create a waveform from planar samples
    pub fn new(samples: Array2<f32>, sample_rate: u32, bit_depth: BitDepth) -> DatasetResult<Self> {
        if sample_rate == 0 {
            return Err(DatasetError::InvalidSampleRate { rate: sample_rate });
        }
        if samples.nrows() == 0 {
            return Err(DatasetError::InvalidMetadata("waveform has no channels".to_string()));
        }

        Ok(Waveform {
            samples,
            sample_rate,
            bit_depth,
        })
    }

    /// Build a waveform from interleaved samples
    pub fn from_interleaved(
        interleaved: Vec<f32>,
        n_channels: usize,
        sample_rate: u32,
        bit_depth: BitDepth,
    ) -> DatasetResult<Self> {
        if n_channels == 0 {
            return Err(DatasetError::InvalidMetadata("waveform has no channels".to_string()));
        }
        if interleaved.len() % n_channels != 0 {
            return Err(DatasetError::ShapeMismatch(
                "Sample count not divisible by channel count".to_string(),
            ));
        }

        let n_frames = interleaved.len() / n_channels;
        let planar = Array2::from_shape_vec((n_frames, n_channels), interleaved)?
            .reversed_axes()
            .as_standard_layout()
            .into_owned();

        Waveform::new(planar, sample_rate, bit_depth)
    }

    /// Borrow the planar samples
    pub fn samples(&self) -> ArrayView2<'_, f32> {
        self.samples.view()
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Bit depth of the source file
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.samples.nrows()
    }

    /// Number of samples per channel
    pub fn len(&self) -> usize {
        self.samples.ncols()
    }

    /// Check if the waveform holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.len() as f64 / self.sample_rate as f64)
    }

    /// Convert a time in seconds to a sample offset.
    ///
    /// Ties round to even so offsets match the corpus preparation tooling
    /// bit for bit. Negative times map to 0.
    pub fn sample_offset(&self, seconds: f64) -> usize {
        let offset = (seconds * self.sample_rate as f64).round_ties_even();
        if offset <= 0.0 { 0 } else { offset as usize }
    }

    /// Sample range covered by `[t0, t1)`, clamped to the waveform
    pub fn sample_range(&self, t0: f64, t1: f64) -> Range<usize> {
        let start = self.sample_offset(t0).min(self.len());
        let end = self.sample_offset(t1).min(self.len()).max(start);
        start..end
    }

    /// Borrow `samples[:, t0s:t1s]`
    pub fn segment(&self, t0: f64, t1: f64) -> ArrayView2<'_, f32> {
        let range = self.sample_range(t0, t1);
        self.samples.slice(s![.., range])
    }
}

/// Audio metadata/information
#[derive(Debug, Clone)]
pub struct AudioMetadata {
    /// Total duration of the audio
    pub duration: Option<Duration>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: Channels,
    /// Codec name (e.g., "pcm_s16le", "flac")
    pub codec: String,
    /// Bit depth if known
    pub bit_depth: Option<BitDepth>,
}

impl AudioMetadata {
    /// Create new metadata
    pub fn new(sample_rate: u32, channels: Channels, codec: String) -> DatasetResult<Self> {
        if sample_rate == 0 {
            return Err(DatasetError::InvalidSampleRate { rate: sample_rate });
        }

        Ok(AudioMetadata {
            duration: None,
            sample_rate,
            channels,
            codec,
            bit_depth: None,
        })
    }

    /// Set duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set bit depth
    pub fn with_bit_depth(mut self, bit_depth: BitDepth) -> Self {
        self.bit_depth = Some(bit_depth);
        self
    }

    /// Get duration in seconds
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }
}
