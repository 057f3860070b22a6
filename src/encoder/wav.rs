use crate::core::{Channels, Frame};
use crate::error::{DatasetError, DatasetResult};
use hound::{WavSpec, WavWriter};
use std::path::Path;

/// WAV frame writer (32-bit float)
pub struct WavEncoder {
    writer: Option<WavWriter<std::io::BufWriter<std::fs::File>>>,
    sample_rate: u32,
    channels: Channels,
}

impl WavEncoder {
    /// Create a new WAV encoder to file
    pub fn new<P: AsRef<Path>>(path: P, sample_rate: u32, channels: Channels) -> DatasetResult<Self> {
        if sample_rate == 0 {
            return Err(DatasetError::InvalidSampleRate { rate: sample_rate });
        }

        let spec = WavSpec {
            channels: channels.count() as u16,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let writer = WavWriter::create(path, spec)?;

        Ok(WavEncoder {
            writer: Some(writer),
            sample_rate,
            channels,
        })
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get the number of samples written across channels
    pub fn samples_written(&self) -> u32 {
        self.writer.as_ref().map(|w| w.len()).unwrap_or(0)
    }
}

impl super::Encoder for WavEncoder {
    fn encode(&mut self, frame: &Frame) -> DatasetResult<()> {
        if frame.sample_rate != self.sample_rate {
            return Err(DatasetError::InvalidSampleRate {
                rate: frame.sample_rate,
            });
        }

        if frame.channel_count() != self.channels.count() as usize {
            return Err(DatasetError::InvalidChannels {
                expected: self.channels.count(),
                got: frame.channel_count() as u32,
            });
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| DatasetError::EncodeError("Encoder already finalized".to_string()))?;

        // planar -> interleaved
        for column in frame.samples.columns() {
            for &sample in column {
                writer.write_sample(sample)?;
            }
        }

        Ok(())
    }

    fn finalize(&mut self) -> DatasetResult<()> {
        if let Some(writer) = self.writer.take() {
            writer.finalize()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BitDepth;
    use crate::encoder::Encoder;
    use ndarray::array;
    use tempfile::NamedTempFile;

    fn frame(samples: ndarray::Array2<f32>, sample_rate: u32) -> Frame {
        Frame {
            samples,
            phone_label: "S".to_string(),
            phone_class: "fricatives".to_string(),
            class_index: 4,
            sample_rate,
            bit_depth: BitDepth::I16,
        }
    }

    #[test]
    fn test_wav_encoder_write_interleaves() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut encoder = WavEncoder::new(temp_file.path(), 16000, Channels::Stereo).unwrap();

        encoder
            .encode(&frame(array![[0.1, 0.2], [-0.1, -0.2]], 16000))
            .unwrap();
        assert_eq!(encoder.samples_written(), 4);
        encoder.finalize().unwrap();

        let mut reader = hound::WavReader::open(temp_file.path()).unwrap();
        let written: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(written, vec![0.1, -0.1, 0.2, -0.2]);
    }

    #[test]
    fn test_wav_encoder_invalid_sample_rate() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut encoder = WavEncoder::new(temp_file.path(), 16000, Channels::Mono).unwrap();

        let result = encoder.encode(&frame(array![[0.0, 0.1]], 48000));
        assert!(result.is_err());
    }

    #[test]
    fn test_wav_encoder_invalid_channels() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut encoder = WavEncoder::new(temp_file.path(), 16000, Channels::Mono).unwrap();

        let result = encoder.encode(&frame(array![[0.0, 0.1], [0.2, 0.3]], 16000));
        assert!(matches!(result, Err(DatasetError::InvalidChannels { .. })));
    }

    #[test]
    fn test_encode_after_finalize() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut encoder = WavEncoder::new(temp_file.path(), 16000, Channels::Mono).unwrap();
        encoder.finalize().unwrap();

        assert!(encoder.encode(&frame(array![[0.0]], 16000)).is_err());
    }
}
