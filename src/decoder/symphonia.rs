use super::{resolve, WaveformLoader};
use crate::core::{AudioMetadata, BitDepth, Channels, Waveform};
use crate::error::{DatasetError, DatasetResult};
use log::{debug, warn};
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CodecParameters, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::SampleFormat;

/// Symphonia-based whole-file decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaLoader;

impl SymphoniaLoader {
    /// Decode every sample of the first audio track into a planar waveform
    pub fn decode_file(path: &Path) -> DatasetResult<Waveform> {
        let mut reader = open_reader(path)?;
        let (track_id, params) = first_audio_track(reader.as_ref())?;

        let sample_rate = params
            .sample_rate
            .ok_or_else(|| DatasetError::InvalidMetadata("Unknown sample rate".to_string()))?;
        let bit_depth = bit_depth_of(&params);

        let mut decoder = symphonia::default::get_codecs()
            .make(&params, &DecoderOptions::default())
            .map_err(|e| DatasetError::DecodeError(e.to_string()))?;

        let mut interleaved: Vec<f32> = Vec::new();
        let mut channel_count = params.channels.map(|c| c.count());

        loop {
            let packet = match reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(e)) => {
                    warn!("{}: skipping corrupt packet: {}", path.display(), e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let spec = *decoded.spec();
            channel_count.get_or_insert(spec.channels.count());

            let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            buffer.copy_interleaved_ref(decoded);
            interleaved.extend_from_slice(buffer.samples());
        }

        let channel_count = channel_count
            .filter(|&n| n > 0)
            .ok_or_else(|| DatasetError::InvalidMetadata("Unknown channel count".to_string()))?;

        debug!(
            "decoded {}: {} Hz, {} channels, {} samples",
            path.display(),
            sample_rate,
            channel_count,
            interleaved.len() / channel_count
        );

        Waveform::from_interleaved(interleaved, channel_count, sample_rate, bit_depth)
    }
}

impl WaveformLoader for SymphoniaLoader {
    fn load(&self, root: &Path, relative_path: &str) -> DatasetResult<Waveform> {
        Self::decode_file(&resolve(root, relative_path))
    }
}

/// Read stream parameters without decoding any samples
pub fn probe<P: AsRef<Path>>(path: P) -> DatasetResult<AudioMetadata> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    let (_, params) = first_audio_track(reader.as_ref())?;

    let sample_rate = params
        .sample_rate
        .ok_or_else(|| DatasetError::InvalidMetadata("Unknown sample rate".to_string()))?;
    let channels = params
        .channels
        .ok_or_else(|| DatasetError::InvalidMetadata("Unknown channel count".to_string()))?;

    let codec = symphonia::default::get_codecs()
        .get_codec(params.codec)
        .map(|descriptor| descriptor.short_name.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let channels = Channels::from_count(channels.count() as u32)?;
    let mut metadata =
        AudioMetadata::new(sample_rate, channels, codec)?.with_bit_depth(bit_depth_of(&params));
    if let Some(n_frames) = params.n_frames {
        metadata = metadata.with_duration(Duration::from_secs_f64(n_frames as f64 / sample_rate as f64));
    }

    Ok(metadata)
}

fn open_reader(path: &Path) -> DatasetResult<Box<dyn FormatReader>> {
    let file = Box::new(File::open(path)?);
    let mss = MediaSourceStream::new(file, Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| DatasetError::UnsupportedFormat(format!("{}: {}", path.display(), e)))?;

    Ok(probed.format)
}

fn first_audio_track(reader: &dyn FormatReader) -> DatasetResult<(u32, CodecParameters)> {
    reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .map(|t| (t.id, t.codec_params.clone()))
        .ok_or_else(|| DatasetError::InvalidMetadata("No audio track found".to_string()))
}

/// Float streams report their float width; lossy codecs without a PCM
/// width decode to f32.
fn bit_depth_of(params: &CodecParameters) -> BitDepth {
    match params.sample_format {
        Some(SampleFormat::F32) => return BitDepth::F32,
        Some(SampleFormat::F64) => return BitDepth::F64,
        _ => {}
    }
    params
        .bits_per_sample
        .and_then(BitDepth::from_bits)
        .unwrap_or(BitDepth::F32)
}
