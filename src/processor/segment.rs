use crate::core::{BitDepth, Frame, PhoneInterval, Waveform};
use crate::error::{DatasetError, DatasetResult};
use ndarray::{s, Array2, ArrayView2};

/// What to do with a segment that is longer than the target width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TailPolicy {
    /// Cut the segment down to the target width
    #[default]
    Truncate,
    /// Leave the segment at its natural width
    KeepOversized,
}

/// Framing strategy resolved from a [`FrameConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePolicy {
    /// One frame per interval, samples unchanged
    Whole,
    /// One frame per interval, right-padded with zeros to `padding_length`
    Padded {
        /// Target width in samples
        padding_length: usize,
    },
    /// 50%-overlapping windows of `frame_length` plus a zero-padded tail
    Sliding {
        /// Window width in samples
        frame_length: usize,
    },
}

/// Frame extraction settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// When false every interval becomes exactly one unpadded frame
    pub overlapping: bool,
    /// Window width in samples
    pub frame_length: usize,
    /// Pad each interval to this width instead of windowing it
    pub padding_length: Option<usize>,
    /// Handling of segments longer than the target width
    pub tail: TailPolicy,
}

impl Default for FrameConfig {
    fn default() -> Self {
        FrameConfig {
            overlapping: true,
            frame_length: 1024,
            padding_length: None,
            tail: TailPolicy::Truncate,
        }
    }
}

impl FrameConfig {
    /// Resolve the framing strategy. `overlapping = false` wins over padding.
    pub fn policy(&self) -> FramePolicy {
        if !self.overlapping {
            FramePolicy::Whole
        } else if let Some(padding_length) = self.padding_length {
            FramePolicy::Padded { padding_length }
        } else {
            FramePolicy::Sliding {
                frame_length: self.frame_length,
            }
        }
    }

    /// Reject widths that would produce empty frames or a zero hop
    pub fn validate(&self) -> DatasetResult<()> {
        match self.policy() {
            FramePolicy::Whole => Ok(()),
            FramePolicy::Padded { padding_length } if padding_length == 0 => Err(
                DatasetError::ConfigError("padding_length must be positive".to_string()),
            ),
            FramePolicy::Padded { .. } => Ok(()),
            FramePolicy::Sliding { frame_length } if frame_length / 2 == 0 => {
                Err(DatasetError::ConfigError(format!(
                    "frame_length must be at least 2 for overlapping frames, got {}",
                    frame_length
                )))
            }
            FramePolicy::Sliding { .. } => Ok(()),
        }
    }
}

/// Cuts phone intervals into labelled fixed-width frames
#[derive(Debug, Clone)]
pub struct FrameSegmenter {
    config: FrameConfig,
}

impl FrameSegmenter {
    /// Create a segmenter from a validated configuration
    pub fn new(config: FrameConfig) -> DatasetResult<Self> {
        config.validate()?;
        Ok(FrameSegmenter { config })
    }

    /// Get the configuration
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Slice `interval` out of `waveform` and segment it
    pub fn segment_waveform(
        &self,
        waveform: &Waveform,
        interval: &PhoneInterval,
    ) -> DatasetResult<Vec<Frame>> {
        if !interval.is_valid() {
            return Err(DatasetError::InvalidInterval {
                path: interval.audio_path.clone(),
                t0: interval.t0,
                t1: interval.t1,
            });
        }

        let segment = waveform.segment(interval.t0, interval.t1);
        Ok(self.segment(segment, interval, waveform.sample_rate(), waveform.bit_depth()))
    }

    /// Segment an already extracted interval into frames.
    ///
    /// Every frame carries the labels of `interval` and the recording
    /// parameters passed in; samples are copied out of `segment`.
    pub fn segment(
        &self,
        segment: ArrayView2<'_, f32>,
        interval: &PhoneInterval,
        sample_rate: u32,
        bit_depth: BitDepth,
    ) -> Vec<Frame> {
        let make_frame = |samples: Array2<f32>| Frame {
            samples,
            phone_label: interval.phone_label.clone(),
            phone_class: interval.phone_class.clone(),
            class_index: interval.class_index,
            sample_rate,
            bit_depth,
        };

        match self.config.policy() {
            FramePolicy::Whole => vec![make_frame(segment.to_owned())],
            FramePolicy::Padded { padding_length } => {
                vec![make_frame(fit_width(segment, padding_length, self.config.tail))]
            }
            FramePolicy::Sliding { frame_length } => {
                sliding_windows(segment, frame_length, self.config.tail)
                    .into_iter()
                    .map(make_frame)
                    .collect()
            }
        }
    }
}

/// Half-overlapping windows over `segment`.
///
/// `len / hop - 1` full windows start at `0, hop, 2 * hop, ...`; one tail
/// window always follows, starting where the next full window would have,
/// and is zero-padded to `frame_length`.
///
/// # Panics
///
/// Panics if `frame_length < 2`. [`FrameConfig::validate`] rejects such
/// configurations before a [`FrameSegmenter`] is built.
pub fn sliding_windows(
    segment: ArrayView2<'_, f32>,
    frame_length: usize,
    tail: TailPolicy,
) -> Vec<Array2<f32>> {
    let len = segment.ncols();
    let hop = frame_length / 2;
    let full_windows = (len / hop).saturating_sub(1);

    let mut windows = Vec::with_capacity(full_windows + 1);
    let mut start = 0;
    for _ in 0..full_windows {
        // Odd frame lengths can overrun the end by one sample
        let end = (start + frame_length).min(len);
        windows.push(fit_width(segment.slice(s![.., start..end]), frame_length, tail));
        start += hop;
    }
    windows.push(fit_width(segment.slice(s![.., start..]), frame_length, tail));

    windows
}

/// Copy `samples` into an array exactly `width` wide, zero-padding on the
/// right. Longer input is truncated or kept whole according to `tail`.
pub fn fit_width(samples: ArrayView2<'_, f32>, width: usize, tail: TailPolicy) -> Array2<f32> {
    let (channels, len) = samples.dim();

    if len >= width {
        return match tail {
            TailPolicy::Truncate => samples.slice(s![.., ..width]).to_owned(),
            TailPolicy::KeepOversized => samples.to_owned(),
        };
    }

    let mut out = Array2::zeros((channels, width));
    out.slice_mut(s![.., ..len]).assign(&samples);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval() -> PhoneInterval {
        PhoneInterval {
            audio_path: "ABA/wav/arctic_a0001.wav".to_string(),
            t0: 0.0,
            t1: 1.0,
            phone_label: "AH".to_string(),
            phone_class: "vowels".to_string(),
            class_index: 3,
        }
    }

    fn ramp(len: usize) -> Array2<f32> {
        Array2::from_shape_fn((1, len), |(_, i)| (i + 1) as f32)
    }

    fn segmenter(config: FrameConfig) -> FrameSegmenter {
        FrameSegmenter::new(config).unwrap()
    }

    fn sliding(frame_length: usize) -> FrameSegmenter {
        segmenter(FrameConfig {
            frame_length,
            ..FrameConfig::default()
        })
    }

    #[test]
    fn test_policy_resolution() {
        let whole = FrameConfig {
            overlapping: false,
            padding_length: Some(2048),
            ..FrameConfig::default()
        };
        assert_eq!(whole.policy(), FramePolicy::Whole);

        let padded = FrameConfig {
            padding_length: Some(2048),
            ..FrameConfig::default()
        };
        assert_eq!(padded.policy(), FramePolicy::Padded { padding_length: 2048 });

        assert_eq!(
            FrameConfig::default().policy(),
            FramePolicy::Sliding { frame_length: 1024 }
        );
    }

    #[test]
    fn test_validate_rejects_zero_hop() {
        let config = FrameConfig {
            frame_length: 1,
            ..FrameConfig::default()
        };
        assert!(FrameSegmenter::new(config).is_err());

        let config = FrameConfig {
            padding_length: Some(0),
            ..FrameConfig::default()
        };
        assert!(FrameSegmenter::new(config).is_err());

        // frame_length is irrelevant for whole-interval frames
        let config = FrameConfig {
            overlapping: false,
            frame_length: 0,
            ..FrameConfig::default()
        };
        assert!(FrameSegmenter::new(config).is_ok());
    }

    #[test]
    fn test_whole_interval_is_identity() {
        let seg = segmenter(FrameConfig {
            overlapping: false,
            frame_length: 16,
            ..FrameConfig::default()
        });
        let data = ramp(37);

        let frames = seg.segment(data.view(), &interval(), 16000, BitDepth::I16);

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].samples, data);
    }

    #[test]
    fn test_short_segment_gives_single_padded_tail() {
        let data = ramp(100);
        let frames = sliding(1024).segment(data.view(), &interval(), 16000, BitDepth::I16);

        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        assert_eq!(frame.width(), 1024);
        assert_eq!(frame.samples.slice(s![.., ..100]), data);
        assert!(frame.samples.slice(s![.., 100..]).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_sliding_windows_offsets() {
        let data = ramp(2600);
        let frames = sliding(1024).segment(data.view(), &interval(), 16000, BitDepth::I16);

        // 2600 / 512 - 1 = 4 full windows, then the tail
        assert_eq!(frames.len(), 5);
        for (k, frame) in frames.iter().take(4).enumerate() {
            let start = k * 512;
            assert_eq!(frame.samples, data.slice(s![.., start..start + 1024]));
        }

        let tail = &frames[4].samples;
        assert_eq!(tail.ncols(), 1024);
        assert_eq!(tail.slice(s![.., ..552]), data.slice(s![.., 2048..]));
        assert!(tail.slice(s![.., 552..]).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_segment_between_one_and_two_hops() {
        // 700 / 512 - 1 = 0 full windows; the tail covers everything
        let data = ramp(700);
        let frames = sliding(1024).segment(data.view(), &interval(), 16000, BitDepth::I16);

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].samples.slice(s![.., ..700]), data);
    }

    #[test]
    fn test_exact_multiple_of_hop() {
        let data = ramp(2048);
        let frames = sliding(1024).segment(data.view(), &interval(), 16000, BitDepth::I16);

        // three full windows; the tail holds the last hop plus padding
        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|f| f.width() == 1024));
        assert_eq!(frames[2].samples, data.slice(s![.., 1024..]));
        assert_eq!(frames[3].samples.slice(s![.., ..512]), data.slice(s![.., 1536..]));
    }

    #[test]
    fn test_odd_frame_length_keeps_width() {
        let data = ramp(10);
        let windows = sliding_windows(data.view(), 5, TailPolicy::Truncate);

        // hop 2, 10 / 2 - 1 = 4 full windows; the last one overruns by a sample
        assert_eq!(windows.len(), 5);
        assert!(windows.iter().all(|w| w.ncols() == 5));
        assert_eq!(windows[3].row(0).to_vec(), vec![7.0, 8.0, 9.0, 10.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn test_sliding_windows_zero_hop_panics() {
        let data = ramp(10);
        sliding_windows(data.view(), 1, TailPolicy::Truncate);
    }

    #[test]
    fn test_empty_segment_yields_zero_frame() {
        let data = Array2::<f32>::zeros((1, 0));
        let frames = sliding(8).segment(data.view(), &interval(), 16000, BitDepth::I16);

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].samples, Array2::<f32>::zeros((1, 8)));
    }

    #[test]
    fn test_padding_policy() {
        let seg = segmenter(FrameConfig {
            padding_length: Some(2048),
            ..FrameConfig::default()
        });
        let data = ramp(2000);

        let frames = seg.segment(data.view(), &interval(), 16000, BitDepth::I16);

        assert_eq!(frames.len(), 1);
        let frame = &frames[0].samples;
        assert_eq!(frame.ncols(), 2048);
        assert_eq!(frame.slice(s![.., ..2000]), data);
        assert!(frame.slice(s![.., 2000..]).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_padding_policy_long_segment() {
        let data = ramp(3000);

        let truncating = segmenter(FrameConfig {
            padding_length: Some(2048),
            ..FrameConfig::default()
        });
        let frames = truncating.segment(data.view(), &interval(), 16000, BitDepth::I16);
        assert_eq!(frames[0].samples, data.slice(s![.., ..2048]));

        let keeping = segmenter(FrameConfig {
            padding_length: Some(2048),
            tail: TailPolicy::KeepOversized,
            ..FrameConfig::default()
        });
        let frames = keeping.segment(data.view(), &interval(), 16000, BitDepth::I16);
        assert_eq!(frames[0].samples, data);
    }

    #[test]
    fn test_labels_propagate() {
        let data = ramp(5000);
        let frames = sliding(1024).segment(data.view(), &interval(), 44100, BitDepth::I24);

        assert!(frames.len() > 1);
        for frame in &frames {
            assert_eq!(frame.phone_label, "AH");
            assert_eq!(frame.phone_class, "vowels");
            assert_eq!(frame.class_index, 3);
            assert_eq!(frame.sample_rate, 44100);
            assert_eq!(frame.bit_depth, BitDepth::I24);
        }
    }

    #[test]
    fn test_multichannel_frames() {
        let data = Array2::from_shape_fn((2, 1500), |(c, i)| (c * 10_000 + i) as f32);
        let frames = sliding(1024).segment(data.view(), &interval(), 16000, BitDepth::I16);

        assert!(frames.iter().all(|f| f.samples.dim() == (2, 1024)));
        assert_eq!(frames[0].samples[[1, 0]], 10_000.0);
    }

    #[test]
    fn test_deterministic() {
        let data = Array2::from_shape_fn((1, 4321), |(_, i)| ((i * 7919) % 255) as f32 / 255.0);
        let seg = sliding(512);

        let first = seg.segment(data.view(), &interval(), 16000, BitDepth::I16);
        let second = seg.segment(data.view(), &interval(), 16000, BitDepth::I16);

        assert_eq!(first, second);
    }

    #[test]
    fn test_segment_waveform_uses_rounded_offsets() {
        let samples = Array2::from_shape_fn((1, 100), |(_, i)| i as f32);
        let wave = Waveform::new(samples, 10, BitDepth::I16).unwrap();
        let seg = segmenter(FrameConfig {
            overlapping: false,
            ..FrameConfig::default()
        });

        let mut phone = interval();
        phone.t0 = 0.25;
        phone.t1 = 0.75;
        let frames = seg.segment_waveform(&wave, &phone).unwrap();

        // 2.5 -> 2 and 7.5 -> 8
        assert_eq!(frames[0].samples.row(0).to_vec(), vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_segment_waveform_rejects_reversed_interval() {
        let wave = Waveform::new(Array2::zeros((1, 100)), 10, BitDepth::I16).unwrap();
        let mut phone = interval();
        phone.t0 = 0.5;
        phone.t1 = 0.2;

        let result = sliding(8).segment_waveform(&wave, &phone);
        assert!(matches!(result, Err(DatasetError::InvalidInterval { .. })));
    }
}
