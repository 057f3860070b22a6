use super::FrameTransform;
use crate::error::{DatasetError, DatasetResult};
use ndarray::Array2;

/// Level normalization - scales each frame to a target peak or RMS level
#[derive(Clone, Debug)]
pub struct Normalize {
    /// Target level (0.0 to 1.0)
    target: f32,
    /// Whether to match RMS (true) or peak (false)
    use_rms: bool,
}

impl Normalize {
    /// Create a peak normalizer
    pub fn peak(target_peak: f32) -> DatasetResult<Self> {
        Self::checked(target_peak, false)
    }

    /// Create an RMS normalizer
    pub fn rms(target_rms: f32) -> DatasetResult<Self> {
        Self::checked(target_rms, true)
    }

    fn checked(target: f32, use_rms: bool) -> DatasetResult<Self> {
        if target <= 0.0 || target > 1.0 {
            return Err(DatasetError::ConfigError(format!(
                "Normalization target must be between 0.0 and 1.0, got {}",
                target
            )));
        }
        Ok(Normalize { target, use_rms })
    }

    fn peak_level(samples: &Array2<f32>) -> f32 {
        samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }

    fn rms_level(samples: &Array2<f32>) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_squared: f32 = samples.iter().map(|&s| s * s).sum();
        (sum_squared / samples.len() as f32).sqrt()
    }
}

impl FrameTransform for Normalize {
    fn apply(&self, samples: &Array2<f32>) -> Array2<f32> {
        let level = if self.use_rms {
            Self::rms_level(samples)
        } else {
            Self::peak_level(samples)
        };

        // silence and zero-padded tails stay untouched
        if level == 0.0 {
            return samples.clone();
        }

        let gain = self.target / level;
        samples.mapv(|s| (s * gain).clamp(-1.0, 1.0))
    }
}
