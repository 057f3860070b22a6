//! Signal transforms applied to frames on access

pub mod normalize;

pub use normalize::Normalize;

use ndarray::Array2;

/// Transform applied to a frame's samples before it is handed out
pub trait FrameTransform: Send + Sync {
    /// Produce transformed samples of shape (channels, width)
    fn apply(&self, samples: &Array2<f32>) -> Array2<f32>;
}

impl<F> FrameTransform for F
where
    F: Fn(&Array2<f32>) -> Array2<f32> + Send + Sync,
{
    fn apply(&self, samples: &Array2<f32>) -> Array2<f32> {
        self(samples)
    }
}
