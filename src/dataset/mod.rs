//! Indexed access and batching over extracted frames

use crate::core::Frame;
use crate::error::{DatasetError, DatasetResult};
use crate::transform::FrameTransform;
use ndarray::{Array2, Array3, ArrayView2, Axis};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// A stacked group of frames
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Samples of shape (batch, channels, width)
    pub samples: Array3<f32>,
    /// Class index per frame
    pub labels: Vec<usize>,
}

/// Frames plus an optional transform applied on access
pub struct PhonemeDataset {
    frames: Vec<Frame>,
    transform: Option<Box<dyn FrameTransform>>,
}

impl PhonemeDataset {
    /// Wrap extracted frames
    pub fn new(frames: Vec<Frame>) -> Self {
        PhonemeDataset {
            frames,
            transform: None,
        }
    }

    /// Apply `transform` to samples handed out by [`get`](Self::get) and batches
    pub fn with_transform<T: FrameTransform + 'static>(mut self, transform: T) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if there are no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Untransformed frames
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Samples and class index of frame `index`
    pub fn get(&self, index: usize) -> Option<(Array2<f32>, usize)> {
        let frame = self.frames.get(index)?;
        Some((self.transformed(frame.samples.view()), frame.class_index))
    }

    /// Frame count per class index
    pub fn class_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for frame in &self.frames {
            *counts.entry(frame.class_index).or_insert(0) += 1;
        }
        counts
    }

    /// Split into batches of at most `batch_size` frames, optionally shuffled.
    ///
    /// All frames must share one shape; whole-interval frames of differing
    /// widths are rejected.
    pub fn batches<R: Rng + ?Sized>(
        &self,
        batch_size: usize,
        shuffle: bool,
        rng: &mut R,
    ) -> DatasetResult<Vec<Batch>> {
        if batch_size == 0 {
            return Err(DatasetError::ConfigError("batch_size must be positive".to_string()));
        }

        let mut order: Vec<usize> = (0..self.frames.len()).collect();
        if shuffle {
            order.shuffle(rng);
        }

        order.chunks(batch_size).map(|chunk| self.collate(chunk)).collect()
    }

    fn collate(&self, indices: &[usize]) -> DatasetResult<Batch> {
        let samples: Vec<Array2<f32>> = indices
            .iter()
            .map(|&i| self.transformed(self.frames[i].samples.view()))
            .collect();

        if let Some(first) = samples.first() {
            if let Some(other) = samples.iter().find(|s| s.dim() != first.dim()) {
                return Err(DatasetError::ShapeMismatch(format!(
                    "cannot batch frames of shape {:?} and {:?}",
                    first.dim(),
                    other.dim()
                )));
            }
        }

        let views: Vec<ArrayView2<'_, f32>> = samples.iter().map(|s| s.view()).collect();
        Ok(Batch {
            samples: ndarray::stack(Axis(0), &views)?,
            labels: indices.iter().map(|&i| self.frames[i].class_index).collect(),
        })
    }

    fn transformed(&self, samples: ArrayView2<'_, f32>) -> Array2<f32> {
        let owned = samples.to_owned();
        match &self.transform {
            Some(transform) => transform.apply(&owned),
            None => owned,
        }
    }
}
