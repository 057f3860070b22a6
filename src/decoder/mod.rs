//! Waveform loading

pub mod symphonia;

pub use self::symphonia::{probe, SymphoniaLoader};

use crate::core::Waveform;
use crate::error::DatasetResult;
use std::path::{Path, PathBuf};

/// Source of decoded waveforms, addressed by corpus-relative path
pub trait WaveformLoader: Sync {
    /// Load the whole file at `relative_path` under `root`
    fn load(&self, root: &Path, relative_path: &str) -> DatasetResult<Waveform>;
}

/// Join a forward-slash separated relative path onto `root`
pub fn resolve(root: &Path, relative_path: &str) -> PathBuf {
    relative_path
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

/// Decode a whole audio file
pub fn load_waveform<P: AsRef<Path>>(path: P) -> DatasetResult<Waveform> {
    SymphoniaLoader::decode_file(path.as_ref())
}
