use crate::core::PhoneInterval;
use crate::error::{DatasetError, DatasetResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One phone occurrence in the unified description table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionRow {
    /// Raw phone symbol
    pub phone_name: String,
    /// Coarse class of the phone
    pub phone_class: String,
    /// Index of the class in the labeler vocabulary
    pub class_index: Option<usize>,
    /// Split tag (`train`, `test`, ...)
    pub usage: Option<String>,
    /// Speaker identifier
    pub speaker_id: Option<String>,
    /// Speaker gender (`M` / `F`)
    pub gender: Option<String>,
    /// Dialect region or first language
    pub dialect: Option<String>,
    /// Alignment file relative to the corpus root
    pub alignment_file_path: String,
    /// Audio file relative to the corpus root
    pub audio_file_path: String,
    /// Start time in seconds
    pub t0: f64,
    /// End time in seconds
    pub t1: f64,
}

impl DescriptionRow {
    /// Check `0 <= t0 <= t1` with finite bounds
    pub fn has_valid_times(&self) -> bool {
        self.t0.is_finite() && self.t1.is_finite() && self.t0 >= 0.0 && self.t0 <= self.t1
    }

    /// Interval to cut from the audio file
    pub fn interval(&self) -> DatasetResult<PhoneInterval> {
        let class_index = self
            .class_index
            .ok_or_else(|| DatasetError::MissingClassIndex(self.phone_name.clone()))?;

        Ok(PhoneInterval {
            audio_path: self.audio_file_path.clone(),
            t0: self.t0,
            t1: self.t1,
            phone_label: self.phone_name.clone(),
            phone_class: self.phone_class.clone(),
            class_index,
        })
    }
}

/// Read a cached description table
pub fn read_csv<P: AsRef<Path>>(path: P) -> DatasetResult<Vec<DescriptionRow>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<DescriptionRow>, csv::Error>>()?;
    info!("read {} rows from {}", rows.len(), path.as_ref().display());
    Ok(rows)
}

/// Write a description table, creating parent directories
pub fn write_csv<P: AsRef<Path>>(path: P, rows: &[DescriptionRow]) -> DatasetResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Reuse the cached table at `cache` if present, otherwise build and cache it
pub fn load_or_build<P, F>(cache: P, build: F) -> DatasetResult<Vec<DescriptionRow>>
where
    P: AsRef<Path>,
    F: FnOnce() -> DatasetResult<Vec<DescriptionRow>>,
{
    let cache = cache.as_ref();
    if cache.is_file() {
        return read_csv(cache);
    }

    let rows = build()?;
    write_csv(cache, &rows)?;
    Ok(rows)
}
