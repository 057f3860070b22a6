//! TIMIT `.PHN` label files: one `start end label` line per phone, with
//! start and end given as sample offsets.

use crate::error::{DatasetError, DatasetResult};
use std::path::Path;

/// Divisor turning TIMIT sample offsets into seconds.
///
/// Matches the constant the published TIMIT description tables were built
/// with, so rows stay comparable with existing caches.
pub const TIMIT_SAMPLE_DIVISOR: f64 = 15987.0;

/// One line of a `.PHN` file
#[derive(Debug, Clone, PartialEq)]
pub struct PhnLabel {
    /// Start time in seconds, rounded to milliseconds
    pub t0: f64,
    /// End time in seconds, rounded to milliseconds
    pub t1: f64,
    /// Upper-cased phone symbol
    pub phone: String,
}

/// Read and parse a `.PHN` file
pub fn read_phn<P: AsRef<Path>>(path: P) -> DatasetResult<Vec<PhnLabel>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    parse_phn(&text, path)
}

/// Parse `.PHN` contents; blank lines are skipped
pub fn parse_phn(source: &str, path: &Path) -> DatasetResult<Vec<PhnLabel>> {
    let mut labels = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        let error = |message: String| DatasetError::ParseError {
            path: path.to_path_buf(),
            line: index + 1,
            message,
        };

        let [start, end, phone] = fields[..] else {
            return Err(error(format!("expected 3 fields, found {}", fields.len())));
        };
        let start: u64 = start
            .parse()
            .map_err(|_| error(format!("invalid start offset {:?}", start)))?;
        let end: u64 = end
            .parse()
            .map_err(|_| error(format!("invalid end offset {:?}", end)))?;

        labels.push(PhnLabel {
            t0: offset_to_seconds(start),
            t1: offset_to_seconds(end),
            phone: phone.to_uppercase(),
        });
    }

    Ok(labels)
}

fn offset_to_seconds(offset: u64) -> f64 {
    (offset as f64 / TIMIT_SAMPLE_DIVISOR * 1000.0).round_ties_even() / 1000.0
}
