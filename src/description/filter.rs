use super::DescriptionRow;
use crate::error::{DatasetError, DatasetResult};
use log::{info, warn};
use rand::seq::index;
use rand::Rng;

/// Row selection over a description table.
///
/// Criteria are applied in a fixed order: invalid times, usage, gender,
/// dialect, phone class, then the random fraction of what remains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptionFilter {
    /// Keep rows with this usage tag (case-insensitive)
    pub usage: Option<String>,
    /// Keep rows whose class is one of these
    pub phone_classes: Option<Vec<String>>,
    /// Keep rows with this gender code (case-insensitive)
    pub gender: Option<String>,
    /// Keep rows whose dialect / first language is one of these
    pub dialects: Option<Vec<String>>,
    /// Keep a random fraction in `(0, 1]` of the remaining rows
    pub fraction: Option<f64>,
}

impl DescriptionFilter {
    /// Filter that keeps every valid row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the usage tag
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Set the allowed phone classes
    pub fn with_phone_classes(mut self, classes: Vec<String>) -> Self {
        self.phone_classes = Some(classes);
        self
    }

    /// Set the gender code
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Set the allowed dialects
    pub fn with_dialects(mut self, dialects: Vec<String>) -> Self {
        self.dialects = Some(dialects);
        self
    }

    /// Set the random fraction
    pub fn with_fraction(mut self, fraction: f64) -> Self {
        self.fraction = Some(fraction);
        self
    }

    /// Apply the filter. The fraction keeps rows in table order.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        rows: Vec<DescriptionRow>,
        rng: &mut R,
    ) -> DatasetResult<Vec<DescriptionRow>> {
        if let Some(fraction) = self.fraction {
            check_fraction("fraction", fraction)?;
        }

        let total = rows.len();
        let mut kept: Vec<DescriptionRow> = rows
            .into_iter()
            .filter(|row| {
                let valid = row.has_valid_times();
                if !valid {
                    warn!(
                        "dropping {} [{}, {}] in {}: invalid interval",
                        row.phone_name, row.t0, row.t1, row.audio_file_path
                    );
                }
                valid
            })
            .filter(|row| self.matches(row))
            .collect();

        if let Some(fraction) = self.fraction {
            kept = sample_fraction(kept, fraction, rng);
        }

        info!("filter kept {} of {} rows", kept.len(), total);
        Ok(kept)
    }

    fn matches(&self, row: &DescriptionRow) -> bool {
        let same = |wanted: &Option<String>, actual: &Option<String>| match (wanted, actual) {
            (None, _) => true,
            (Some(w), Some(a)) => w.eq_ignore_ascii_case(a),
            (Some(_), None) => false,
        };
        let listed = |allowed: &Option<Vec<String>>, actual: Option<&String>| match (allowed, actual) {
            (None, _) => true,
            (Some(list), Some(a)) => list.contains(a),
            (Some(_), None) => false,
        };

        same(&self.usage, &row.usage)
            && same(&self.gender, &row.gender)
            && listed(&self.dialects, row.dialect.as_ref())
            && listed(&self.phone_classes, Some(&row.phone_class))
    }
}

/// Keep `round(fraction * len)` rows chosen at random, in their original order
pub fn sample_fraction<R: Rng + ?Sized>(
    rows: Vec<DescriptionRow>,
    fraction: f64,
    rng: &mut R,
) -> Vec<DescriptionRow> {
    let amount = ((rows.len() as f64 * fraction).round() as usize).min(rows.len());
    let mut chosen = index::sample(rng, rows.len(), amount).into_vec();
    chosen.sort_unstable();

    let mut chosen = chosen.into_iter().peekable();
    rows.into_iter()
        .enumerate()
        .filter_map(|(i, row)| {
            if chosen.peek() == Some(&i) {
                chosen.next();
                Some(row)
            } else {
                None
            }
        })
        .collect()
}

pub(crate) fn check_fraction(name: &str, value: f64) -> DatasetResult<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(DatasetError::ConfigError(format!(
            "{} must be in (0, 1], got {}",
            name, value
        )))
    }
}
