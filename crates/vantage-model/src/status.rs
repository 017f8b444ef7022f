use serde::{Deserialize, Serialize};

use crate::{ModelError, Rate};

/// A single cut point: rates at or above `min_rate` earn `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBand {
    pub label: String,
    pub min_rate: f64,
}

impl StatusBand {
    pub fn new(label: impl Into<String>, min_rate: f64) -> Self {
        Self { label: label.into(), min_rate }
    }
}

/// Per-report status classification of a rate.
///
/// Bands are kept sorted by descending `min_rate`; anything below the
/// lowest band gets `fallback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct StatusThresholds {
    bands: Vec<StatusBand>,
    fallback: String,
}

#[derive(Deserialize)]
struct RawThresholds {
    bands: Vec<StatusBand>,
    fallback: String,
}

impl TryFrom<RawThresholds> for StatusThresholds {
    type Error = ModelError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.bands, raw.fallback)
    }
}

impl StatusThresholds {
    pub fn new(mut bands: Vec<StatusBand>, fallback: impl Into<String>) -> Result<Self, ModelError> {
        if let Some(bad) = bands.iter().find(|b| !b.min_rate.is_finite()) {
            return Err(ModelError::InvalidThresholds(format!(
                "cut point for '{}' is not a finite number",
                bad.label
            )));
        }
        bands.sort_by(|a, b| b.min_rate.total_cmp(&a.min_rate));
        if let Some(pair) = bands.windows(2).find(|w| w[0].min_rate == w[1].min_rate) {
            return Err(ModelError::InvalidThresholds(format!(
                "'{}' and '{}' share cut point {}",
                pair[0].label, pair[1].label, pair[0].min_rate
            )));
        }
        Ok(Self { bands, fallback: fallback.into() })
    }

    /// Classic three-way split used by most reconciliation reports.
    pub fn success_warning_error(success_at: f64, warning_at: f64) -> Result<Self, ModelError> {
        Self::new(
            vec![StatusBand::new("Success", success_at), StatusBand::new("Warning", warning_at)],
            "Error",
        )
    }

    pub fn bands(&self) -> &[StatusBand] {
        &self.bands
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Label for a percentage.
    pub fn label_for(&self, percent: f64) -> &str {
        self.bands
            .iter()
            .find(|b| percent >= b.min_rate)
            .map(|b| b.label.as_str())
            .unwrap_or(&self.fallback)
    }

    /// Label for a rate. N/A rates are unclassified.
    pub fn classify(&self, rate: &Rate) -> Option<&str> {
        rate.percent().map(|p| self.label_for(p))
    }

    /// Every label this classification can produce, best first.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bands
            .iter()
            .map(|b| b.label.as_str())
            .chain(std::iter::once(self.fallback.as_str()))
    }
}
