use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ModelError, Record};

/// Dropdown-style filter: keep records whose `dimension` equals `value`
/// exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionFilter {
    pub dimension: String,
    pub value: String,
}

impl DimensionFilter {
    pub fn new(dimension: impl Into<String>, value: impl Into<String>) -> Self {
        Self { dimension: dimension.into(), value: value.into() }
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.dimension(&self.dimension) == Some(self.value.as_str())
    }
}

/// Inclusive date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ModelError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ModelError> {
        if start > end {
            return Err(ModelError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Active dropdown filters plus an optional date window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    dimensions: Vec<DimensionFilter>,
    #[serde(default)]
    date_range: Option<DateRange>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter for a dimension, replacing any existing one.
    pub fn set(&mut self, filter: DimensionFilter) {
        match self.dimensions.iter_mut().find(|f| f.dimension == filter.dimension) {
            Some(existing) => *existing = filter,
            None => self.dimensions.push(filter),
        }
    }

    /// Remove the filter on `dimension`. Returns whether one was present.
    pub fn clear(&mut self, dimension: &str) -> bool {
        let before = self.dimensions.len();
        self.dimensions.retain(|f| f.dimension != dimension);
        self.dimensions.len() != before
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.date_range = Some(range);
    }

    pub fn clear_date_range(&mut self) -> bool {
        self.date_range.take().is_some()
    }

    pub fn dimensions(&self) -> &[DimensionFilter] {
        &self.dimensions
    }

    pub fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty() && self.date_range.is_none()
    }

    /// A record with no observation date never passes an active date range.
    pub fn matches(&self, record: &Record) -> bool {
        if !self.dimensions.iter().all(|f| f.matches(record)) {
            return false;
        }
        match (&self.date_range, record.observed_on) {
            (None, _) => true,
            (Some(range), Some(date)) => range.contains(date),
            (Some(_), None) => false,
        }
    }
}
