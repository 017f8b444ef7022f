use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Rate, Variance};

/// Aggregate of the records sharing one key at the current drill level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub key: String,
    /// Number of contributing records.
    pub member_count: usize,
    /// Summed tracked fields.
    pub sums: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<Variance>,
}

impl Group {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            member_count: 0,
            sums: BTreeMap::new(),
            rate: None,
            status: None,
            variance: None,
        }
    }

    /// Summed value of a tracked field; untracked fields read as zero.
    pub fn sum(&self, field: &str) -> f64 {
        self.sums.get(field).copied().unwrap_or(0.0)
    }
}
