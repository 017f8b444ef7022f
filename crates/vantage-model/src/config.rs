//! Per-report configuration.
//!
//! Everything that used to be hardcoded per report component (levels,
//! summed fields, rate fields, rounding, status cut points, variance
//! colouring) is a parameter here.

use serde::{Deserialize, Serialize};

use crate::{
    HierarchyLevels, ModelError, StatusThresholds, UndefinedRatePolicy, VarianceMode,
    VariancePolicy, DEFAULT_RATE_PRECISION, MAX_RATE_PRECISION,
};

/// Fields a rate is derived from: `numerator / denominator * 100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSpec {
    pub numerator: String,
    pub denominator: String,
}

impl RateSpec {
    pub fn new(numerator: impl Into<String>, denominator: impl Into<String>) -> Self {
        Self { numerator: numerator.into(), denominator: denominator.into() }
    }
}

/// Fields a variance is derived from, and how to read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceSpec {
    pub current: String,
    pub reference: String,
    #[serde(default)]
    pub mode: VarianceMode,
    pub policy: VariancePolicy,
}

impl VarianceSpec {
    pub fn new(
        current: impl Into<String>,
        reference: impl Into<String>,
        mode: VarianceMode,
        policy: VariancePolicy,
    ) -> Self {
        Self { current: current.into(), reference: reference.into(), mode, policy }
    }
}

fn default_precision() -> u32 {
    DEFAULT_RATE_PRECISION
}

/// Full configuration of one drill-down report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub levels: HierarchyLevels,
    /// Numeric fields summed into every group.
    pub tracked: Vec<String>,
    #[serde(default)]
    pub rate: Option<RateSpec>,
    #[serde(default = "default_precision")]
    pub precision: u32,
    #[serde(default)]
    pub undefined_rate: UndefinedRatePolicy,
    #[serde(default)]
    pub thresholds: Option<StatusThresholds>,
    #[serde(default)]
    pub variance: Option<VarianceSpec>,
}

impl ReportConfig {
    pub fn new<I, S>(levels: HierarchyLevels, tracked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            levels,
            tracked: tracked.into_iter().map(Into::into).collect(),
            rate: None,
            precision: DEFAULT_RATE_PRECISION,
            undefined_rate: UndefinedRatePolicy::default(),
            thresholds: None,
            variance: None,
        }
    }

    pub fn with_rate(mut self, rate: RateSpec) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_undefined_rate(mut self, policy: UndefinedRatePolicy) -> Self {
        self.undefined_rate = policy;
        self
    }

    pub fn with_thresholds(mut self, thresholds: StatusThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn with_variance(mut self, variance: VarianceSpec) -> Self {
        self.variance = Some(variance);
        self
    }

    pub fn is_tracked(&self, field: &str) -> bool {
        self.tracked.iter().any(|t| t == field)
    }

    /// Check precision bounds and that every derived value reads tracked fields.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.precision > MAX_RATE_PRECISION {
            return Err(ModelError::InvalidPrecision { got: self.precision, max: MAX_RATE_PRECISION });
        }
        if let Some(rate) = &self.rate {
            for field in [&rate.numerator, &rate.denominator] {
                if !self.is_tracked(field) {
                    return Err(ModelError::UntrackedField { field: field.clone(), used_by: "rate" });
                }
            }
        }
        if let Some(variance) = &self.variance {
            for field in [&variance.current, &variance.reference] {
                if !self.is_tracked(field) {
                    return Err(ModelError::UntrackedField { field: field.clone(), used_by: "variance" });
                }
            }
        }
        if self.thresholds.is_some() && self.rate.is_none() {
            return Err(ModelError::Config("status thresholds require a rate".into()));
        }
        Ok(())
    }

    /// Layer user overrides on top of the built-in configuration.
    pub fn apply_overrides(&mut self, overrides: &ReportOverrides) -> Result<(), ModelError> {
        let mut next = self.clone();
        if let Some(precision) = overrides.precision {
            next.precision = precision;
        }
        if let Some(policy) = overrides.undefined_rate {
            next.undefined_rate = policy;
        }
        if let Some(thresholds) = &overrides.thresholds {
            next.thresholds = Some(thresholds.clone());
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// User-adjustable subset of a report's configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportOverrides {
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub undefined_rate: Option<UndefinedRatePolicy>,
    #[serde(default)]
    pub thresholds: Option<StatusThresholds>,
}
