use serde::{Deserialize, Serialize};

use crate::{round_to, ModelError, PERCENT_SCALE};

/// Which way a variance is good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VarianceDirection {
    /// Growth is good (volumes, forecasts beaten).
    HigherIsBetter,
    /// Shrinkage is good (error counts, latency).
    LowerIsBetter,
    /// Any deviation is bad (reconciliation gaps).
    ZeroIsBest,
}

/// Traffic-light reading of a variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VarianceTone {
    Favorable,
    Neutral,
    Unfavorable,
}

impl std::fmt::Display for VarianceTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Favorable => "favorable",
            Self::Neutral => "neutral",
            Self::Unfavorable => "unfavorable",
        };
        write!(f, "{s}")
    }
}

/// Direction plus the width of the neutral band around zero.
///
/// `tolerance` is always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVariancePolicy")]
pub struct VariancePolicy {
    pub direction: VarianceDirection,
    pub tolerance: f64,
}

#[derive(Deserialize)]
struct RawVariancePolicy {
    direction: VarianceDirection,
    #[serde(default)]
    tolerance: f64,
}

impl TryFrom<RawVariancePolicy> for VariancePolicy {
    type Error = ModelError;

    fn try_from(raw: RawVariancePolicy) -> Result<Self, Self::Error> {
        if !raw.tolerance.is_finite() {
            return Err(ModelError::Config(format!("variance tolerance {} is not finite", raw.tolerance)));
        }
        Ok(Self::new(raw.direction, raw.tolerance))
    }
}

impl VariancePolicy {
    pub fn new(direction: VarianceDirection, tolerance: f64) -> Self {
        Self { direction, tolerance: tolerance.abs() }
    }

    pub fn tone(&self, variance: f64) -> VarianceTone {
        let tol = self.tolerance;
        match self.direction {
            VarianceDirection::HigherIsBetter => {
                if variance > tol {
                    VarianceTone::Favorable
                } else if variance < -tol {
                    VarianceTone::Unfavorable
                } else {
                    VarianceTone::Neutral
                }
            }
            VarianceDirection::LowerIsBetter => {
                if variance < -tol {
                    VarianceTone::Favorable
                } else if variance > tol {
                    VarianceTone::Unfavorable
                } else {
                    VarianceTone::Neutral
                }
            }
            VarianceDirection::ZeroIsBest => {
                if variance == 0.0 {
                    VarianceTone::Favorable
                } else if variance.abs() < tol {
                    VarianceTone::Neutral
                } else {
                    VarianceTone::Unfavorable
                }
            }
        }
    }
}

/// How the raw difference is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VarianceMode {
    /// `(current - reference) / reference * 100`
    #[default]
    Percent,
    /// `current - reference`
    Absolute,
}

/// A derived variance and its reading. `value` is `None` when a percent
/// variance has a zero reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Variance {
    pub value: Option<f64>,
    pub tone: Option<VarianceTone>,
}

impl Variance {
    pub fn undefined() -> Self {
        Self { value: None, tone: None }
    }

    pub fn evaluate(current: f64, reference: f64, mode: VarianceMode, precision: u32, policy: &VariancePolicy) -> Self {
        let value = match mode {
            VarianceMode::Percent => variance_pct(current, reference, precision),
            VarianceMode::Absolute => Some(round_to(current - reference, precision)),
        };
        Self { value, tone: value.map(|v| policy.tone(v)) }
    }
}

/// Percentage change from `reference` to `current`, rounded.
/// Undefined when `reference` is zero.
pub fn variance_pct(current: f64, reference: f64, precision: u32) -> Option<f64> {
    if reference == 0.0 {
        return None;
    }
    let pct = (current - reference) / reference * PERCENT_SCALE;
    pct.is_finite().then(|| round_to(pct, precision))
}
