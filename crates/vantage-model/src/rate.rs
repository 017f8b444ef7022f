use serde::{Deserialize, Serialize};

use crate::{MAX_RATE_PRECISION, NOT_AVAILABLE_LABEL, PERCENT_SCALE};

/// How a rate with a zero denominator is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UndefinedRatePolicy {
    /// Report 0%.
    Zero,
    /// Report 100% (nothing expected, nothing missing).
    Full,
    /// Report "N/A".
    #[default]
    NotAvailable,
}

/// A derived percentage, or the N/A sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "value")]
pub enum Rate {
    Percent(f64),
    NotAvailable,
}

impl Rate {
    pub fn percent(&self) -> Option<f64> {
        match self {
            Rate::Percent(p) => Some(*p),
            Rate::NotAvailable => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Rate::Percent(_))
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rate::Percent(p) => write!(f, "{p}%"),
            Rate::NotAvailable => write!(f, "{NOT_AVAILABLE_LABEL}"),
        }
    }
}

/// Round half away from zero to `precision` decimal places.
///
/// `precision` is capped at [`MAX_RATE_PRECISION`].
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision.min(MAX_RATE_PRECISION) as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

/// `numerator / denominator * 100`, rounded to `precision` places.
///
/// A zero denominator resolves through `policy`; a non-finite quotient
/// (infinite inputs) is treated the same way so NaN never escapes.
pub fn compute_rate(numerator: f64, denominator: f64, precision: u32, policy: UndefinedRatePolicy) -> Rate {
    let undefined = || match policy {
        UndefinedRatePolicy::Zero => Rate::Percent(0.0),
        UndefinedRatePolicy::Full => Rate::Percent(PERCENT_SCALE),
        UndefinedRatePolicy::NotAvailable => Rate::NotAvailable,
    };
    if denominator == 0.0 {
        return undefined();
    }
    let pct = numerator / denominator * PERCENT_SCALE;
    if !pct.is_finite() {
        return undefined();
    }
    Rate::Percent(round_to(pct, precision))
}
