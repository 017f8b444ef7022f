//! Period-over-period KPIs and forecast accuracy.

use serde::{Deserialize, Serialize};
use vantage_model::{
    compute_rate, round_to, variance_pct, DateRange, Rate, UndefinedRatePolicy, VariancePolicy,
    VarianceTone,
};

/// One period of a trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: String,
    pub current: f64,
    pub previous: f64,
    pub target: f64,
}

impl TrendPoint {
    pub fn new(period: impl Into<String>, current: f64, previous: f64, target: f64) -> Self {
        Self { period: period.into(), current, previous, target }
    }
}

/// Comparison window of a trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendWindow {
    /// Hourly buckets, current vs previous day.
    Day,
    /// Weekly buckets, current vs previous month.
    Week,
    /// Monthly buckets, current vs previous year.
    Month,
    /// Caller-selected dates.
    Custom(DateRange),
}

impl std::fmt::Display for TrendWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Custom(range) => write!(f, "custom {range}"),
        }
    }
}

/// Key performance indicators of a trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendKpis {
    pub total_current: f64,
    pub total_previous: f64,
    pub total_target: f64,
    /// Change of the current total against the previous total.
    pub variance: Rate,
    pub variance_tone: Option<VarianceTone>,
    /// Current total as a percentage of the target total.
    pub target_achievement: Rate,
    pub average: f64,
    pub peak: f64,
    pub minimum: f64,
}

/// Rounding and zero-denominator handling for [`TrendKpis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSettings {
    /// Decimal places of the variance and the average.
    pub variance_precision: u32,
    /// Decimal places of the target achievement.
    pub achievement_precision: u32,
    pub undefined_rate: UndefinedRatePolicy,
}

impl Default for KpiSettings {
    fn default() -> Self {
        Self {
            variance_precision: 2,
            achievement_precision: 1,
            undefined_rate: UndefinedRatePolicy::NotAvailable,
        }
    }
}

impl TrendKpis {
    /// `None` for an empty series.
    pub fn compute(points: &[TrendPoint], settings: &KpiSettings) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let total_current: f64 = points.iter().map(|p| p.current).sum();
        let total_previous: f64 = points.iter().map(|p| p.previous).sum();
        let total_target: f64 = points.iter().map(|p| p.target).sum();

        let variance = match variance_pct(total_current, total_previous, settings.variance_precision) {
            Some(v) => Rate::Percent(v),
            None => compute_rate(0.0, 0.0, settings.variance_precision, settings.undefined_rate),
        };
        // Flat periods count as on track.
        let variance_tone = variance.percent().map(|v| {
            if v >= 0.0 {
                VarianceTone::Favorable
            } else {
                VarianceTone::Unfavorable
            }
        });

        let peak = points.iter().map(|p| p.current).fold(f64::NEG_INFINITY, f64::max);
        let minimum = points.iter().map(|p| p.current).fold(f64::INFINITY, f64::min);

        Some(Self {
            total_current,
            total_previous,
            total_target,
            variance,
            variance_tone,
            target_achievement: compute_rate(
                total_current,
                total_target,
                settings.achievement_precision,
                settings.undefined_rate,
            ),
            average: round_to(total_current / points.len() as f64, settings.variance_precision),
            peak,
            minimum,
        })
    }

    pub fn target_met(&self) -> bool {
        self.target_achievement.percent().is_some_and(|p| p >= 100.0)
    }
}

/// Actual vs forecast for one period or one forecast line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub label: String,
    pub actual: f64,
    pub forecast: f64,
}

impl ForecastRow {
    pub fn new(label: impl Into<String>, actual: f64, forecast: f64) -> Self {
        Self { label: label.into(), actual, forecast }
    }
}

/// Accuracy reading of one forecast row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastAccuracy {
    pub label: String,
    pub actual: f64,
    pub forecast: f64,
    /// `(actual - forecast) / forecast * 100`; `None` for a zero forecast.
    pub variance: Option<f64>,
    pub tone: Option<VarianceTone>,
}

/// Per-row percent variance of actuals against forecast.
pub fn forecast_accuracy(rows: &[ForecastRow], precision: u32, policy: &VariancePolicy) -> Vec<ForecastAccuracy> {
    rows.iter()
        .map(|row| {
            let variance = variance_pct(row.actual, row.forecast, precision);
            ForecastAccuracy {
                label: row.label.clone(),
                actual: row.actual,
                forecast: row.forecast,
                variance,
                tone: variance.map(|v| policy.tone(v)),
            }
        })
        .collect()
}
