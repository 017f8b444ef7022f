//! Report-wide summary cards computed from a group list.

use std::collections::BTreeMap;

use serde::Serialize;
use vantage_model::{compute_rate, round_to, Group, Rate, Record, ReportConfig, StatusThresholds};

/// Number of groups carrying one status label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub label: String,
    pub count: usize,
}

/// Per-label counts plus the groups that could not be classified
/// (N/A rate or no thresholds).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub counts: Vec<StatusCount>,
    pub unclassified: usize,
}

impl StatusSummary {
    pub fn count(&self, label: &str) -> usize {
        self.counts.iter().find(|c| c.label == label).map(|c| c.count).unwrap_or(0)
    }
}

/// Count groups per status.
///
/// With thresholds, every label they can produce is listed best first, zero
/// counts included. Without, labels appear in order of first occurrence.
pub fn status_counts(groups: &[Group], thresholds: Option<&StatusThresholds>) -> StatusSummary {
    let mut summary = StatusSummary::default();
    if let Some(t) = thresholds {
        summary.counts = t.labels().map(|label| StatusCount { label: label.to_string(), count: 0 }).collect();
    }
    for group in groups {
        let Some(label) = group.status.as_deref() else {
            summary.unclassified += 1;
            continue;
        };
        match summary.counts.iter_mut().find(|c| c.label == label) {
            Some(c) => c.count += 1,
            None => summary.counts.push(StatusCount { label: label.to_string(), count: 1 }),
        }
    }
    summary
}

/// Count records per value of `dimension`, in order of first appearance.
/// Records without the dimension are not counted.
pub fn count_by_dimension(records: &[Record], dimension: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in records.iter().filter_map(|r| r.dimension(dimension)) {
        match counts.iter_mut().find(|(v, _)| v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    counts
}

/// Sum of one tracked field across groups.
pub fn totals(groups: &[Group], field: &str) -> f64 {
    groups.iter().map(|g| g.sum(field)).sum()
}

/// Rate over the whole group list, computed from the summed rate fields
/// (weighted by volume). `None` when the report has no rate.
pub fn overall_rate(groups: &[Group], config: &ReportConfig) -> Option<Rate> {
    let spec = config.rate.as_ref()?;
    Some(compute_rate(
        totals(groups, &spec.numerator),
        totals(groups, &spec.denominator),
        config.precision,
        config.undefined_rate,
    ))
}

/// Unweighted mean of the defined group rates. `None` when no group has one.
pub fn mean_rate(groups: &[Group], precision: u32) -> Option<f64> {
    let defined: Vec<f64> = groups.iter().filter_map(|g| g.rate.and_then(|r| r.percent())).collect();
    if defined.is_empty() {
        return None;
    }
    Some(round_to(defined.iter().sum::<f64>() / defined.len() as f64, precision))
}

/// Sum of absolute variances over groups with a defined variance.
pub fn total_abs_variance(groups: &[Group]) -> f64 {
    groups
        .iter()
        .filter_map(|g| g.variance.and_then(|v| v.value))
        .map(f64::abs)
        .sum()
}

/// Everything the summary cards of a report show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub group_count: usize,
    pub member_count: usize,
    pub totals: BTreeMap<String, f64>,
    pub overall_rate: Option<Rate>,
    pub mean_rate: Option<f64>,
    pub statuses: StatusSummary,
    pub total_abs_variance: Option<f64>,
}

impl ReportSummary {
    pub fn compute(groups: &[Group], config: &ReportConfig) -> Self {
        Self {
            group_count: groups.len(),
            member_count: groups.iter().map(|g| g.member_count).sum(),
            totals: config.tracked.iter().map(|f| (f.clone(), totals(groups, f))).collect(),
            overall_rate: overall_rate(groups, config),
            mean_rate: config.rate.as_ref().and_then(|_| mean_rate(groups, config.precision)),
            statuses: status_counts(groups, config.thresholds.as_ref()),
            total_abs_variance: config
                .variance
                .as_ref()
                .map(|_| round_to(total_abs_variance(groups), config.precision)),
        }
    }
}
