//! Group-by over the records selected by a drill path.
//!
//! 1. keep records whose ancestor dimensions equal the drill path and that
//!    pass the active filters
//! 2. partition by the value at the active level, in order of first appearance;
//!    records with no value there land in the `(unassigned)` group
//! 3. sum the tracked fields per partition
//! 4. derive rate, status and variance from the sums

use std::collections::HashMap;

use vantage_model::{
    compute_rate, DrillPath, FilterSet, Group, Record, ReportConfig, Variance, UNASSIGNED_GROUP_KEY,
};

/// True when `record` sits under `path` (exact, case-sensitive match on every
/// ancestor level) and passes `filters`.
fn selected(record: &Record, config: &ReportConfig, path: &DrillPath, filters: &FilterSet) -> bool {
    let on_path = config
        .levels
        .iter()
        .zip(path.iter())
        .all(|(level, key)| record.dimension(level) == Some(key));
    on_path && filters.matches(record)
}

/// Derive rate, status and variance for a group whose sums are complete.
fn finish(group: &mut Group, config: &ReportConfig) {
    if let Some(spec) = &config.rate {
        let rate = compute_rate(
            group.sum(&spec.numerator),
            group.sum(&spec.denominator),
            config.precision,
            config.undefined_rate,
        );
        group.status = config
            .thresholds
            .as_ref()
            .and_then(|t| t.classify(&rate))
            .map(str::to_string);
        group.rate = Some(rate);
    }
    if let Some(spec) = &config.variance {
        group.variance = Some(Variance::evaluate(
            group.sum(&spec.current),
            group.sum(&spec.reference),
            spec.mode,
            config.precision,
            &spec.policy,
        ));
    }
}

/// Groups to display for `records` at the level selected by `path`.
///
/// Never fails: an empty record set, a filter combination matching nothing,
/// or a path naming a key that no longer exists all yield an empty list.
/// A path deeper than the hierarchy allows also yields an empty list.
pub fn aggregate(records: &[Record], config: &ReportConfig, path: &DrillPath, filters: &FilterSet) -> Vec<Group> {
    let Some(level) = config.levels.name(path.len()) else {
        tracing::debug!(depth = path.len(), levels = config.levels.len(), "drill path deeper than hierarchy");
        return Vec::new();
    };

    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut matched = 0usize;

    for record in records.iter().filter(|r| selected(r, config, path, filters)) {
        matched += 1;
        let key = record.dimension(level).unwrap_or_else(|| {
            tracing::trace!(active_level = level, "record has no value at active level, unassigned");
            UNASSIGNED_GROUP_KEY
        });
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Group::new(key));
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.member_count += 1;
        for field in &config.tracked {
            *group.sums.entry(field.clone()).or_insert(0.0) += record.metric(field);
        }
    }

    if matched == 0 && !path.is_empty() {
        tracing::debug!(path = %path, "no records under drill path");
    }

    for group in &mut groups {
        finish(group, config);
    }
    groups
}

/// A report configuration bound for repeated aggregation.
#[derive(Debug, Clone)]
pub struct Aggregator {
    config: ReportConfig,
}

impl Aggregator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn aggregate(&self, records: &[Record], path: &DrillPath, filters: &FilterSet) -> Vec<Group> {
        aggregate(records, &self.config, path, filters)
    }

    /// Groups at the root with no filters.
    pub fn top_level(&self, records: &[Record]) -> Vec<Group> {
        self.aggregate(records, &DrillPath::root(), &FilterSet::new())
    }
}
