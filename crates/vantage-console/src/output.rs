//! Text and JSON rendering.

use std::io::Write;

use serde::Serialize;
use vantage_aggregate::{ForecastAccuracy, ReportSummary, TrendKpis};
use vantage_drill::TreeRow;
use vantage_model::{Group, ReportConfig, Variance, VarianceMode};
use vantage_reports::SessionSnapshot;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

pub fn write_json<T: Serialize>(out: &mut dyn Write, data: T) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(&JsonOut { ok: true, data })?)?;
    Ok(())
}

/// Whole numbers print without decimals.
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

fn variance(value: &Variance, mode: VarianceMode) -> String {
    let Some(v) = value.value else {
        return vantage_model::NOT_AVAILABLE_LABEL.to_string();
    };
    let sign = if v > 0.0 { "+" } else { "" };
    let unit = match mode {
        VarianceMode::Percent => "%",
        VarianceMode::Absolute => "",
    };
    match value.tone {
        Some(tone) => format!("{sign}{}{unit} ({tone})", number(v)),
        None => format!("{sign}{}{unit}", number(v)),
    }
}

pub fn group_header(config: &ReportConfig, level_name: &str) -> String {
    let mut cols = vec![level_name.to_string(), "members".to_string()];
    cols.extend(config.tracked.iter().cloned());
    if config.rate.is_some() {
        cols.push("rate".into());
    }
    if config.thresholds.is_some() {
        cols.push("status".into());
    }
    if config.variance.is_some() {
        cols.push("variance".into());
    }
    cols.join("\t")
}

pub fn group_line(config: &ReportConfig, group: &Group) -> String {
    let mut cols = vec![group.key.clone(), group.member_count.to_string()];
    cols.extend(config.tracked.iter().map(|f| number(group.sum(f))));
    if config.rate.is_some() {
        cols.push(group.rate.map(|r| r.to_string()).unwrap_or_default());
    }
    if config.thresholds.is_some() {
        cols.push(group.status.clone().unwrap_or_else(|| "-".into()));
    }
    if let Some(spec) = &config.variance {
        cols.push(group.variance.map(|v| variance(&v, spec.mode)).unwrap_or_default());
    }
    cols.join("\t")
}

/// Breadcrumbs, active filters, then the group table.
pub fn write_snapshot(out: &mut dyn Write, config: &ReportConfig, snapshot: &SessionSnapshot) -> anyhow::Result<()> {
    let trail: Vec<String> = snapshot
        .breadcrumbs
        .iter()
        .map(|b| format!("{}: {}", b.level, b.key))
        .collect();
    if trail.is_empty() {
        writeln!(out, "{} (top level)", snapshot.title)?;
    } else {
        writeln!(out, "{} › {}", snapshot.title, trail.join(vantage_model::BREADCRUMB_SEPARATOR))?;
    }
    for filter in snapshot.filters.dimensions() {
        writeln!(out, "filter {}={}", filter.dimension, filter.value)?;
    }
    if let Some(range) = snapshot.filters.date_range() {
        writeln!(out, "range {range}")?;
    }
    if snapshot.groups.is_empty() {
        writeln!(out, "no data")?;
        return Ok(());
    }
    writeln!(out, "{}", group_header(config, &snapshot.level_name))?;
    for group in &snapshot.groups {
        writeln!(out, "{}", group_line(config, group))?;
    }
    Ok(())
}

pub fn write_summary(out: &mut dyn Write, summary: &ReportSummary) -> anyhow::Result<()> {
    writeln!(out, "groups: {}", summary.group_count)?;
    writeln!(out, "records: {}", summary.member_count)?;
    for (field, total) in &summary.totals {
        writeln!(out, "total {field}: {}", number(*total))?;
    }
    if let Some(rate) = summary.overall_rate {
        writeln!(out, "overall rate: {rate}")?;
    }
    if let Some(mean) = summary.mean_rate {
        writeln!(out, "mean rate: {}%", number(mean))?;
    }
    for status in &summary.statuses.counts {
        writeln!(out, "{}: {}", status.label, status.count)?;
    }
    if summary.statuses.unclassified > 0 {
        writeln!(out, "unclassified: {}", summary.statuses.unclassified)?;
    }
    if let Some(total) = summary.total_abs_variance {
        writeln!(out, "total |variance|: {}", number(total))?;
    }
    Ok(())
}

pub fn tree_line(row: &TreeRow<'_>, fields: &[&str]) -> String {
    let marker = match (row.has_children, row.expanded) {
        (false, _) => " ",
        (true, false) => "▸",
        (true, true) => "▾",
    };
    let metrics: Vec<String> = fields
        .iter()
        .map(|f| number(row.metrics.get(*f).copied().unwrap_or(0.0)))
        .collect();
    format!("{}{marker} {} [{}]\t{}", "  ".repeat(row.depth), row.name, row.id, metrics.join("\t"))
}

pub fn write_kpis(out: &mut dyn Write, window: &str, kpis: &TrendKpis) -> anyhow::Result<()> {
    writeln!(out, "window: {window}")?;
    writeln!(out, "total current: {}", number(kpis.total_current))?;
    writeln!(out, "total previous: {}", number(kpis.total_previous))?;
    writeln!(out, "total target: {}", number(kpis.total_target))?;
    match kpis.variance_tone {
        Some(tone) => writeln!(out, "variance: {} ({tone})", kpis.variance)?,
        None => writeln!(out, "variance: {}", kpis.variance)?,
    }
    writeln!(out, "target achievement: {}", kpis.target_achievement)?;
    writeln!(out, "average: {}", number(kpis.average))?;
    writeln!(out, "peak: {}", number(kpis.peak))?;
    writeln!(out, "minimum: {}", number(kpis.minimum))?;
    Ok(())
}

pub fn forecast_line(row: &ForecastAccuracy) -> String {
    let variance = match (row.variance, row.tone) {
        (Some(v), tone) => {
            let sign = if v > 0.0 { "+" } else { "" };
            match tone {
                Some(tone) => format!("{sign}{}% ({tone})", number(v)),
                None => format!("{sign}{}%", number(v)),
            }
        }
        (None, _) => vantage_model::NOT_AVAILABLE_LABEL.to_string(),
    };
    format!("{}\t{}\t{}\t{variance}", row.label, number(row.actual), number(row.forecast))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_model::VarianceTone;

    #[test]
    fn test_whole_numbers_drop_decimals() {
        assert_eq!(number(15420.0), "15420");
        assert_eq!(number(99.74), "99.74");
        assert_eq!(number(-5.0), "-5");
    }

    #[test]
    fn test_variance_rendering() {
        let favorable = Variance { value: Some(7.14), tone: Some(VarianceTone::Favorable) };
        assert_eq!(variance(&favorable, VarianceMode::Percent), "+7.14% (favorable)");

        let absolute = Variance { value: Some(-40.0), tone: Some(VarianceTone::Unfavorable) };
        assert_eq!(variance(&absolute, VarianceMode::Absolute), "-40 (unfavorable)");

        assert_eq!(variance(&Variance::undefined(), VarianceMode::Percent), "N/A");
    }
}
