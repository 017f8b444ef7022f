//! Command handlers. Each one builds its data from the report crates and
//! renders it as text or JSON into `out`.

use std::io::Write;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::Serialize;
use vantage_aggregate::{count_by_dimension, forecast_accuracy, KpiSettings, TrendKpis, TrendPoint, TrendWindow};
use vantage_drill::{visible_rows, ExpansionSet};
use vantage_model::{DateRange, DimensionFilter, DrillPath, VarianceDirection, VariancePolicy};
use vantage_reports::{reconciliation_tree, series, Applied, ReportId, ReportSession, SessionEvent, SessionSnapshot};

use crate::cli::{Cli, Commands, WindowArg};
use crate::config::ConsoleConfig;
use crate::output;

/// Decimal places of forecast accuracy variances.
const FORECAST_PRECISION: u32 = 1;

/// Metrics shown next to each node of the reconciliation tree.
const TREE_FIELDS: [&str; 2] = ["record_count", "reconciled_count"];

#[derive(Serialize)]
struct ListItem {
    id: ReportId,
    title: &'static str,
    description: &'static str,
    levels: Vec<String>,
}

#[derive(Serialize)]
struct ReplayStep {
    event: String,
    outcome: String,
    view: SessionSnapshot,
}

#[derive(Serialize)]
struct TrendOut {
    window: String,
    points: Vec<TrendPoint>,
    kpis: Option<TrendKpis>,
}

#[derive(Serialize)]
struct SummaryOut<'a> {
    report: ReportId,
    summary: vantage_aggregate::ReportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    by: Option<DimensionCounts<'a>>,
}

#[derive(Serialize)]
struct DimensionCounts<'a> {
    dimension: &'a str,
    counts: Vec<(String, usize)>,
}

/// Run one parsed command.
pub fn execute(cli: &Cli, config: &ConsoleConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    match &cli.command {
        Commands::List => list(cli.json, config, out),
        Commands::Show { report, path, filters, from, to } => {
            let range = date_range(*from, *to)?;
            show(cli.json, config, *report, path, filters, range, out)
        }
        Commands::Replay { report, events } => replay(cli.json, config, *report, events, out),
        Commands::Tree { expand, expand_all } => tree(cli.json, expand, *expand_all, out),
        Commands::Trend { window, from, to } => {
            let range = date_range(*from, *to)?;
            trend(cli.json, *window, range, out)
        }
        Commands::Forecast => forecast(cli.json, out),
        Commands::Summary { report, filters, by } => summary(cli.json, config, *report, filters, by.as_deref(), out),
    }
}

fn date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> anyhow::Result<Option<DateRange>> {
    match (from, to) {
        (Some(start), Some(end)) => Ok(Some(DateRange::new(start, end)?)),
        (None, None) => Ok(None),
        _ => bail!("--from and --to must be given together"),
    }
}

fn list(json: bool, config: &ConsoleConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut items = Vec::new();
    for id in ReportId::ALL {
        let report = config.report(id)?;
        items.push(ListItem {
            id,
            title: report.title,
            description: report.description,
            levels: report.config.levels.iter().map(str::to_string).collect(),
        });
    }
    if json {
        return output::write_json(out, &items);
    }
    for item in &items {
        writeln!(out, "{}\t{}\t{}", item.id, item.title, item.levels.join(" → "))?;
    }
    Ok(())
}

fn open_session(
    config: &ConsoleConfig,
    id: ReportId,
    path: &[String],
    filters: &[DimensionFilter],
    range: Option<DateRange>,
) -> anyhow::Result<ReportSession> {
    let report = config.report(id)?;
    let path: DrillPath = path.iter().cloned().collect();
    let mut session = ReportSession::with_path(report, path.clone())
        .with_context(|| format!("cannot open {id} at '{path}'"))?;
    for filter in filters {
        session.apply(SessionEvent::SetFilter(filter.clone()));
    }
    if let Some(range) = range {
        session.apply(SessionEvent::SetDateRange(range));
    }
    tracing::debug!(report = %id, groups = session.view().len(), "session opened");
    Ok(session)
}

fn show(
    json: bool,
    config: &ConsoleConfig,
    id: ReportId,
    path: &[String],
    filters: &[DimensionFilter],
    range: Option<DateRange>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let session = open_session(config, id, path, filters, range)?;
    let snapshot = session.snapshot();
    if json {
        return output::write_json(out, &snapshot);
    }
    output::write_snapshot(out, &session.report().config, &snapshot)
}

fn outcome(applied: &Applied) -> String {
    match applied {
        Applied::Changed => "changed".to_string(),
        Applied::Unchanged => "unchanged".to_string(),
        Applied::Ignored(e) => format!("ignored: {e}"),
    }
}

fn replay(
    json: bool,
    config: &ConsoleConfig,
    id: ReportId,
    events: &[SessionEvent],
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut session = ReportSession::new(config.report(id)?);
    let mut steps = Vec::with_capacity(events.len());
    for event in events {
        let applied = session.apply(event.clone());
        steps.push(ReplayStep { event: event.to_string(), outcome: outcome(&applied), view: session.snapshot() });
    }
    if json {
        return output::write_json(out, &steps);
    }
    for step in &steps {
        writeln!(out, "> {} ({})", step.event, step.outcome)?;
        output::write_snapshot(out, &session.report().config, &step.view)?;
    }
    Ok(())
}

fn tree(json: bool, expand: &[String], expand_all: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    let roots = reconciliation_tree();
    // Top-level nodes start open; `--expand` opens further nodes on top.
    let expansion = if expand_all {
        ExpansionSet::all(&roots)
    } else {
        ExpansionSet::with_expanded(roots.iter().map(|r| r.id.as_str()).chain(expand.iter().map(String::as_str)))
    };
    let rows = visible_rows(&roots, &expansion);
    if json {
        return output::write_json(out, &rows);
    }
    writeln!(out, "node\t{}", TREE_FIELDS.join("\t"))?;
    for row in &rows {
        writeln!(out, "{}", output::tree_line(row, &TREE_FIELDS))?;
    }
    Ok(())
}

fn trend(json: bool, window: WindowArg, range: Option<DateRange>, out: &mut dyn Write) -> anyhow::Result<()> {
    let window = match (window, range) {
        (WindowArg::Custom, Some(range)) => TrendWindow::Custom(range),
        (WindowArg::Custom, None) => bail!("the custom window needs --from and --to"),
        (_, Some(_)) => bail!("--from/--to only apply to the custom window"),
        (WindowArg::Day, None) => TrendWindow::Day,
        (WindowArg::Week, None) => TrendWindow::Week,
        (WindowArg::Month, None) => TrendWindow::Month,
    };
    let points = series::window(window);
    let kpis = TrendKpis::compute(&points, &KpiSettings::default());
    if json {
        return output::write_json(out, TrendOut { window: window.to_string(), points, kpis });
    }
    match &kpis {
        Some(kpis) => output::write_kpis(out, &window.to_string(), kpis),
        None => {
            writeln!(out, "window: {window}")?;
            writeln!(out, "no data in window")?;
            Ok(())
        }
    }
}

fn forecast(json: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    let policy = VariancePolicy::new(VarianceDirection::HigherIsBetter, 0.0);
    let rows = forecast_accuracy(&series::inventory_forecast(), FORECAST_PRECISION, &policy);
    if json {
        return output::write_json(out, &rows);
    }
    writeln!(out, "month\tactual\tforecast\tvariance")?;
    for row in &rows {
        writeln!(out, "{}", output::forecast_line(row))?;
    }
    Ok(())
}

fn summary(
    json: bool,
    config: &ConsoleConfig,
    id: ReportId,
    filters: &[DimensionFilter],
    by: Option<&str>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let session = open_session(config, id, &[], filters, None)?;
    let by = by.map(|dimension| {
        let records: Vec<_> = session
            .report()
            .records
            .iter()
            .filter(|r| session.filters().matches(r))
            .cloned()
            .collect();
        DimensionCounts { dimension, counts: count_by_dimension(&records, dimension) }
    });
    let data = SummaryOut { report: id, summary: session.summary(), by };
    if json {
        return output::write_json(out, &data);
    }
    output::write_summary(out, &data.summary)?;
    if let Some(by) = &data.by {
        writeln!(out, "by {}:", by.dimension)?;
        for (value, count) in &by.counts {
            writeln!(out, "  {value}: {count}")?;
        }
    }
    Ok(())
}
