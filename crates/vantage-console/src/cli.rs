use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use vantage_model::DimensionFilter;
use vantage_reports::{ReportId, SessionEvent};

#[derive(Parser, Debug)]
#[command(name = "vantage", version, about = "Data-health report browser")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "TOML file with report overrides (default: <config dir>/vantage/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Log filter when RUST_LOG is unset (e.g. debug, vantage_reports=trace)")]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the built-in reports.
    List,
    /// Aggregated view of a report at a drill path.
    Show {
        report: ReportId,
        #[arg(long, value_delimiter = ',', help = "Selected keys, outermost first")]
        path: Vec<String>,
        #[arg(long = "filter", value_parser = parse_filter, help = "dimension=value, repeatable")]
        filters: Vec<DimensionFilter>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Apply session events in order, printing the view after each.
    Replay {
        report: ReportId,
        #[arg(required = true, help = "descend:<key> | ascend | reset | filter:<dim>=<value> | unfilter:<dim> | range:<from>..<to> | unrange")]
        events: Vec<SessionEvent>,
    },
    /// Rows of the reconciliation hierarchy tree.
    Tree {
        #[arg(long, help = "Node id to expand in addition to the top level, repeatable")]
        expand: Vec<String>,
        #[arg(long, default_value_t = false)]
        expand_all: bool,
    },
    /// KPI card of a trend window.
    Trend {
        #[arg(value_enum)]
        window: WindowArg,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Inventory forecast accuracy by month.
    Forecast,
    /// Summary cards of a report's top level.
    Summary {
        report: ReportId,
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<DimensionFilter>,
        #[arg(long, help = "Also count records per value of this dimension")]
        by: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WindowArg {
    Day,
    Week,
    Month,
    Custom,
}

fn parse_filter(raw: &str) -> Result<DimensionFilter, String> {
    match raw.split_once('=') {
        Some((dimension, value)) if !dimension.is_empty() => Ok(DimensionFilter::new(dimension, value)),
        _ => Err(format!("expected dimension=value, got '{raw}'")),
    }
}
