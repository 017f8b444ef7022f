//! Built-in reports of the data-health dashboard.
//!
//! Each report fixes its own hierarchy, summed fields, rounding, status cut
//! points and variance reading. The record sets are the dashboard's static
//! sample data.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vantage_drill::TreeNode;
use vantage_model::*;

use crate::ReportError;

/// Identifier of a built-in report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportId {
    DataReconciliation,
    ReconciliationHierarchy,
    RegionalVariance,
    EgressReconciliation,
    InventoryCoverage,
    PipelineHealth,
    DomainForecast,
}

impl ReportId {
    pub const ALL: [ReportId; 7] = [
        ReportId::DataReconciliation,
        ReportId::ReconciliationHierarchy,
        ReportId::RegionalVariance,
        ReportId::EgressReconciliation,
        ReportId::InventoryCoverage,
        ReportId::PipelineHealth,
        ReportId::DomainForecast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataReconciliation => "data-reconciliation",
            Self::ReconciliationHierarchy => "reconciliation-hierarchy",
            Self::RegionalVariance => "regional-variance",
            Self::EgressReconciliation => "egress-reconciliation",
            Self::InventoryCoverage => "inventory-coverage",
            Self::PipelineHealth => "pipeline-health",
            Self::DomainForecast => "domain-forecast",
        }
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportId {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ReportError::UnknownReport(s.to_string()))
    }
}

/// A report: configuration plus its static records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub id: ReportId,
    pub title: &'static str,
    pub description: &'static str,
    pub config: ReportConfig,
    pub records: Vec<Record>,
}

impl Report {
    pub fn builtin(id: ReportId) -> Result<Self, ReportError> {
        let report = match id {
            ReportId::DataReconciliation => data_reconciliation()?,
            ReportId::ReconciliationHierarchy => reconciliation_hierarchy()?,
            ReportId::RegionalVariance => regional_variance()?,
            ReportId::EgressReconciliation => egress_reconciliation()?,
            ReportId::InventoryCoverage => inventory_coverage()?,
            ReportId::PipelineHealth => pipeline_health()?,
            ReportId::DomainForecast => domain_forecast()?,
        };
        report.config.validate()?;
        Ok(report)
    }
}

/// Every built-in report, in dashboard order.
pub fn catalog() -> Result<Vec<Report>, ReportError> {
    ReportId::ALL.into_iter().map(Report::builtin).collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn data_reconciliation() -> Result<Report, ReportError> {
    let config = ReportConfig::new(
        HierarchyLevels::new(["source_system", "target_system"])?,
        ["record_count", "matched_records", "unmatched_records"],
    )
    .with_rate(RateSpec::new("matched_records", "record_count"))
    .with_precision(2)
    .with_thresholds(StatusThresholds::success_warning_error(99.7, 95.0)?);

    let run = |source: &str, target: &str, count: f64, matched: f64, day: NaiveDate| {
        Record::new()
            .with_dimension("source_system", source)
            .with_dimension("target_system", target)
            .with_metric("record_count", count)
            .with_metric("matched_records", matched)
            .with_metric("unmatched_records", count - matched)
            .observed_on(day)
    };
    let day = date(2024, 1, 15);

    Ok(Report {
        id: ReportId::DataReconciliation,
        title: "Data Reconciliation Status",
        description: "Record matching between source and target systems",
        config,
        records: vec![
            run("ERP System", "Data Warehouse", 15_420.0, 15_380.0, day),
            run("CRM System", "Analytics DB", 8_750.0, 8_720.0, day),
            run("Inventory System", "Reporting DB", 25_600.0, 25_600.0, day),
        ],
    })
}

fn reconciliation_hierarchy() -> Result<Report, ReportError> {
    let config = ReportConfig::new(
        HierarchyLevels::new(["region", "country"])?,
        ["record_count", "reconciled_count"],
    )
    .with_rate(RateSpec::new("reconciled_count", "record_count"))
    .with_precision(2)
    .with_thresholds(StatusThresholds::new(vec![StatusBand::new("Reconciled", 95.0)], "Attention")?);

    let leaf = |region: &str, country: &str, count: f64, reconciled: f64| {
        Record::new()
            .with_dimension("region", region)
            .with_dimension("country", country)
            .with_metric("record_count", count)
            .with_metric("reconciled_count", reconciled)
    };

    Ok(Report {
        id: ReportId::ReconciliationHierarchy,
        title: "Reconciliation Hierarchy Report",
        description: "Data reconciliation rolled up across regions and countries",
        config,
        records: vec![
            leaf("North America", "United States", 300_000.0, 299_000.0),
            leaf("North America", "Canada", 100_000.0, 99_000.0),
            leaf("Europe", "Germany", 150_000.0, 149_000.0),
            leaf("Europe", "France", 120_000.0, 119_000.0),
        ],
    })
}

/// The reconciliation hierarchy as reported, with per-node totals.
///
/// Region and global totals include systems not broken out by country, so
/// they exceed the sum of their children.
pub fn reconciliation_tree() -> Vec<TreeNode> {
    let node = |id: &str, name: &str, count: f64, reconciled: f64| {
        TreeNode::new(id, name)
            .with_metric("record_count", count)
            .with_metric("reconciled_count", reconciled)
    };
    vec![node("root", "Global Data", 1_000_000.0, 995_000.0).with_children(vec![
        node("region-1", "North America", 400_000.0, 398_000.0).with_children(vec![
            node("country-1", "United States", 300_000.0, 299_000.0),
            node("country-2", "Canada", 100_000.0, 99_000.0),
        ]),
        node("region-2", "Europe", 350_000.0, 347_000.0).with_children(vec![
            node("country-3", "Germany", 150_000.0, 149_000.0),
            node("country-4", "France", 120_000.0, 119_000.0),
        ]),
    ])]
}

fn regional_variance() -> Result<Report, ReportError> {
    let config = ReportConfig::new(
        HierarchyLevels::new(["region", "country"])?,
        ["current_day", "previous_day"],
    )
    .with_precision(2)
    .with_variance(VarianceSpec::new(
        "current_day",
        "previous_day",
        VarianceMode::Percent,
        VariancePolicy::new(VarianceDirection::HigherIsBetter, 5.0),
    ));

    let country = |region: &str, name: &str, current: f64, previous: f64| {
        Record::new()
            .with_dimension("region", region)
            .with_dimension("country", name)
            .with_metric("current_day", current)
            .with_metric("previous_day", previous)
    };

    Ok(Report {
        id: ReportId::RegionalVariance,
        title: "Regional Daily Variance Analysis",
        description: "Day-over-day volume change by region and country",
        config,
        records: vec![
            country("North America", "United States", 35_000.0, 33_000.0),
            country("North America", "Canada", 10_000.0, 9_000.0),
            country("Europe", "Germany", 18_000.0, 19_000.0),
            country("Europe", "France", 12_000.0, 13_000.0),
            country("Europe", "UK", 8_000.0, 8_000.0),
            country("Asia Pacific", "Japan", 15_000.0, 14_000.0),
            country("Asia Pacific", "Australia", 10_000.0, 9_500.0),
            country("Asia Pacific", "Singapore", 7_000.0, 6_500.0),
        ],
    })
}

fn egress_reconciliation() -> Result<Report, ReportError> {
    let config = ReportConfig::new(
        HierarchyLevels::new(["interface_type", "interface"])?,
        ["expected_records", "actual_records"],
    )
    .with_rate(RateSpec::new("actual_records", "expected_records"))
    .with_precision(2)
    .with_thresholds(StatusThresholds::success_warning_error(100.0, 99.82)?)
    .with_variance(VarianceSpec::new(
        "actual_records",
        "expected_records",
        VarianceMode::Absolute,
        VariancePolicy::new(VarianceDirection::ZeroIsBest, 10.0),
    ));

    let interface = |kind: &str, name: &str, source: &str, destination: &str, expected: f64, actual: f64| {
        Record::new()
            .with_dimension("interface_type", kind)
            .with_dimension("interface", name)
            .with_dimension("source", source)
            .with_dimension("destination", destination)
            .with_metric("expected_records", expected)
            .with_metric("actual_records", actual)
            .observed_on(date(2024, 1, 15))
    };

    Ok(Report {
        id: ReportId::EgressReconciliation,
        title: "Egress 09 Metric Reconciliation",
        description: "Expected vs delivered records per egress interface",
        config,
        records: vec![
            interface("API", "API-001", "Internal System A", "External Partner 1", 12_500.0, 12_480.0),
            interface("API", "API-002", "Internal System B", "External Partner 2", 8_900.0, 8_900.0),
            interface("API", "API-003", "Internal System C", "External Partner 3", 15_600.0, 15_580.0),
            interface("FTP", "FTP-001", "Data Warehouse", "Reporting System", 25_000.0, 24_950.0),
        ],
    })
}

fn inventory_coverage() -> Result<Report, ReportError> {
    let config = ReportConfig::new(
        HierarchyLevels::new(["region"])?,
        ["current_stock", "forecasted_demand", "recommended_stock"],
    )
    .with_rate(RateSpec::new("current_stock", "recommended_stock"))
    .with_precision(1)
    .with_thresholds(StatusThresholds::new(
        vec![
            StatusBand::new("Optimal", 95.0),
            StatusBand::new("Adequate", 90.0),
            StatusBand::new("Low", 80.0),
        ],
        "Critical",
    )?)
    .with_variance(VarianceSpec::new(
        "current_stock",
        "forecasted_demand",
        VarianceMode::Percent,
        VariancePolicy::new(VarianceDirection::HigherIsBetter, 0.0),
    ));

    let region = |name: &str, stock: f64, demand: f64, recommended: f64| {
        Record::new()
            .with_dimension("region", name)
            .with_metric("current_stock", stock)
            .with_metric("forecasted_demand", demand)
            .with_metric("recommended_stock", recommended)
    };

    Ok(Report {
        id: ReportId::InventoryCoverage,
        title: "Regional Inventory Analysis",
        description: "Current stock against recommended stock and forecast demand",
        config,
        records: vec![
            region("North America", 45_000.0, 42_000.0, 48_000.0),
            region("Europe", 32_000.0, 35_000.0, 38_000.0),
            region("Asia Pacific", 28_000.0, 26_000.0, 29_000.0),
            region("Latin America", 15_000.0, 18_000.0, 20_000.0),
        ],
    })
}

fn pipeline_health() -> Result<Report, ReportError> {
    let config = ReportConfig::new(
        HierarchyLevels::new(["pipeline"])?,
        ["records_processed", "records_succeeded", "errors"],
    )
    .with_rate(RateSpec::new("records_succeeded", "records_processed"))
    .with_precision(1)
    .with_thresholds(StatusThresholds::new(
        vec![StatusBand::new("Healthy", 99.0), StatusBand::new("Degraded", 95.0)],
        "Failing",
    )?);

    let run = |name: &str, state: &str, processed: f64, succeeded: f64, errors: f64| {
        Record::new()
            .with_dimension("pipeline", name)
            .with_dimension("state", state)
            .with_metric("records_processed", processed)
            .with_metric("records_succeeded", succeeded)
            .with_metric("errors", errors)
            .observed_on(date(2024, 1, 15))
    };

    Ok(Report {
        id: ReportId::PipelineHealth,
        title: "Pipeline Status Monitor",
        description: "Run state and success rate of every data pipeline",
        config,
        records: vec![
            run("Customer Data Pipeline", "Running", 150_000.0, 149_700.0, 2.0),
            run("Sales Analytics Pipeline", "Running", 85_000.0, 85_000.0, 0.0),
            run("Inventory Sync Pipeline", "Failed", 25_000.0, 21_300.0, 15.0),
            run("Financial Reporting Pipeline", "Warning", 200_000.0, 191_000.0, 8.0),
        ],
    })
}

fn domain_forecast() -> Result<Report, ReportError> {
    let config = ReportConfig::new(
        HierarchyLevels::new(["forecast"])?,
        ["forecast_value", "actual_value"],
    )
    .with_precision(1)
    .with_variance(VarianceSpec::new(
        "actual_value",
        "forecast_value",
        VarianceMode::Percent,
        VariancePolicy::new(VarianceDirection::HigherIsBetter, 5.0),
    ));

    let line = |name: &str, metric: &str, forecast: f64, actual: f64| {
        Record::new()
            .with_dimension("forecast", name)
            .with_dimension("metric", metric)
            .with_metric("forecast_value", forecast)
            .with_metric("actual_value", actual)
    };

    Ok(Report {
        id: ReportId::DomainForecast,
        title: "Forecast vs Actual Performance",
        description: "Forecast accuracy of the business domain metrics",
        config,
        records: vec![
            line("Sales Forecast Q1", "Revenue", 1_000_000.0, 950_000.0),
            line("Customer Growth Q1", "New Customers", 5_000.0, 5_200.0),
            line("Product Usage Q1", "Active Users", 25_000.0, 23_500.0),
        ],
    })
}
