use vantage_aggregate::{count_by_dimension, ReportSummary};
use vantage_drill::leaf_records;
use vantage_model::{DrillPath, FilterSet, Group, Rate, VarianceTone};
use vantage_reports::*;

fn top_level(id: ReportId) -> Vec<Group> {
    let report = Report::builtin(id).unwrap();
    vantage_aggregate::aggregate(&report.records, &report.config, &DrillPath::root(), &FilterSet::new())
}

fn group<'a>(groups: &'a [Group], key: &str) -> &'a Group {
    groups.iter().find(|g| g.key == key).unwrap()
}

#[test]
fn test_every_report_id_round_trips_through_text() {
    for id in ReportId::ALL {
        assert_eq!(id.to_string().parse::<ReportId>().unwrap(), id);
    }
    assert!(matches!(
        "no-such-report".parse::<ReportId>(),
        Err(ReportError::UnknownReport(name)) if name == "no-such-report"
    ));
}

#[test]
fn test_catalog_builds_and_validates_every_report() {
    let reports = catalog().unwrap();
    assert_eq!(reports.len(), ReportId::ALL.len());
    for report in &reports {
        assert!(report.config.validate().is_ok(), "{} failed validation", report.id);
        assert!(!report.records.is_empty());
    }
}

#[test]
fn test_data_reconciliation_rates_and_statuses() {
    let groups = top_level(ReportId::DataReconciliation);
    let erp = group(&groups, "ERP System");
    assert_eq!(erp.rate, Some(Rate::Percent(99.74)));
    assert_eq!(erp.status.as_deref(), Some("Success"));

    let crm = group(&groups, "CRM System");
    assert_eq!(crm.rate, Some(Rate::Percent(99.66)));
    assert_eq!(crm.status.as_deref(), Some("Warning"));

    let inventory = group(&groups, "Inventory System");
    assert_eq!(inventory.rate, Some(Rate::Percent(100.0)));
    assert_eq!(inventory.sum("unmatched_records"), 0.0);
}

#[test]
fn test_regional_variance_by_region() {
    let groups = top_level(ReportId::RegionalVariance);
    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["North America", "Europe", "Asia Pacific"]);

    let na = group(&groups, "North America").variance.unwrap();
    assert_eq!(na.value, Some(7.14));
    assert_eq!(na.tone, Some(VarianceTone::Favorable));

    let eu = group(&groups, "Europe").variance.unwrap();
    assert_eq!(eu.value, Some(-5.0));
    assert_eq!(eu.tone, Some(VarianceTone::Neutral));

    let apac = group(&groups, "Asia Pacific").variance.unwrap();
    assert_eq!(apac.value, Some(6.67));
}

#[test]
fn test_egress_absolute_variance_and_summary() {
    let report = Report::builtin(ReportId::EgressReconciliation).unwrap();
    let groups = top_level(ReportId::EgressReconciliation);

    let api = group(&groups, "API");
    assert_eq!(api.member_count, 3);
    assert_eq!(api.rate, Some(Rate::Percent(99.89)));
    assert_eq!(api.status.as_deref(), Some("Warning"));
    assert_eq!(api.variance.unwrap().value, Some(-40.0));
    assert_eq!(api.variance.unwrap().tone, Some(VarianceTone::Unfavorable));

    let ftp = group(&groups, "FTP");
    assert_eq!(ftp.rate, Some(Rate::Percent(99.8)));
    assert_eq!(ftp.status.as_deref(), Some("Error"));

    let summary = ReportSummary::compute(&groups, &report.config);
    assert_eq!(summary.total_abs_variance, Some(90.0));
    assert_eq!(summary.totals["expected_records"], 62_000.0);
}

#[test]
fn test_inventory_coverage_bands() {
    let groups = top_level(ReportId::InventoryCoverage);
    let expected = [
        ("North America", 93.8, "Adequate"),
        ("Europe", 84.2, "Low"),
        ("Asia Pacific", 96.6, "Optimal"),
        ("Latin America", 75.0, "Critical"),
    ];
    for (key, rate, status) in expected {
        let g = group(&groups, key);
        assert_eq!(g.rate, Some(Rate::Percent(rate)), "{key}");
        assert_eq!(g.status.as_deref(), Some(status), "{key}");
    }
}

#[test]
fn test_pipeline_health_summary() {
    let report = Report::builtin(ReportId::PipelineHealth).unwrap();
    let groups = top_level(ReportId::PipelineHealth);
    let summary = ReportSummary::compute(&groups, &report.config);

    assert_eq!(summary.group_count, 4);
    assert_eq!(summary.mean_rate, Some(95.1));
    assert_eq!(summary.statuses.count("Healthy"), 2);
    assert_eq!(summary.statuses.count("Degraded"), 1);
    assert_eq!(summary.statuses.count("Failing"), 1);
    assert_eq!(summary.totals["errors"], 25.0);

    let states = count_by_dimension(&report.records, "state");
    assert_eq!(
        states,
        vec![("Running".to_string(), 2), ("Failed".to_string(), 1), ("Warning".to_string(), 1)]
    );
}

#[test]
fn test_domain_forecast_variances() {
    let groups = top_level(ReportId::DomainForecast);
    let read = |key: &str| group(&groups, key).variance.unwrap();

    assert_eq!(read("Sales Forecast Q1").value, Some(-5.0));
    assert_eq!(read("Sales Forecast Q1").tone, Some(VarianceTone::Neutral));
    assert_eq!(read("Customer Growth Q1").value, Some(4.0));
    assert_eq!(read("Product Usage Q1").value, Some(-6.0));
    assert_eq!(read("Product Usage Q1").tone, Some(VarianceTone::Unfavorable));
}

#[test]
fn test_hierarchy_records_match_tree_leaves() {
    let report = Report::builtin(ReportId::ReconciliationHierarchy).unwrap();
    let leaves = leaf_records(&reconciliation_tree(), &report.config.levels, 1).unwrap();
    assert_eq!(leaves, report.records);
}

#[test]
fn test_hierarchy_regions_roll_up_from_countries() {
    let groups = top_level(ReportId::ReconciliationHierarchy);
    let europe = group(&groups, "Europe");
    assert_eq!(europe.sum("record_count"), 270_000.0);
    assert_eq!(europe.rate, Some(Rate::Percent(99.26)));
    assert_eq!(europe.status.as_deref(), Some("Reconciled"));
}
