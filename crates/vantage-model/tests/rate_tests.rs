use vantage_model::*;

#[test]
fn test_rate_rounds_to_report_precision() {
    let rate = compute_rate(145.0, 150.0, 2, UndefinedRatePolicy::NotAvailable);
    assert_eq!(rate, Rate::Percent(96.67));

    let rate = compute_rate(145.0, 150.0, 1, UndefinedRatePolicy::NotAvailable);
    assert_eq!(rate, Rate::Percent(96.7));
}

#[test]
fn test_zero_denominator_uses_policy() {
    assert_eq!(compute_rate(0.0, 0.0, 2, UndefinedRatePolicy::Zero), Rate::Percent(0.0));
    assert_eq!(compute_rate(0.0, 0.0, 2, UndefinedRatePolicy::Full), Rate::Percent(100.0));
    assert_eq!(compute_rate(0.0, 0.0, 2, UndefinedRatePolicy::NotAvailable), Rate::NotAvailable);
    // numerator without denominator is still undefined
    assert_eq!(compute_rate(5.0, 0.0, 2, UndefinedRatePolicy::NotAvailable), Rate::NotAvailable);
}

#[test]
fn test_rate_never_nan() {
    for policy in [UndefinedRatePolicy::Zero, UndefinedRatePolicy::Full, UndefinedRatePolicy::NotAvailable] {
        let rate = compute_rate(f64::INFINITY, f64::INFINITY, 2, policy);
        if let Some(p) = rate.percent() {
            assert!(!p.is_nan(), "policy {policy:?} leaked NaN");
        }
    }
}

#[test]
fn test_rate_serializes_with_kind_tag() {
    let json = serde_json::to_value(Rate::Percent(99.5)).unwrap();
    assert_eq!(json["kind"], "percent");
    assert_eq!(json["value"], 99.5);
    let json = serde_json::to_value(Rate::NotAvailable).unwrap();
    assert_eq!(json["kind"], "not-available");
}

#[test]
fn test_variance_pct() {
    assert_eq!(variance_pct(45_000.0, 42_000.0, 2), Some(7.14));
    assert_eq!(variance_pct(38_000.0, 40_000.0, 2), Some(-5.0));
    assert_eq!(variance_pct(8_000.0, 8_000.0, 2), Some(0.0));
    assert_eq!(variance_pct(10.0, 0.0, 2), None);
}

#[test]
fn test_non_finite_inputs_resolve_through_policy() {
    assert_eq!(compute_rate(f64::NAN, 100.0, 2, UndefinedRatePolicy::NotAvailable), Rate::NotAvailable);
    assert_eq!(compute_rate(f64::INFINITY, 100.0, 2, UndefinedRatePolicy::Zero), Rate::Percent(0.0));
    assert_eq!(compute_rate(50.0, f64::NAN, 2, UndefinedRatePolicy::Full), Rate::Percent(100.0));
}

#[test]
fn test_precision_above_maximum_is_capped() {
    assert_eq!(round_to(96.666_666_666, 400), round_to(96.666_666_666, MAX_RATE_PRECISION));
    assert_eq!(round_to(1.0 / 3.0, u32::MAX), 0.333_333);

    let rate = compute_rate(145.0, 150.0, 400, UndefinedRatePolicy::NotAvailable);
    assert_eq!(rate, Rate::Percent(96.666_667));
}

#[test]
fn test_rounding_huge_values_stays_finite() {
    assert_eq!(round_to(f64::MAX, 2), f64::MAX);
}

#[test]
fn test_variance_pct_never_nan() {
    assert_eq!(variance_pct(f64::INFINITY, 100.0, 2), None);
    assert_eq!(variance_pct(f64::NAN, 100.0, 2), None);
    assert_eq!(variance_pct(45_000.0, 42_000.0, 500), Some(7.142_857));
}
