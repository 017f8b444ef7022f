use vantage_model::*;

#[test]
fn test_negative_tolerance_is_made_positive() {
    let policy = VariancePolicy::new(VarianceDirection::HigherIsBetter, -5.0);
    assert_eq!(policy.tolerance, 5.0);
    assert_eq!(policy.tone(4.0), VarianceTone::Neutral);
}

#[test]
fn test_negative_tolerance_from_file_is_made_positive() {
    let policy: VariancePolicy =
        serde_json::from_str(r#"{ "direction": "higher-is-better", "tolerance": -5.0 }"#).unwrap();
    assert_eq!(policy, VariancePolicy::new(VarianceDirection::HigherIsBetter, 5.0));
    assert_eq!(policy.tone(-4.0), VarianceTone::Neutral);
    assert_eq!(policy.tone(6.0), VarianceTone::Favorable);
}

#[test]
fn test_missing_tolerance_defaults_to_zero() {
    let policy: VariancePolicy = toml::from_str(r#"direction = "zero-is-best""#).unwrap();
    assert_eq!(policy.tolerance, 0.0);
    assert_eq!(policy.tone(0.0), VarianceTone::Favorable);
}

#[test]
fn test_non_finite_tolerance_rejected() {
    let result: Result<VariancePolicy, _> = toml::from_str("direction = \"lower-is-better\"\ntolerance = inf\n");
    assert!(result.is_err());
}

#[test]
fn test_tolerance_bounds_are_neutral() {
    let policy = VariancePolicy::new(VarianceDirection::LowerIsBetter, 5.0);
    assert_eq!(policy.tone(5.0), VarianceTone::Neutral);
    assert_eq!(policy.tone(-5.0), VarianceTone::Neutral);
    assert_eq!(policy.tone(-5.01), VarianceTone::Favorable);
    assert_eq!(policy.tone(5.01), VarianceTone::Unfavorable);
}

#[test]
fn test_variance_evaluate_with_oversized_precision() {
    let policy = VariancePolicy::new(VarianceDirection::ZeroIsBest, 10.0);
    let variance = Variance::evaluate(24_950.0, 25_000.0, VarianceMode::Absolute, 1000, &policy);
    assert_eq!(variance.value, Some(-50.0));
    assert_eq!(variance.tone, Some(VarianceTone::Unfavorable));
}
