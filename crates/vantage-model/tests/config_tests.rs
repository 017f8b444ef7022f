use vantage_model::*;

fn base_config() -> ReportConfig {
    ReportConfig::new(
        HierarchyLevels::new(["region", "country"]).unwrap(),
        ["record_count", "matched"],
    )
    .with_rate(RateSpec::new("matched", "record_count"))
}

#[test]
fn test_default_precision_and_policy() {
    let config = base_config();
    assert_eq!(config.precision, DEFAULT_RATE_PRECISION);
    assert_eq!(config.undefined_rate, UndefinedRatePolicy::NotAvailable);
    assert!(config.validate().is_ok());
}

#[test]
fn test_rate_on_untracked_field_rejected() {
    let config = ReportConfig::new(HierarchyLevels::new(["region"]).unwrap(), ["record_count"])
        .with_rate(RateSpec::new("matched", "record_count"));
    assert_eq!(
        config.validate(),
        Err(ModelError::UntrackedField { field: "matched".into(), used_by: "rate" })
    );
}

#[test]
fn test_thresholds_without_rate_rejected() {
    let config = ReportConfig::new(HierarchyLevels::new(["region"]).unwrap(), ["record_count"])
        .with_thresholds(StatusThresholds::success_warning_error(98.0, 95.0).unwrap());
    assert!(matches!(config.validate(), Err(ModelError::Config(_))));
}

#[test]
fn test_overrides_apply() {
    let mut config = base_config();
    let overrides = ReportOverrides {
        precision: Some(1),
        undefined_rate: Some(UndefinedRatePolicy::Full),
        thresholds: Some(StatusThresholds::success_warning_error(99.0, 90.0).unwrap()),
    };
    config.apply_overrides(&overrides).unwrap();
    assert_eq!(config.precision, 1);
    assert_eq!(config.undefined_rate, UndefinedRatePolicy::Full);
    assert_eq!(config.thresholds.as_ref().unwrap().label_for(95.0), "Warning");
}

#[test]
fn test_invalid_override_leaves_config_untouched() {
    let mut config = base_config();
    let overrides = ReportOverrides { precision: Some(12), ..Default::default() };
    let err = config.apply_overrides(&overrides).unwrap_err();
    assert_eq!(err, ModelError::InvalidPrecision { got: 12, max: MAX_RATE_PRECISION });
    assert_eq!(config.precision, DEFAULT_RATE_PRECISION);
}

#[test]
fn test_overrides_from_toml() {
    let overrides: ReportOverrides = toml::from_str(
        r#"
precision = 1
undefined_rate = "zero"

[thresholds]
fallback = "Critical"

[[thresholds.bands]]
label = "Optimal"
min_rate = 98.0

[[thresholds.bands]]
label = "Warning"
min_rate = 95.0
"#,
    )
    .unwrap();
    assert_eq!(overrides.precision, Some(1));
    assert_eq!(overrides.undefined_rate, Some(UndefinedRatePolicy::Zero));
    let thresholds = overrides.thresholds.unwrap();
    assert_eq!(thresholds.label_for(99.0), "Optimal");
    assert_eq!(thresholds.label_for(90.0), "Critical");
}

#[test]
fn test_unknown_override_key_rejected() {
    let result: Result<ReportOverrides, _> = toml::from_str("precison = 1");
    assert!(result.is_err());
}

#[test]
fn test_report_config_deserializes() {
    let config: ReportConfig = serde_json::from_str(
        r#"{
            "levels": ["region", "country"],
            "tracked": ["current_day", "previous_day"],
            "variance": {
                "current": "current_day",
                "reference": "previous_day",
                "policy": { "direction": "higher-is-better", "tolerance": 5.0 }
            }
        }"#,
    )
    .unwrap();
    assert_eq!(config.precision, DEFAULT_RATE_PRECISION);
    assert_eq!(config.variance.as_ref().unwrap().mode, VarianceMode::Percent);
    assert!(config.validate().is_ok());
}
