use chrono::NaiveDate;
use vantage_model::*;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

#[test]
fn test_dimension_filter_is_case_sensitive() {
    let record = Record::new().with_dimension("region", "Europe");
    assert!(DimensionFilter::new("region", "Europe").matches(&record));
    assert!(!DimensionFilter::new("region", "europe").matches(&record));
    assert!(!DimensionFilter::new("country", "Europe").matches(&record));
}

#[test]
fn test_setting_filter_twice_replaces() {
    let mut filters = FilterSet::new();
    filters.set(DimensionFilter::new("status", "Running"));
    filters.set(DimensionFilter::new("status", "Failed"));
    assert_eq!(filters.dimensions().len(), 1);
    assert_eq!(filters.dimensions()[0].value, "Failed");
    assert!(filters.clear("status"));
    assert!(!filters.clear("status"));
    assert!(filters.is_empty());
}

#[test]
fn test_date_range_inclusive() {
    let range = DateRange::new(day(10), day(20)).unwrap();
    assert!(range.contains(day(10)));
    assert!(range.contains(day(20)));
    assert!(!range.contains(day(9)));
    assert!(!range.contains(day(21)));
    assert_eq!(range.to_string(), "2024-01-10..2024-01-20");
}

#[test]
fn test_inverted_date_range_rejected() {
    let err = DateRange::new(day(20), day(10)).unwrap_err();
    assert_eq!(err, ModelError::InvalidDateRange { start: day(20), end: day(10) });
}

#[test]
fn test_undated_record_excluded_by_active_range() {
    let mut filters = FilterSet::new();
    let dated = Record::new().observed_on(day(15));
    let undated = Record::new();
    assert!(filters.matches(&undated));

    filters.set_date_range(DateRange::new(day(10), day(20)).unwrap());
    assert!(filters.matches(&dated));
    assert!(!filters.matches(&undated));

    assert!(filters.clear_date_range());
    assert!(filters.matches(&undated));
}
