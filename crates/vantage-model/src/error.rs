use chrono::NaiveDate;

/// Errors raised while building or validating report configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ModelError {
    #[error("hierarchy must have at least one level")]
    EmptyHierarchy,

    #[error("duplicate hierarchy level '{0}'")]
    DuplicateLevel(String),

    #[error("unknown hierarchy level '{0}'")]
    UnknownLevel(String),

    #[error("precision {got} exceeds maximum of {max} decimal places")]
    InvalidPrecision { got: u32, max: u32 },

    #[error("invalid status thresholds: {0}")]
    InvalidThresholds(String),

    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("field '{field}' is used by the {used_by} but is not tracked")]
    UntrackedField { field: String, used_by: &'static str },

    #[error("invalid configuration: {0}")]
    Config(String),
}
