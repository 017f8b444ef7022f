/// Decimal places used for rates when a report does not say otherwise.
pub const DEFAULT_RATE_PRECISION: u32 = 2;

/// Upper bound on configurable decimal places.
pub const MAX_RATE_PRECISION: u32 = 6;

/// Display value for a rate whose denominator is zero under the
/// `NotAvailable` policy.
pub const NOT_AVAILABLE_LABEL: &str = "N/A";

/// Multiplier turning a ratio into a percentage.
pub const PERCENT_SCALE: f64 = 100.0;

/// Group key for records that match the drill path but carry no value at
/// the active level.
pub const UNASSIGNED_GROUP_KEY: &str = "(unassigned)";

/// Separator used when a drill path is printed as a breadcrumb.
pub const BREADCRUMB_SEPARATOR: &str = " › ";
