//! Vantage Model - Core types for drill-down data-health reports
//!
//! Describes the static inputs of a report (hierarchy levels, leaf records,
//! report configuration) and the derived values the aggregator produces
//! (groups, rates, status labels, variances).

pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod group;
pub mod hierarchy;
pub mod path;
pub mod rate;
pub mod record;
pub mod status;
pub mod variance;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use filter::*;
pub use group::*;
pub use hierarchy::*;
pub use path::*;
pub use rate::*;
pub use record::*;
pub use status::*;
pub use variance::*;
