//! Vantage Aggregate - derived values over in-memory report records
//!
//! - [`aggregate`]: filter by drill path and filters, partition by the active
//!   level, sum tracked fields, derive rate, status and variance
//! - [`summary`]: report-wide cards (status counts, totals, mean rates)
//! - [`trend`]: period-over-period KPIs and forecast accuracy

pub mod aggregator;
pub mod summary;
pub mod trend;

pub use aggregator::{aggregate, Aggregator};
pub use summary::*;
pub use trend::*;
