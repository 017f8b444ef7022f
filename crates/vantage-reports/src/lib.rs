//! Vantage Reports - built-in data-health reports and drill sessions
//!
//! The catalogue carries every report of the data-health dashboard as a
//! static record set plus its configuration. A [`ReportSession`] drives one
//! report interactively: each event updates the drill state or filters and
//! recomputes the view before returning.

pub mod catalog;
pub mod series;
pub mod session;

pub use catalog::{catalog, reconciliation_tree, Report, ReportId};
pub use session::{Applied, Breadcrumb, ReportSession, SessionEvent, SessionSnapshot};

use vantage_drill::DrillError;
use vantage_model::ModelError;

/// Errors raised while building reports or driving a session.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("unknown report '{0}'")]
    UnknownReport(String),

    #[error("invalid session event '{input}': {reason}")]
    InvalidEvent { input: String, reason: String },

    #[error(transparent)]
    Drill(#[from] DrillError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
