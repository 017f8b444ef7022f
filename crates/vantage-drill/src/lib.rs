//! Vantage Drill - hierarchical navigation state
//!
//! Two navigation models are provided:
//! - [`DrillState`]: one active level plus the keys selected above it
//!   (region → country → node drill-down tables)
//! - [`ExpansionSet`] over [`TreeNode`]s: individually expandable nested
//!   rows carrying their own totals

pub mod state;
pub mod tree;

pub use state::{DrillState, Transition};
pub use tree::{leaf_records, visible_rows, ExpansionSet, TreeNode, TreeRow};

/// Errors raised by the drill-down navigation models.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DrillError {
    #[error("invalid transition: cannot {action} at level {level} of {depth}")]
    InvalidTransition {
        action: Transition,
        level: usize,
        depth: usize,
    },

    #[error("drill path of length {len} exceeds the {max} selectable levels")]
    PathTooDeep { len: usize, max: usize },

    #[error("tree node '{node}' sits at depth {depth} but only {levels} levels are defined")]
    TreeTooDeep {
        node: String,
        depth: usize,
        levels: usize,
    },
}
