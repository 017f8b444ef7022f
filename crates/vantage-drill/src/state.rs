//! Drill state machine.
//!
//! States are the level indices `0..N`. `descend` moves one level deeper by
//! selecting a key, `ascend` drops the last selected key, `reset` returns to
//! the root. Rejected transitions leave the state untouched.

use serde::Serialize;
use vantage_model::{DrillPath, HierarchyLevels};

use crate::DrillError;

/// The transition kinds, used when reporting a rejected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Descend,
    Ascend,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Descend => write!(f, "descend past the leaf"),
            Transition::Ascend => write!(f, "ascend past the root"),
        }
    }
}

/// Active level and selected ancestor keys for one report.
///
/// Invariant: `path.len() <= levels.len() - 1`. The active level is always
/// `path.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillState {
    levels: HierarchyLevels,
    path: DrillPath,
}

impl DrillState {
    /// Start at the root: level 0, empty path.
    pub fn new(levels: HierarchyLevels) -> Self {
        Self { levels, path: DrillPath::root() }
    }

    /// Rebuild a state from a previously selected path.
    pub fn restore(levels: HierarchyLevels, path: DrillPath) -> Result<Self, DrillError> {
        let max = levels.leaf_index();
        if path.len() > max {
            return Err(DrillError::PathTooDeep { len: path.len(), max });
        }
        Ok(Self { levels, path })
    }

    pub fn levels(&self) -> &HierarchyLevels {
        &self.levels
    }

    pub fn path(&self) -> &DrillPath {
        &self.path
    }

    /// Index of the active level.
    pub fn level(&self) -> usize {
        self.path.len()
    }

    pub fn level_name(&self) -> &str {
        self.levels.name(self.level()).unwrap_or_default()
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.level() == self.levels.leaf_index()
    }

    pub fn can_descend(&self) -> bool {
        !self.is_leaf()
    }

    pub fn can_ascend(&self) -> bool {
        !self.is_root()
    }

    /// Select `key` at the active level and move one level down.
    pub fn descend(&mut self, key: impl Into<String>) -> Result<(), DrillError> {
        if !self.can_descend() {
            return Err(self.rejected(Transition::Descend));
        }
        let key = key.into();
        tracing::trace!(level = self.level(), key = %key, "descend");
        self.path.push(key);
        Ok(())
    }

    /// Drop the deepest selected key and move one level up.
    /// Returns the key that was deselected.
    pub fn ascend(&mut self) -> Result<String, DrillError> {
        match self.path.pop() {
            Some(key) => {
                tracing::trace!(level = self.level(), key = %key, "ascend");
                Ok(key)
            }
            None => Err(self.rejected(Transition::Ascend)),
        }
    }

    /// Back to the root level.
    pub fn reset(&mut self) {
        self.path.clear();
    }

    /// `(level name, selected key)` for every level descended through.
    pub fn breadcrumbs(&self) -> Vec<(&str, &str)> {
        self.levels.iter().zip(self.path.iter()).collect()
    }

    fn rejected(&self, action: Transition) -> DrillError {
        DrillError::InvalidTransition {
            action,
            level: self.level(),
            depth: self.levels.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_levels() -> HierarchyLevels {
        HierarchyLevels::new(["region", "country", "node"]).unwrap()
    }

    #[test]
    fn test_initial_state_is_root() {
        let state = DrillState::new(three_levels());
        assert_eq!(state.level(), 0);
        assert_eq!(state.level_name(), "region");
        assert!(state.is_root());
        assert!(!state.is_leaf());
        assert!(state.path().is_empty());
    }

    #[test]
    fn test_error_message_names_transition() {
        let mut state = DrillState::new(three_levels());
        let err = state.ascend().unwrap_err();
        assert_eq!(err.to_string(), "invalid transition: cannot ascend past the root at level 0 of 3");
    }
}
