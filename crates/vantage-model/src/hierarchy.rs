use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Ordered list of named drill levels, root first (e.g. region → country → node).
///
/// Fixed per report. Always non-empty and free of duplicate names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct HierarchyLevels {
    names: Vec<String>,
}

impl HierarchyLevels {
    pub fn new<I, S>(names: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(ModelError::EmptyHierarchy);
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(ModelError::DuplicateLevel(name.clone()));
            }
        }
        Ok(Self { names })
    }

    /// Number of levels. Never zero.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Index of the deepest level.
    pub fn leaf_index(&self) -> usize {
        self.names.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for HierarchyLevels {
    type Error = ModelError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<HierarchyLevels> for Vec<String> {
    fn from(levels: HierarchyLevels) -> Self {
        levels.names
    }
}

impl std::fmt::Display for HierarchyLevels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.names.join(" → "))
    }
}
