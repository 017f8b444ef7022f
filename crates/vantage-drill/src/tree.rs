//! Expand/collapse navigation over nested hierarchy nodes.
//!
//! Unlike [`crate::DrillState`], every node keeps its own reported totals and
//! any number of nodes can be open at once.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use vantage_model::{HierarchyLevels, Record};

use crate::DrillError;

/// A node of a nested hierarchy with its own reported metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            metrics: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn metric(&self, name: &str) -> f64 {
        self.metrics.get(name).copied().unwrap_or(0.0)
    }
}

/// The set of node ids currently expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionSet {
    expanded: BTreeSet<String>,
}

impl ExpansionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given ids open.
    pub fn with_expanded<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { expanded: ids.into_iter().map(Into::into).collect() }
    }

    /// Every node that has children, open.
    pub fn all(roots: &[TreeNode]) -> Self {
        fn walk(node: &TreeNode, out: &mut BTreeSet<String>) {
            if node.has_children() {
                out.insert(node.id.clone());
            }
            for child in &node.children {
                walk(child, out);
            }
        }
        let mut expanded = BTreeSet::new();
        for root in roots {
            walk(root, &mut expanded);
        }
        Self { expanded }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip a node open/closed. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn expand(&mut self, id: impl Into<String>) {
        self.expanded.insert(id.into());
    }

    pub fn collapse(&mut self, id: &str) {
        self.expanded.remove(id);
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

/// One visible line of a flattened tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub metrics: &'a BTreeMap<String, f64>,
}

/// Pre-order walk that only descends into expanded nodes.
pub fn visible_rows<'a>(roots: &'a [TreeNode], expansion: &ExpansionSet) -> Vec<TreeRow<'a>> {
    fn walk<'a>(node: &'a TreeNode, depth: usize, expansion: &ExpansionSet, out: &mut Vec<TreeRow<'a>>) {
        let expanded = expansion.is_expanded(&node.id);
        out.push(TreeRow {
            id: &node.id,
            name: &node.name,
            depth,
            has_children: node.has_children(),
            expanded,
            metrics: &node.metrics,
        });
        if expanded {
            for child in &node.children {
                walk(child, depth + 1, expansion, out);
            }
        }
    }

    let mut rows = Vec::new();
    for root in roots {
        walk(root, 0, expansion, &mut rows);
    }
    rows
}

/// Flatten the leaves of a tree into records for the drill state machine.
///
/// `skip_depth` ancestors are dropped from the top (e.g. 1 to skip a single
/// "Global" root); the remaining ancestor names become the dimension values
/// of `levels` in order. Leaves shallower than the deepest level simply lack
/// the deeper dimensions.
pub fn leaf_records(roots: &[TreeNode], levels: &HierarchyLevels, skip_depth: usize) -> Result<Vec<Record>, DrillError> {
    fn walk<'a>(
        node: &'a TreeNode,
        depth: usize,
        skip: usize,
        levels: &HierarchyLevels,
        lineage: &mut Vec<&'a str>,
        out: &mut Vec<Record>,
    ) -> Result<(), DrillError> {
        let kept = depth >= skip;
        if kept {
            let level_index = depth - skip;
            if level_index >= levels.len() {
                return Err(DrillError::TreeTooDeep {
                    node: node.id.clone(),
                    depth: level_index,
                    levels: levels.len(),
                });
            }
            lineage.push(&node.name);
        }

        if node.has_children() {
            for child in &node.children {
                walk(child, depth + 1, skip, levels, lineage, out)?;
            }
        } else if kept {
            let mut record = Record::new();
            for (level, key) in levels.iter().zip(lineage.iter()) {
                record = record.with_dimension(level, *key);
            }
            record.metrics = node.metrics.clone();
            out.push(record);
        }

        if kept {
            lineage.pop();
        }
        Ok(())
    }

    let mut records = Vec::new();
    let mut lineage = Vec::new();
    for root in roots {
        walk(root, 0, skip_depth, levels, &mut lineage, &mut records)?;
    }
    tracing::debug!(leaves = records.len(), "flattened tree into records");
    Ok(records)
}
