use vantage_drill::{leaf_records, visible_rows, DrillError, ExpansionSet, TreeNode};
use vantage_model::HierarchyLevels;

fn sample_tree() -> Vec<TreeNode> {
    vec![TreeNode::new("root", "Global Data")
        .with_metric("record_count", 1_000.0)
        .with_children(vec![
            TreeNode::new("region-1", "North America")
                .with_metric("record_count", 400.0)
                .with_children(vec![
                    TreeNode::new("country-1", "United States").with_metric("record_count", 300.0),
                    TreeNode::new("country-2", "Canada").with_metric("record_count", 100.0),
                ]),
            TreeNode::new("region-2", "Europe")
                .with_metric("record_count", 350.0)
                .with_children(vec![
                    TreeNode::new("country-3", "Germany").with_metric("record_count", 150.0),
                ]),
        ])]
}

#[test]
fn test_collapsed_tree_shows_only_roots() {
    let tree = sample_tree();
    let rows = visible_rows(&tree, &ExpansionSet::new());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "root");
    assert!(rows[0].has_children);
    assert!(!rows[0].expanded);
}

#[test]
fn test_expanded_nodes_show_children_in_preorder() {
    let tree = sample_tree();
    let mut expansion = ExpansionSet::with_expanded(["root"]);
    let ids: Vec<&str> = visible_rows(&tree, &expansion).iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["root", "region-1", "region-2"]);

    assert!(expansion.toggle("region-2"));
    let rows = visible_rows(&tree, &expansion);
    let ids: Vec<&str> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["root", "region-1", "region-2", "country-3"]);
    assert_eq!(rows[3].depth, 2);
    assert_eq!(rows[3].metrics["record_count"], 150.0);
}

#[test]
fn test_toggle_collapses_again() {
    let mut expansion = ExpansionSet::with_expanded(["root"]);
    assert!(!expansion.toggle("root"));
    assert!(expansion.is_empty());
}

#[test]
fn test_collapsing_parent_hides_expanded_descendants() {
    let tree = sample_tree();
    let mut expansion = ExpansionSet::all(&tree);
    assert_eq!(visible_rows(&tree, &expansion).len(), 6);
    expansion.collapse("root");
    assert_eq!(visible_rows(&tree, &expansion).len(), 1);
    assert!(expansion.is_expanded("region-1"), "descendant expansion is remembered");
}

#[test]
fn test_leaf_records_carry_lineage() {
    let tree = sample_tree();
    let levels = HierarchyLevels::new(["region", "country"]).unwrap();
    let records = leaf_records(&tree, &levels, 1).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].dimension("region"), Some("North America"));
    assert_eq!(records[0].dimension("country"), Some("United States"));
    assert_eq!(records[2].dimension("region"), Some("Europe"));
    assert_eq!(records[2].metric("record_count"), 150.0);
}

#[test]
fn test_leaf_records_reject_tree_deeper_than_levels() {
    let tree = sample_tree();
    let levels = HierarchyLevels::new(["region"]).unwrap();
    let err = leaf_records(&tree, &levels, 1).unwrap_err();
    assert!(matches!(err, DrillError::TreeTooDeep { depth: 1, levels: 1, .. }));
}
