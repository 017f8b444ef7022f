use vantage_model::*;

#[test]
fn test_levels_preserve_order() {
    let levels = HierarchyLevels::new(["region", "country", "node"]).unwrap();
    assert_eq!(levels.len(), 3);
    assert_eq!(levels.name(0), Some("region"));
    assert_eq!(levels.name(2), Some("node"));
    assert_eq!(levels.name(3), None);
    assert_eq!(levels.index_of("country"), Some(1));
    assert_eq!(levels.leaf_index(), 2);
    assert_eq!(levels.to_string(), "region → country → node");
}

#[test]
fn test_empty_levels_rejected() {
    let empty: Vec<String> = Vec::new();
    assert_eq!(HierarchyLevels::new(empty), Err(ModelError::EmptyHierarchy));
}

#[test]
fn test_duplicate_levels_rejected() {
    let err = HierarchyLevels::new(["region", "country", "region"]).unwrap_err();
    assert_eq!(err, ModelError::DuplicateLevel("region".into()));
}

#[test]
fn test_levels_deserialize_with_validation() {
    let ok: HierarchyLevels = serde_json::from_str(r#"["interface_type","interface"]"#).unwrap();
    assert_eq!(ok.len(), 2);
    assert!(serde_json::from_str::<HierarchyLevels>("[]").is_err());
    assert!(serde_json::from_str::<HierarchyLevels>(r#"["a","a"]"#).is_err());
}

#[test]
fn test_drill_path_breadcrumb() {
    let mut path = DrillPath::root();
    assert!(path.is_empty());
    path.push("Europe");
    path.push("Germany");
    assert_eq!(path.len(), 2);
    assert_eq!(path.last(), Some("Germany"));
    assert_eq!(path.to_string(), "Europe › Germany");
    assert_eq!(path.pop().as_deref(), Some("Germany"));
    assert_eq!(path, ["Europe"].into_iter().collect::<DrillPath>());
}

#[test]
fn test_record_missing_metric_reads_zero() {
    let record = Record::new()
        .with_dimension("region", "EU")
        .with_metric("record_count", 100.0);
    assert_eq!(record.dimension("region"), Some("EU"));
    assert_eq!(record.dimension("country"), None);
    assert_eq!(record.metric("record_count"), 100.0);
    assert_eq!(record.metric("matched"), 0.0);
}
