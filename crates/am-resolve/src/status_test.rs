use super::*;
use crate::test_utils::{config, schema, status_of, with_status, COMPUTER};
use am_session::MemoryGraph;

fn targets_of(objects: &[InfrastructureObject]) -> TargetSet {
    let mut targets = TargetSet::new();
    targets.extend(objects.iter().cloned());
    targets
}

fn computers(graph: &MemoryGraph, names: &[&str]) -> Vec<InfrastructureObject> {
    names
        .iter()
        .map(|name| {
            let computer = graph.add_object(COMPUTER, name);
            with_status(graph, &computer);
            computer
        })
        .collect()
}

#[tokio::test]
async fn test_apply_sets_enumeration_on_every_target() {
    let graph = schema();
    let config = config();
    let objects = computers(&graph, &["web01", "web02", "sql01"]);

    let ctx = ResolveContext::new(&graph, &config);
    let mut warnings = Warnings::default();
    let report = apply_status(ctx, &targets_of(&objects), AssetStatus::Deployed, &mut warnings)
        .await
        .unwrap();

    assert_eq!(report.updated.len(), 3);
    assert!(report.skipped.is_empty());
    assert!(report.failed.is_empty());
    for object in &objects {
        assert_eq!(status_of(&graph, object).as_deref(), Some("Deployed"));
    }
    assert!(matches!(
        graph.property(&objects[0], "AssetStatus"),
        Some(PropertyValue::Enumeration(ref e)) if e.path == "System.AssetStatus.Deployed"
    ));
    assert!(warnings.is_empty());
}

#[tokio::test]
async fn test_objects_without_property_are_skipped() {
    let graph = schema();
    let config = config();
    let objects = computers(&graph, &["web01"]);
    let bare = graph.add_object(COMPUTER, "appliance01");
    let all = [objects[0].clone(), bare.clone()];

    let ctx = ResolveContext::new(&graph, &config);
    let mut warnings = Warnings::default();
    let report = apply_status(ctx, &targets_of(&all), AssetStatus::Retired, &mut warnings)
        .await
        .unwrap();

    assert_eq!(report.updated, vec![objects[0].clone()]);
    assert_eq!(report.skipped, vec![bare.clone()]);
    assert!(graph.property(&bare, "AssetStatus").is_none());
    assert!(matches!(
        warnings.iter().next(),
        Some(ResolveWarning::MissingProperty { .. })
    ));
}

#[tokio::test]
async fn test_partial_write_failure_continues() {
    let graph = schema();
    let config = config();
    let objects = computers(&graph, &["web01", "web02", "web03"]);
    graph.fail_writes_to(&objects[1]);

    let ctx = ResolveContext::new(&graph, &config);
    let mut warnings = Warnings::default();
    let report = apply_status(ctx, &targets_of(&objects), AssetStatus::Disposed, &mut warnings)
        .await
        .unwrap();

    assert_eq!(report.updated.len(), 2);
    assert_eq!(report.failed, vec![objects[1].clone()]);
    assert_eq!(graph.write_count(), 2);
    assert_eq!(status_of(&graph, &objects[2]).as_deref(), Some("Disposed"));
    assert_eq!(status_of(&graph, &objects[1]).as_deref(), Some(""));
    assert!(matches!(
        warnings.iter().next(),
        Some(ResolveWarning::WriteFailed { .. })
    ));
}

#[tokio::test]
async fn test_apply_twice_is_idempotent() {
    let graph = schema();
    let config = config();
    let objects = computers(&graph, &["web01", "web02"]);
    let targets = targets_of(&objects);

    let ctx = ResolveContext::new(&graph, &config);
    let mut warnings = Warnings::default();
    apply_status(ctx, &targets, AssetStatus::Purchased, &mut warnings)
        .await
        .unwrap();
    let first: Vec<_> = objects.iter().map(|o| graph.property(o, "AssetStatus")).collect();
    apply_status(ctx, &targets, AssetStatus::Purchased, &mut warnings)
        .await
        .unwrap();
    let second: Vec<_> = objects.iter().map(|o| graph.property(o, "AssetStatus")).collect();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_enumeration_is_fatal() {
    let graph = MemoryGraph::default();
    let config = config();
    let objects = computers(&graph, &["web01"]);

    let ctx = ResolveContext::new(&graph, &config);
    let mut warnings = Warnings::default();
    let err = apply_status(ctx, &targets_of(&objects), AssetStatus::Deployed, &mut warnings)
        .await
        .unwrap_err();

    assert!(matches!(err, ResolveError::UnknownEnumeration { .. }));
    assert_eq!(graph.write_count(), 0);
}

#[tokio::test]
async fn test_read_status_rows() {
    let graph = schema();
    let config = config();
    let objects = computers(&graph, &["web01"]);
    let bare = graph.add_object(COMPUTER, "appliance01");
    graph.set_property(
        &objects[0],
        "AssetStatus",
        PropertyValue::Text("Deployed".into()),
    );
    let all = [objects[0].clone(), bare];

    let ctx = ResolveContext::new(&graph, &config);
    let mut warnings = Warnings::default();
    let rows = read_status(ctx, &targets_of(&all), &mut warnings)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display_name, "web01");
    assert_eq!(rows[0].status, "Deployed");
    assert_eq!(rows[0].class_name, COMPUTER);
    assert_eq!(warnings.len(), 1);
}
