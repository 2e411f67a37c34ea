use super::*;
use chrono::{Duration, TimeZone};

fn session() -> DuckDbSession {
    DuckDbSession::in_memory("scom01").unwrap()
}

fn computer_class() -> ClassName {
    ClassName::new("Microsoft.Windows.Computer")
}

#[tokio::test]
async fn test_in_memory_server_name() {
    let s = session();
    assert_eq!(s.server_name(), "scom01");
}

#[tokio::test]
async fn test_open_missing_file_is_connection_error() {
    let err = DuckDbSession::open("scom01", Path::new("/nonexistent/scom01.duckdb"))
        .err()
        .unwrap();
    assert!(matches!(err, SessionError::ConnectionError(_)));
}

#[tokio::test]
async fn test_open_non_snapshot_file_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.duckdb");
    drop(Connection::open(&path).unwrap());
    let err = DuckDbSession::open("scom01", &path).err().unwrap();
    assert!(err.to_string().contains("not a management group snapshot"));
}

#[tokio::test]
async fn test_create_then_open_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scom01.duckdb");
    {
        let s = DuckDbSession::create("scom01", &path).unwrap();
        s.insert_object(&computer_class(), "web01", "Microsoft.Windows.Computer:web01")
            .unwrap();
    }
    let s = DuckDbSession::open("scom01", &path).unwrap();
    let found = s.instances_by_display_name(&["web01"]).await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_classes_by_name_skips_unknown() {
    let s = session();
    s.insert_class("Microsoft.Windows.Computer", "Windows Computer")
        .unwrap();
    let classes = s
        .classes_by_name(&[
            ClassName::new("microsoft.windows.computer"),
            ClassName::new("Contoso.Missing"),
        ])
        .await
        .unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].display_name, "Windows Computer");
}

#[tokio::test]
async fn test_instances_of_class_in_insertion_order() {
    let s = session();
    let class = s
        .insert_class("Microsoft.Windows.Computer", "Windows Computer")
        .unwrap();
    for name in ["b", "a", "c"] {
        s.insert_object(&class.name, name, name).unwrap();
    }
    s.insert_object(&ClassName::new("Microsoft.Windows.Cluster"), "x", "x")
        .unwrap();
    let names: Vec<_> = s
        .instances_of_class(&class)
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.display_name)
        .collect();
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[tokio::test]
async fn test_related_objects_direct_and_recursive() {
    let s = session();
    let farm_class = s.insert_class("Farm", "Farm").unwrap();
    let server_class = s.insert_class("Server", "Server").unwrap();
    let farm = s.insert_object(&farm_class.name, "farm", "farm").unwrap();
    let group = s
        .insert_object(&ClassName::new("Group"), "group", "group")
        .unwrap();
    let server = s.insert_object(&server_class.name, "sp01", "sp01").unwrap();
    s.relate(&farm, &group).unwrap();
    s.relate(&group, &server).unwrap();

    let direct = s
        .related_objects(&farm, Some(&server_class), Traversal::Direct)
        .await
        .unwrap();
    assert!(direct.is_empty());

    let recursive = s
        .related_objects(&farm, Some(&server_class), Traversal::Recursive)
        .await
        .unwrap();
    assert_eq!(recursive.len(), 1);
    assert_eq!(recursive[0].id, server.id);
}

#[tokio::test]
async fn test_recursive_traversal_survives_cycles() {
    let s = session();
    let class = ClassName::new("Node");
    let a = s.insert_object(&class, "a", "a").unwrap();
    let b = s.insert_object(&class, "b", "b").unwrap();
    s.relate(&a, &b).unwrap();
    s.relate(&b, &a).unwrap();
    let found = s
        .related_objects(&a, None, Traversal::Recursive)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, b.id);
}

#[tokio::test]
async fn test_parent_objects() {
    let s = session();
    let computer = s.insert_object(&computer_class(), "sql01", "sql01").unwrap();
    let engine = s
        .insert_object(&ClassName::new("Microsoft.SQLServer.DBEngine"), "MSSQLSERVER", "e")
        .unwrap();
    s.relate(&computer, &engine).unwrap();
    let parents = s.parent_objects(&engine).await.unwrap();
    assert_eq!(parents.len(), 1);
    assert_eq!(parents[0].id, computer.id);
}

#[tokio::test]
async fn test_read_property_absent_unset_and_text() {
    let s = session();
    let obj = s.insert_object(&computer_class(), "web01", "web01").unwrap();
    assert_eq!(s.read_property(&obj, "AssetStatus").await.unwrap(), None);

    s.declare_property(&obj, "AssetStatus", &PropertyValue::Unset)
        .unwrap();
    assert_eq!(
        s.read_property(&obj, "AssetStatus").await.unwrap(),
        Some(PropertyValue::Unset)
    );

    s.declare_property(&obj, "Server", &PropertyValue::Text("SQL01\\SP".into()))
        .unwrap();
    assert_eq!(
        s.read_property(&obj, "server").await.unwrap(),
        Some(PropertyValue::Text("SQL01\\SP".into()))
    );
}

#[tokio::test]
async fn test_write_enumeration_and_read_back() {
    let s = session();
    let deployed = EnumerationValue {
        management_pack: "System.Library".into(),
        path: "System.AssetStatus.Deployed".into(),
        display_name: "Deployed".into(),
    };
    s.insert_enumeration(&deployed).unwrap();
    let obj = s.insert_object(&computer_class(), "web01", "web01").unwrap();
    s.declare_property(&obj, "AssetStatus", &PropertyValue::Unset)
        .unwrap();

    s.write_property(&obj, "AssetStatus", PropertyValue::Enumeration(deployed.clone()))
        .await
        .unwrap();

    assert_eq!(
        s.read_property(&obj, "AssetStatus").await.unwrap(),
        Some(PropertyValue::Enumeration(deployed))
    );
}

#[tokio::test]
async fn test_write_undeclared_property_fails() {
    let s = session();
    let obj = s.insert_object(&computer_class(), "web01", "web01").unwrap();
    let err = s
        .write_property(&obj, "AssetStatus", PropertyValue::Text("x".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::PropertyNotDeclared { .. }));
}

#[tokio::test]
async fn test_lookup_enumeration() {
    let s = session();
    s.insert_enumeration(&EnumerationValue {
        management_pack: "System.Library".into(),
        path: "System.AssetStatus.Retired".into(),
        display_name: "Retired".into(),
    })
    .unwrap();
    let found = s
        .lookup_enumeration("System.Library", "System.AssetStatus.Retired")
        .await
        .unwrap();
    assert_eq!(found.unwrap().display_name, "Retired");
    assert!(s
        .lookup_enumeration("Other.Pack", "System.AssetStatus.Retired")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_monitor_states() {
    let s = session();
    let obj = s.insert_object(&computer_class(), "web01", "web01").unwrap();
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
    s.insert_monitor_state(
        &obj,
        &MonitorState {
            monitor: "Availability".into(),
            health: HealthState::Warning,
            last_modified: at,
        },
    )
    .unwrap();
    let states = s.monitor_states(&obj).await.unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(states[0].health, HealthState::Warning);
    assert_eq!(states[0].last_modified, at);
}

#[tokio::test]
async fn test_performance_samples_filter_window_and_instance() {
    let s = session();
    let obj = s.insert_object(&computer_class(), "web01", "web01").unwrap();
    let end = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let total = CounterPath {
        object: "Processor".into(),
        counter: "% Processor Time".into(),
        instance: Some("_Total".into()),
    };
    let core0 = CounterPath {
        instance: Some("0".into()),
        ..total.clone()
    };
    for (hours_ago, value) in [(30, 99.0), (3, 10.0), (1, 20.0)] {
        s.insert_perf_sample(
            &obj,
            &total,
            &PerfSample {
                timestamp: end - Duration::hours(hours_ago),
                value,
            },
        )
        .unwrap();
    }
    s.insert_perf_sample(
        &obj,
        &core0,
        &PerfSample {
            timestamp: end - Duration::hours(1),
            value: 50.0,
        },
    )
    .unwrap();

    let window = TimeWindow::last_hours(end, 24);
    let samples = s.performance_samples(&obj, &total, &window).await.unwrap();
    let values: Vec<f64> = samples.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![10.0, 20.0]);

    let any_instance = CounterPath {
        instance: None,
        ..total
    };
    let samples = s
        .performance_samples(&obj, &any_instance, &window)
        .await
        .unwrap();
    assert_eq!(samples.len(), 3);
}
