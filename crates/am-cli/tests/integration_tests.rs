//! CLI integration tests for assetmon
//!
//! Each test exports a small management group snapshot into a temporary
//! project directory and drives the `am` binary against it.

use am_core::{AssetStatus, ClassName, CounterPath, EnumerationValue, PerfSample, PropertyValue};
use am_session::DuckDbSession;
use chrono::{Duration, Utc};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const FARM: &str = "Microsoft.SharePoint.Foundation.2013.SPFarm";
const SERVER: &str = "Microsoft.SharePoint.Foundation.2013.SPServer";
const CONFIG_DB: &str = "Microsoft.SharePoint.Foundation.2013.SPConfigurationDatabase";
const COMPUTER: &str = "Microsoft.Windows.Computer";
const ENGINE: &str = "Microsoft.SQLServer.DBEngine";
const WEB_APP: &str = "Microsoft.SharePoint.Foundation.2013.SPWebApplication";

/// Path to the compiled am binary (resolved at compile time)
fn am_bin() -> String {
    env!("CARGO_BIN_EXE_am").to_string()
}

/// Write assetmon.yml and an HR_Config farm snapshot into a new directory.
///
/// The farm has two web servers with one web application each and a
/// database engine on sql01. `farm_count` farms all share the name.
fn project(farm_count: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("assetmon.yml"),
        "default_server: scom01\nservers:\n  scom01:\n    snapshot: scom01.duckdb\n",
    )
    .unwrap();
    build_snapshot(&dir.path().join("scom01.duckdb"), farm_count);
    dir
}

fn build_snapshot(path: &Path, farm_count: usize) {
    let session = DuckDbSession::create("scom01", path).unwrap();
    for (name, display) in [
        (FARM, "SharePoint 2013 Farm"),
        (SERVER, "SharePoint 2013 Server"),
        (CONFIG_DB, "SharePoint 2013 Configuration Database"),
        (COMPUTER, "Windows Computer"),
        (ENGINE, "SQL Server DB Engine"),
        (WEB_APP, "SharePoint 2013 Web Application"),
    ] {
        session.insert_class(name, display).unwrap();
    }
    for status in AssetStatus::ALL {
        session
            .insert_enumeration(&EnumerationValue {
                management_pack: "System.Library".to_string(),
                path: status.enumeration_path("System.AssetStatus"),
                display_name: status.as_str().to_string(),
            })
            .unwrap();
    }

    let class = |name: &str| ClassName::new(name);
    let unset = PropertyValue::Unset;

    let sql01 = session
        .insert_object(&class(COMPUTER), "sql01.contoso.com", "sql01.contoso.com")
        .unwrap();
    session.declare_property(&sql01, "AssetStatus", &unset).unwrap();
    let engine = session
        .insert_object(&class(ENGINE), "SQL01\\SHAREPOINT", "SQL01\\SHAREPOINT")
        .unwrap();
    session.relate(&sql01, &engine).unwrap();

    for i in 0..farm_count {
        let farm = session
            .insert_object(&class(FARM), "HR_Config", &format!("Farm_{}", i))
            .unwrap();
        session.declare_property(&farm, "AssetStatus", &unset).unwrap();
        let config_db = session
            .insert_object(&class(CONFIG_DB), "SharePoint_Config", "SharePoint_Config")
            .unwrap();
        session.relate(&farm, &config_db).unwrap();
        session
            .declare_property(&config_db, "Server", &PropertyValue::Text("SQL01".into()))
            .unwrap();

        for web in ["web01", "web02"] {
            let name = format!("{}-{}.contoso.com", web, i);
            let server = session.insert_object(&class(SERVER), &name, &name).unwrap();
            session.relate(&farm, &server).unwrap();
            let computer = session.insert_object(&class(COMPUTER), &name, &name).unwrap();
            session.relate(&computer, &server).unwrap();
            session.declare_property(&computer, "AssetStatus", &unset).unwrap();

            let web_app = session
                .insert_object(
                    &class(WEB_APP),
                    &format!("Portal on {}", name),
                    &format!("WebApplication_{}", name),
                )
                .unwrap();
            session.relate(&computer, &web_app).unwrap();
            session.declare_property(&web_app, "AssetStatus", &unset).unwrap();
        }
    }

    let counter = CounterPath {
        object: "Processor".to_string(),
        counter: "% Processor Time".to_string(),
        instance: Some("_Total".to_string()),
    };
    let now = Utc::now();
    for (hours_ago, value) in [(1, 20.0), (2, 40.0), (48, 99.0)] {
        session
            .insert_perf_sample(
                &sql01,
                &counter,
                &PerfSample {
                    timestamp: now - Duration::hours(hours_ago),
                    value,
                },
            )
            .unwrap();
    }
}

fn am(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(am_bin())
        .args(args)
        .args(["--project-dir", dir.path().to_str().unwrap(), "--no-input"])
        .env_remove("AM_MANAGEMENT_SERVER")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run am")
}

fn json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed.\nstdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

// ── am set-status / get-status ──────────────────────────────────────────

#[test]
fn test_set_status_on_farm_updates_every_target() {
    let dir = project(1);

    let output = am(&dir, &["set-status", "farm", "--name", "HR_Config", "--status", "Deployed"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "set-status failed.\nstdout: {}\nstderr: {}",
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Deployed"));

    let status = json(&am(&dir, &["get-status", "farm", "--name", "hr_config", "-o", "json"]));
    let roots = status.as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["root"], "HR_Config");
    assert_eq!(roots[0]["version"], 2013);

    // farm, 2 computers, 2 web applications, database host
    let objects = roots[0]["objects"].as_array().unwrap();
    assert_eq!(objects.len(), 6);
    assert!(objects.iter().all(|o| o["status"] == "Deployed"));
    assert!(objects
        .iter()
        .any(|o| o["display_name"] == "sql01.contoso.com"));
}

#[test]
fn test_get_status_before_any_update_is_empty() {
    let dir = project(1);

    let status = json(&am(&dir, &["get-status", "computer", "--name", "sql01.contoso.com", "-o", "json"]));
    let objects = status[0]["objects"].as_array().unwrap();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0]["status"], "");
}

#[test]
fn test_set_status_on_database_engine() {
    let dir = project(1);

    let output = am(
        &dir,
        &["set-status", "database", "--name", "SQL01\\SHAREPOINT", "--status", "retired"],
    );
    assert!(output.status.success());

    let status = json(&am(&dir, &["get-status", "computer", "--name", "sql01.contoso.com", "-o", "json"]));
    assert_eq!(status[0]["objects"][0]["status"], "Retired");
}

#[test]
fn test_duplicate_farm_names_fail_without_input() {
    let dir = project(2);

    let output = am(&dir, &["set-status", "farm", "--name", "HR_Config", "--status", "Deployed"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("R002"), "stderr: {}", stderr);
}

#[test]
fn test_all_farms_without_name() {
    let dir = project(2);

    let status = json(&am(&dir, &["get-status", "farm", "-o", "json"]));
    assert_eq!(status.as_array().unwrap().len(), 2);
}

#[test]
fn test_unknown_farm_fails() {
    let dir = project(1);

    let output = am(&dir, &["get-status", "farm", "--name", "Payroll"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("R001"), "stderr: {}", stderr);
}

#[test]
fn test_unknown_management_server_is_a_connection_error() {
    let dir = project(1);

    let output = am(
        &dir,
        &["get-status", "farm", "--management-server", "scom99"],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Could not connect"), "stderr: {}", stderr);
    assert!(stderr.contains("--management-server"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_config_fails() {
    let dir = project(1);
    std::fs::write(dir.path().join("assetmon.yml"), "unknown_key: 1\n").unwrap();

    let output = am(&dir, &["get-status", "farm"]);
    assert!(!output.status.success());
}

// ── am dashboard ────────────────────────────────────────────────────────

#[test]
fn test_dashboard_lists_instances() {
    let dir = project(1);

    let rows = json(&am(
        &dir,
        &["dashboard", "--class", COMPUTER, "--name", "web", "-o", "json"],
    ));
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["health"] == "Uninitialized"));
}

// ── am perf ─────────────────────────────────────────────────────────────

#[test]
fn test_perf_summarizes_recent_samples() {
    let dir = project(1);

    let stats = json(&am(
        &dir,
        &[
            "perf",
            "--name",
            "sql01.contoso.com",
            "--object",
            "Processor",
            "--counter",
            "% Processor Time",
            "--instance",
            "_Total",
            "--hours",
            "24",
            "-o",
            "json",
        ],
    ));
    let stats = stats.as_array().unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["samples"], 2);
    assert_eq!(stats[0]["average"], 30.0);
    assert_eq!(stats[0]["latest"], 20.0);
}
