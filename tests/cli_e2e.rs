//! End-to-end CLI tests for the recognitions binary.

// `Command::cargo_bin` is deprecated in assert_cmd >=2.0.17 in favor of
// `cargo::cargo_bin_cmd!` macro. Suppressed until migration to the new API.
#![allow(deprecated)]

mod support;
use support::socket_guard::start_mock_server_or_skip;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn write_config(config_home: &std::path::Path, contents: &str) {
    let config_dir = config_home.join("recognitions");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), contents).unwrap();
}

fn recognitions(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("recognitions").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_binary_help_lists_subcommands() {
    let tempdir = TempDir::new().unwrap();
    recognitions(tempdir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("publish-channel"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_binary_requires_content_host() {
    let tempdir = TempDir::new().unwrap();
    recognitions(tempdir.path())
        .args(["-q", "generate", "/content/screens/main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No content host configured"));
}

#[test]
fn test_binary_rejects_unknown_config_key() {
    let tempdir = TempDir::new().unwrap();
    write_config(tempdir.path(), "concurrency = 4\n");
    recognitions(tempdir.path())
        .args(["stats", "/content/org-a/recognitions.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_binary_rejects_missing_explicit_config() {
    let tempdir = TempDir::new().unwrap();
    recognitions(tempdir.path())
        .arg("--config")
        .arg(tempdir.path().join("absent.toml"))
        .args(["stats", "/a/recognitions.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[tokio::test]
async fn test_binary_generate_writes_snapshots_and_manifest() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/content/screens/poster"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><meta name="template" content="default"></head>
               <body><main><img src="./media_poster.png?width=750"></main></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let config_home = tempdir.path().join("xdg-config");
    write_config(
        &config_home,
        &format!("host = \"{}\" # mock site\n", mock_server.uri()),
    );
    let output_dir = tempdir.path().join("bundle");
    let manifest = tempdir.path().join("manifest.json");

    recognitions(&config_home)
        .args(["-q", "generate", "/content/screens/poster", "-o"])
        .arg(&output_dir)
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("/media_poster.png"))
        .stdout(predicate::str::contains("/content/screens/poster.plain.html"));

    assert!(output_dir.join("content/screens/poster.html").exists());
    let written = std::fs::read_to_string(&manifest).unwrap();
    assert!(written.contains("/media_poster.png"));
}

#[tokio::test]
async fn test_binary_stats_prints_summary() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/content/org-hr/recognitions.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{":type":"sheet","data":[{"LDAP":"jdoe","Description":"Thanks"}]}"#,
        ))
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    recognitions(tempdir.path())
        .args(["-q", "stats", "/content/org-hr/recognitions.json", "--host"])
        .arg(mock_server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("| hr | 1 | 1 | 0 | 0 | 1 |"));
}

#[tokio::test]
async fn test_binary_render_prints_track() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/content/dashboards/lobby"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><main><div class="carousel dashboards">
                 <div><div><picture><img src="./media_kpi.png"></picture></div></div>
               </div></main></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    recognitions(tempdir.path())
        .args(["-q", "render", "/content/dashboards/lobby", "--host"])
        .arg(mock_server.uri())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"<div class="carousel-track"><div class="carousel-item""#))
        .stdout(predicate::str::contains("./media_kpi.png"));
}
