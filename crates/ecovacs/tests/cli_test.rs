//! Integration tests for the `ecovacs` CLI binary.
//!
//! Parsing, help and region resolution run offline. Cloud-facing commands
//! run against a wiremock portal configured through a temp config file.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `ecovacs` binary with env isolation.
fn ecovacs_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ecovacs");
    cmd.env("HOME", "/tmp/ecovacs-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/ecovacs-cli-test-nonexistent")
        .env_remove("ECOVACS_CONFIG")
        .env_remove("ECOVACS_PROFILE")
        .env_remove("ECOVACS_COUNTRY")
        .env_remove("ECOVACS_CONTINENT")
        .env_remove("ECOVACS_OUTPUT")
        .env_remove("ECOVACS_INSECURE")
        .env_remove("ECOVACS_TIMEOUT");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Write a config with a single `home` profile pointed at `portal_url`.
fn config_file(portal_url: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
default_profile = "home"

[profiles.home]
country = "de"
device_id = "client-1"
user_id = "user-1"
token = "tok-1"
portal_url = "{portal_url}"
"#
    )
    .unwrap();
    file
}

fn device(did: &str, company: &str) -> serde_json::Value {
    json!({
        "did": did,
        "name": format!("E0000{did}"),
        "class": "yna5xi",
        "resource": "res1",
        "company": company,
        "nick": "Kitchen",
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = ecovacs_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    ecovacs_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Ecovacs")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("send"))
            .and(predicate::str::contains("portal-url")),
    );
}

#[test]
fn test_version_flag() {
    ecovacs_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ecovacs"));
}

#[test]
fn test_completions_bash() {
    ecovacs_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_invalid_output_format() {
    let output = ecovacs_cmd()
        .args(["devices", "-o", "xml"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Region resolution ───────────────────────────────────────────────

#[test]
fn test_portal_url_for_china() {
    ecovacs_cmd()
        .args(["portal-url", "--country", "CN", "appsvr/app.do"])
        .assert()
        .success()
        .stdout("https://portal.ecouser.net/api/appsvr/app.do\n");
}

#[test]
fn test_portal_url_for_united_states() {
    ecovacs_cmd()
        .args(["portal-url", "--country", "us", "iot/devmanager.do"])
        .assert()
        .success()
        .stdout("https://portal-na.ecouser.net/api/iot/devmanager.do\n");
}

#[test]
fn test_portal_url_continent_override() {
    ecovacs_cmd()
        .args(["portal-url", "--country", "de", "--continent", "ww"])
        .assert()
        .success()
        .stdout("https://portal-ww.ecouser.net/api/\n");
}

#[test]
fn test_portal_url_rejects_bad_country() {
    let output = ecovacs_cmd()
        .args(["portal-url", "--country", "germany"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("country"));
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_missing_profile_is_not_found() {
    let file = config_file("http://127.0.0.1:9/api/");
    let output = ecovacs_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["--profile", "office", "devices"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("office"), "Expected profile name in:\n{text}");
}

#[test]
fn test_config_show_redacts_token() {
    let file = config_file("http://127.0.0.1:9/api/");
    ecovacs_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("<redacted>")
                .and(predicate::str::contains("tok-1").not())
                .and(predicate::str::contains("\"continent\": \"eu\"")),
        );
}

#[test]
fn test_config_path_prefers_flag() {
    let file = config_file("http://127.0.0.1:9/api/");
    ecovacs_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(file.path().to_str().unwrap()));
}

#[test]
fn test_portal_url_keeps_profile_continent_under_country_override() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
default_profile = "home"

[profiles.home]
country = "de"
continent = "eu"
device_id = "client-1"
user_id = "user-1"
token = "tok-1"
"#
    )
    .unwrap();

    ecovacs_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["--country", "us", "portal-url", "appsvr/app.do"])
        .assert()
        .success()
        .stdout("https://portal-eu.ecouser.net/api/appsvr/app.do\n");
}

#[test]
fn test_broken_default_config_is_reported() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("ecovacs");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "default_profile = \"home\"\n\n[profiles.home]\ncountry = \"de\"\ndevice_id = \"client-1\"\n",
    )
    .unwrap();

    let output = ecovacs_cmd()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .args(["config", "show"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("user_id"), "Expected the missing field in:\n{text}");
    assert!(!text.contains("not found"), "Unexpected profile lookup in:\n{text}");
}

#[test]
fn test_config_use_switches_default_profile() {
    let file = config_file("http://127.0.0.1:9/api/");
    let mut extra = std::fs::OpenOptions::new()
        .append(true)
        .open(file.path())
        .unwrap();
    write!(
        extra,
        r#"
[profiles.office]
country = "us"
device_id = "client-2"
user_id = "user-2"
token = "tok-2"
"#
    )
    .unwrap();

    ecovacs_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["config", "use", "office"])
        .assert()
        .success();

    ecovacs_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout("home\noffice *\n");

    ecovacs_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["portal-url"])
        .assert()
        .success()
        .stdout("https://portal-na.ecouser.net/api/\n");
}

#[test]
fn test_config_use_unknown_profile_is_not_found() {
    let file = config_file("http://127.0.0.1:9/api/");
    let output = ecovacs_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["config", "use", "garage"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_send_rejects_scalar_args() {
    let file = config_file("http://127.0.0.1:9/api/");
    let output = ecovacs_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["send", "d1", "setVolume", "--args", "5"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Cloud commands against a mock portal ────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_json_filters_unsupported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/appsvr/app.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "devices": [device("d1", "eco-ng"), device("d2", "eco-legacy")],
        })))
        .mount(&server)
        .await;

    let file = config_file(&format!("{}/api/", server.uri()));
    let config_path = file.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        ecovacs_cmd()
            .arg("--config")
            .arg(&config_path)
            .args(["devices", "-o", "json"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["did"], "d1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_failure_reports_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/appsvr/app.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 1,
            "error": "token error",
            "errno": 3000,
        })))
        .mount(&server)
        .await;

    let file = config_file(&format!("{}/api/", server.uri()));
    let config_path = file.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        ecovacs_cmd()
            .arg("--config")
            .arg(&config_path)
            .arg("devices")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("failure token error (3000) on getting devices"),
        "Expected server message in:\n{text}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_posts_to_device_manager() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/appsvr/app.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "devices": [device("d1", "eco-ng")],
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/iot/devmanager.do"))
        .and(query_param("mid", "yna5xi"))
        .and(query_param("did", "d1"))
        .and(query_param("u", "user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ret": "ok",
            "resp": {"body": {"data": {"value": 100}}},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = config_file(&format!("{}/api/", server.uri()));
    let config_path = file.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        ecovacs_cmd()
            .arg("--config")
            .arg(&config_path)
            .args(["send", "d1", "getBattery", "-o", "json-compact"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#""ret":"ok""#), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_unknown_device_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/appsvr/app.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "devices": [device("d1", "eco-ng")],
        })))
        .mount(&server)
        .await;

    let file = config_file(&format!("{}/api/", server.uri()));
    let config_path = file.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        ecovacs_cmd()
            .arg("--config")
            .arg(&config_path)
            .args(["send", "missing", "getBattery"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(4));
}
