//! Integration tests for the `edgeguard` CLI binary.
//!
//! Parsing, help and error handling run without any server; the API-backed
//! tests point the binary at a wiremock server via `--base-url`.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const NO_CONFIG_DIR: &str = "/tmp/edgeguard-cli-test-nonexistent";

/// Build a command for the `edgeguard` binary with env isolation.
///
/// Clears all `EDGEGUARD_*` env vars and points config directories at
/// `config_dir` so tests never touch the user's real configuration.
fn edgeguard_cmd_in(config_dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("edgeguard");
    cmd.env("HOME", config_dir)
        .env("XDG_CONFIG_HOME", config_dir)
        .env_remove("RUST_LOG")
        .env_remove("EDGEGUARD_PROFILE")
        .env_remove("EDGEGUARD_BASE_URL")
        .env_remove("EDGEGUARD_API_KEY")
        .env_remove("EDGEGUARD_OUTPUT")
        .env_remove("EDGEGUARD_INSECURE")
        .env_remove("EDGEGUARD_TIMEOUT")
        .env_remove("EDGEGUARD_RETRIES");
    cmd
}

fn edgeguard_cmd() -> assert_cmd::Command {
    edgeguard_cmd_in(Path::new(NO_CONFIG_DIR))
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary against `server` off the async runtime.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut argv = vec![
        "--base-url".to_owned(),
        server.uri(),
        "--api-key".to_owned(),
        "APIKey abc123".to_owned(),
    ];
    argv.extend(args.iter().map(|a| (*a).to_owned()));

    tokio::task::spawn_blocking(move || edgeguard_cmd().args(&argv).output().unwrap())
        .await
        .unwrap()
}

fn resource_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "client": 42,
        "active": true,
        "status": "active",
        "service_ip": "203.0.113.5",
        "ssl_type": "le",
        "tls_enabled": ["1.2", "1.3"]
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = edgeguard_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    edgeguard_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("DDoS protection")
            .and(predicate::str::contains("resources"))
            .and(predicate::str::contains("whitelists"))
            .and(predicate::str::contains("origins")),
    );
}

#[test]
fn test_version_flag() {
    edgeguard_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("edgeguard"));
}

#[test]
fn test_subcommand_help() {
    edgeguard_cmd()
        .args(["resources", "create", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--ssl-type")
                .and(predicate::str::contains("--geoip-mode"))
                .and(predicate::str::contains("--from-file")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    edgeguard_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("edgeguard"));
}

#[test]
fn test_completions_invalid_shell() {
    edgeguard_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .code(2);
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    edgeguard_cmd().arg("frobnicate").assert().failure().code(2);
}

#[test]
fn test_invalid_output_format() {
    let output = edgeguard_cmd()
        .args(["-o", "xml", "status", "web"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("xml"));
}

#[test]
fn test_missing_credentials() {
    let output = edgeguard_cmd().args(["status", "web"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(
        combined_output(&output).contains("No API key configured"),
        "{}",
        combined_output(&output)
    );
}

#[test]
fn test_unknown_profile() {
    let output = edgeguard_cmd()
        .args(["-p", "prod", "--api-key", "k", "status", "web"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Profile 'prod' not found"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_set_show_and_use() {
    let dir = tempfile::tempdir().unwrap();

    edgeguard_cmd_in(dir.path())
        .args(["config", "set", "base_url", "https://example.net/protection"])
        .assert()
        .success();
    edgeguard_cmd_in(dir.path())
        .args(["config", "set", "api_key", "super-secret"])
        .assert()
        .success();

    let output = edgeguard_cmd_in(dir.path())
        .args(["-o", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        shown["profiles"]["default"]["base_url"],
        "https://example.net/protection"
    );
    assert_eq!(shown["profiles"]["default"]["api_key"], "****");

    edgeguard_cmd_in(dir.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default *"));

    edgeguard_cmd_in(dir.path())
        .args(["config", "use", "staging"])
        .assert()
        .failure()
        .code(2);

    edgeguard_cmd_in(dir.path())
        .args(["config", "set", "retry_max", "many"])
        .assert()
        .failure()
        .code(2);
}

// ── API-backed ──────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_get_resource_as_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/resources/7"))
        .and(header("authorization", "APIKey abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(resource_json(7, "example.com")))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "json", "resources", "get", "7"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["id"], 7);
    assert_eq!(body["name"], "example.com");
    assert_eq!(body["tls_enabled"], json!(["1.2", "1.3"]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_resource_referenced_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/resources"))
        .and(query_param("name", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [resource_json(12, "example.com")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/resources/12/origins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "origin_data": "198.51.100.7", "origin_mode": "primary" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "plain", "origins", "list", "example.com"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "198.51.100.7");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_tls_version_never_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &["resources", "update", "7", "--tls", "1.2,2.0"],
    )
    .await;
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("tls_enabled"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_entry_exits_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/resources/5/blacklists/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["-y", "blacklists", "delete", "5", "999"]).await;
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Not found."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_requires_confirmation_when_not_interactive() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(&server, &["resources", "delete", "5"]).await;
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_exits_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/web-protection/client-info"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Invalid token." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["status", "web"]).await;
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}
