//! Integration tests for the `congreso` CLI binary.
//!
//! Argument parsing, completions and the offline commands run without a
//! CMS; fetch/content tests point the binary at a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `congreso` binary with env isolation.
///
/// Clears `CONGRESO_*` variables and points config directories at `home`
/// so tests never touch a real configuration.
fn congreso_cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("congreso");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("RUST_LOG")
        .env_remove("CONGRESO_BACKEND_URL")
        .env_remove("CONGRESO_API_TOKEN")
        .env_remove("CONGRESO_OUTPUT")
        .env_remove("CONGRESO_INSECURE")
        .env_remove("CONGRESO_TIMEOUT")
        .env_remove("CONGRESO_BIND")
        .env("CONGRESO_FETCH__RETRY_DELAY_MS", "10");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = congreso_cmd(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    congreso_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("fetch")
            .and(predicate::str::contains("content"))
            .and(predicate::str::contains("carousel"))
            .and(predicate::str::contains("serve")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    congreso_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("congreso"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    congreso_cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
    congreso_cmd(&home)
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    let output = congreso_cmd(&home).arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("foobar"));
}

#[test]
fn test_invalid_output_format() {
    let home = TempDir::new().unwrap();
    let output = congreso_cmd(&home)
        .args(["--output", "xml", "countdown", "--date", "2000-01-01"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("possible values"));
}

#[test]
fn test_per_view_conflicts_with_breakpoints() {
    let home = TempDir::new().unwrap();
    congreso_cmd(&home)
        .args([
            "carousel", "simulate", "--items", "6", "--per-view", "2", "--mobile", "1",
            "--tablet", "2", "--desktop", "3",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_step_is_rejected() {
    let home = TempDir::new().unwrap();
    congreso_cmd(&home)
        .args(["carousel", "simulate", "--items", "6", "--steps", "next,jump"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown step"));
}

// ── Carousel simulation ─────────────────────────────────────────────

#[test]
fn test_paged_carousel_wraps() {
    let home = TempDir::new().unwrap();
    let output = congreso_cmd(&home)
        .args([
            "-o", "json", "carousel", "simulate", "--items", "10", "--per-view", "4", "--steps",
            "next,next,next",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let states = stdout_json(&output);
    let indices: Vec<u64> = states
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["index"].as_u64().unwrap())
        .collect();
    assert_eq!(indices, vec![0, 1, 2, 0]);
}

#[test]
fn test_looping_carousel_page_jump() {
    let home = TempDir::new().unwrap();
    let output = congreso_cmd(&home)
        .args([
            "-o", "json", "carousel", "simulate", "--items", "8", "--per-view", "3", "--loop",
            "--steps", "page:2",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let states = stdout_json(&output);
    assert_eq!(states[1]["index"], 6);
    assert_eq!(states[1]["page"], 2);
}

#[test]
fn test_responsive_items_follow_width() {
    let home = TempDir::new().unwrap();
    for (width, expected) in [("1280", 4), ("800", 2), ("400", 1)] {
        let output = congreso_cmd(&home)
            .args([
                "-o", "json", "carousel", "simulate", "--items", "12", "--mobile", "1",
                "--tablet", "2", "--desktop", "4", "--width", width,
            ])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(stdout_json(&output)[0]["per_view"], expected, "width {width}");
    }
}

#[test]
fn test_carousel_table_output() {
    let home = TempDir::new().unwrap();
    congreso_cmd(&home)
        .args(["carousel", "simulate", "--items", "5", "--per-view", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Index").and(predicate::str::contains("start")));
}

// ── Countdown ───────────────────────────────────────────────────────

#[test]
fn test_countdown_past_date_is_zero() {
    let home = TempDir::new().unwrap();
    let output = congreso_cmd(&home)
        .args(["-o", "json", "countdown", "--date", "2000-01-01"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!({ "days": 0, "hours": 0, "minutes": 0, "seconds": 0 })
    );
}

#[test]
fn test_countdown_rejects_garbage_date() {
    let home = TempDir::new().unwrap();
    congreso_cmd(&home)
        .args(["countdown", "--date", "next tuesday"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("event date"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();
    congreso_cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_merges_env_and_flags() {
    let home = TempDir::new().unwrap();
    let output = congreso_cmd(&home)
        .env("CONGRESO_FETCH__RETRY_COUNT", "0")
        .args(["-o", "json", "--backend", "https://cms.example.org", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let cfg = stdout_json(&output);
    assert_eq!(cfg["fetch"]["retry_count"], 0);
    assert_eq!(cfg["backend"]["url"], "https://cms.example.org");
}

#[test]
fn test_config_show_redacts_token() {
    let home = TempDir::new().unwrap();
    congreso_cmd(&home)
        .args(["--api-token", "s3cret", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("s3cret").not());
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    congreso_cmd(&home).args(["config", "init"]).assert().success();
    congreso_cmd(&home)
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
    congreso_cmd(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

// ── Against a mock CMS ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_fetch_prints_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/home-page"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": 1 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = congreso_cmd(&home)
        .args(["-o", "json", "--backend", &server.uri(), "fetch", "/api/home-page"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(stdout_json(&output), json!({ "data": { "id": 1 } }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_fetch_not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/talleres"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    congreso_cmd(&home)
        .args(["--backend", &server.uri(), "fetch", "/api/talleres?populate=*"])
        .assert()
        .code(4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_fetch_retries_are_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    congreso_cmd(&home)
        .args(["--backend", &server.uri(), "fetch", "/api/home-page", "--retries", "2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("500"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_content_workshops() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/talleres"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 3, "attributes": { "title": "Lactancia" } },
                { "id": 4, "title": "Vacunas" }
            ]
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    congreso_cmd(&home)
        .args(["-o", "plain", "--backend", &server.uri(), "content", "workshops"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lactancia").and(predicate::str::contains("Vacunas")));
}

#[test]
fn test_unreachable_backend_is_connection_error() {
    let home = TempDir::new().unwrap();
    congreso_cmd(&home)
        .args(["--backend", "http://127.0.0.1:9", "content", "hero"])
        .assert()
        .code(7);
}
