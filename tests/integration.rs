use std::path::Path;
use std::process::Command;

fn helpview_cmd(fixture: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_helpview"));
    cmd.current_dir(Path::new("tests/fixtures").join(fixture));
    cmd
}

#[test]
fn render_resolves_figures() {
    let out = helpview_cmd("basic").args(["render", "index.html"]).output().unwrap();
    assert!(
        out.status.success(),
        "render failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(r#"<img src="docs/figures/overview.png""#), "stdout: {stdout}");
}

#[test]
fn render_scrolls_to_anchor_after_display() {
    let out = helpview_cmd("basic")
        .args(["render", "index.html", "--anchor", "usage"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("anchor `usage` at line"), "stdout: {stdout}");
}

#[test]
fn render_follow_jumps_to_anchor() {
    let out = helpview_cmd("basic")
        .args(["render", "index.html", "--follow", "#usage"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("anchor `usage` at line"), "stdout: {stdout}");
}

#[test]
fn missing_document_falls_back_to_default_page() {
    let out = helpview_cmd("basic").args(["render", "nope.html"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Pick a topic"), "stdout: {stdout}");
}

#[test]
fn double_failure_shows_fixed_message() {
    let out = helpview_cmd("broken").args(["render", "nope.html"]).output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("The selected help file is not yet available."),
        "stdout: {stdout}"
    );
}

#[test]
fn check_passes_on_resolvable_figures() {
    let out = helpview_cmd("basic").arg("check").output().unwrap();
    assert!(
        out.status.success(),
        "check failed: {}",
        String::from_utf8_lossy(&out.stdout)
    );
}

#[test]
fn check_reports_missing_figures() {
    let out = helpview_cmd("broken").arg("check").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("MISSING"), "stdout: {stdout}");
    assert!(stdout.contains("ghost.png"), "stdout: {stdout}");
}

#[test]
fn check_json_reports_missing_figures() {
    let out = helpview_cmd("broken").args(["check", "--format", "json"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["missing"][0]["figure"], "ghost.png");
}
