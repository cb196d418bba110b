//! Exit behaviour of the `evo-trace` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn run_in(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_evo-trace"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_missing_trace_exits_early() {
    let dir = tempdir().unwrap();

    let output = run_in(dir.path());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout.lines().count(), 1, "stdout: {}", stdout);
    assert!(stdout.contains("progress.json"), "stdout: {}", stdout);
    assert!(stdout.contains("go run main.go"), "stdout: {}", stdout);
    assert!(!dir.path().join("progress.gif").exists());
}

#[test]
fn test_malformed_trace_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("progress.json"), "{\"pops\": [\n").unwrap();

    let output = run_in(dir.path());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("line 1"), "stderr: {}", stderr);
    assert!(!dir.path().join("progress.gif").exists());
}

#[test]
fn test_renders_with_config_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("evo-trace.json"),
        r#"{"grid_resolution": 20, "width": 32, "height": 32}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("progress.json"),
        concat!(
            r#"{"pops":[{"indis":[{"genome":[0,0]},{"genome":[1,1]}]}]}"#,
            "\n",
            r#"{"pops":[{"indis":[{"genome":[2,2]},{"genome":[3,3]}]}]}"#,
            "\n",
        ),
    )
    .unwrap();

    let output = run_in(dir.path());
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(dir.path().join("progress.gif").is_file());
}
