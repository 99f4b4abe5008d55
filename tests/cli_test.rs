// CLI-level tests that run the compiled binary without a browser

use std::process::{Command, Stdio};

/// Helper to run the dpc3848v binary
fn run_dpc3848v(args: &[&str]) -> std::process::Output {
    let binary_path = env!("CARGO_BIN_EXE_dpc3848v");
    Command::new(binary_path)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute dpc3848v")
}

#[test]
fn test_help_runs() {
    let result = run_dpc3848v(&["--help"]);

    assert!(result.status.success());
    let output = String::from_utf8_lossy(&result.stdout);
    assert!(output.contains("Toggle the WiFi radios"));
    assert!(output.contains("--bands"));
}

#[test]
fn test_invalid_action_exits_one() {
    let result = run_dpc3848v(&[
        "frobnicate",
        "--url",
        "http://192.168.0.1",
        "-u",
        "admin",
        "-p",
        "secret",
    ]);

    assert_eq!(result.status.code(), Some(1));

    // Errors land on stdout as JSON for programmatic consumption
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("\"error\":true"));
    assert!(stdout.contains("frobnicate"));
}

#[test]
fn test_invalid_url_exits_one() {
    let result = run_dpc3848v(&[
        "on",
        "--url",
        "ftp://192.168.0.1",
        "-u",
        "admin",
        "-p",
        "secret",
    ]);

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("ftp"));
}

#[test]
fn test_closed_stdin_prompt_exits_one() {
    // No action argument and no stdin to prompt from
    let result = run_dpc3848v(&[]);

    assert_eq!(result.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("stdin"));
}

#[test]
fn test_unsupported_browser_exits_one() {
    let result = run_dpc3848v(&[
        "on",
        "--url",
        "http://192.168.0.1",
        "-u",
        "admin",
        "-p",
        "secret",
        "--browser",
        "lynx",
    ]);

    assert_eq!(result.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("lynx"));
}
