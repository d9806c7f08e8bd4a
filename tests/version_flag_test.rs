use std::process::Command;

fn stepgate() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_stepgate"));
    // Keep the user's configuration out of the way
    for name in [
        "STEPGATE_SERVER",
        "STEPGATE_TLS",
        "STEPGATE_RECONNECT_MS",
        "STEPGATE_LOG_FILE",
    ] {
        cmd.env_remove(name);
    }
    cmd
}

#[test]
fn test_version_flag() {
    let output = stepgate()
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.trim().strip_prefix("stepgate ").unwrap_or("");
    assert_eq!(version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_short_version_flag() {
    let output = stepgate().arg("-V").output().expect("Failed to execute binary");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("stepgate "));
}

#[test]
fn test_help_lists_options() {
    let output = stepgate()
        .arg("--help")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--server"));
    assert!(stdout.contains("--health"));
}

#[test]
fn test_unknown_flag_exits_with_usage_error() {
    let output = stepgate()
        .arg("--bogus")
        .output()
        .expect("Failed to execute binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown argument: --bogus"));
    assert!(stderr.contains("Usage: stepgate"));
}

#[test]
fn test_health_against_unreachable_server_fails() {
    // Port 9 (discard) is closed on test machines
    let output = stepgate()
        .args(["--health", "--server", "127.0.0.1:9"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
}
