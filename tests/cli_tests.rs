// CLI tests: spawn the built binary in modes that never touch Homebrew


use std::process::Command;
use test_helpers::TestEnvironment;

fn brewstrap() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_brewstrap"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_file_flag_is_required() {
    let output = brewstrap().output().expect("Failed to run brewstrap");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--file"));
}

#[test]
fn test_missing_file_fails() {
    let env = TestEnvironment::with_brewfile("");
    let missing = env.missing_file();

    let output = brewstrap()
        .args(["--no-bootstrap", "--brew", "brewstrap-test-no-such-brew", "-f"])
        .arg(&missing)
        .output()
        .expect("Failed to run brewstrap");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("File not found"));
    assert!(stdout.contains(&missing.display().to_string()));
}

#[test]
fn test_dry_run_prints_commands() {
    let env = TestEnvironment::with_brewfile("tap \"user/repo\"\n# comment\nbrew \"wget\"\n");

    let output = brewstrap()
        .arg("--dry-run")
        .arg("--file")
        .arg(&env.brewfile)
        .output()
        .expect("Failed to run brewstrap");

    assert!(
        output.status.success(),
        "dry run should succeed. stdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Would run: brew tap user/repo"));
    assert!(stdout.contains("Would run: brew install wget"));
}

#[test]
fn test_malformed_directive_fails() {
    let env = TestEnvironment::with_brewfile("brew wget\n");

    let output = brewstrap()
        .arg("--dry-run")
        .arg("-f")
        .arg(&env.brewfile)
        .output()
        .expect("Failed to run brewstrap");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Malformed directive"));
    assert!(stdout.contains("brew wget"));
}

#[test]
fn test_unrunnable_brew_fails() {
    let env = TestEnvironment::with_brewfile("brew \"wget\"\nbrew \"jq\"\n");

    let output = brewstrap()
        .args(["--no-bootstrap", "--brew", "brewstrap-test-no-such-brew", "-f"])
        .arg(&env.brewfile)
        .output()
        .expect("Failed to run brewstrap");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Failed to install: brew \"wget\""));
}

#[cfg(not(target_os = "macos"))]
#[test]
fn test_cask_skipped_off_macos() {
    let env = TestEnvironment::with_brewfile("cask \"foo\"\nbrew \"wget\"\n");

    let output = brewstrap()
        .arg("--dry-run")
        .arg("-f")
        .arg(&env.brewfile)
        .output()
        .expect("Failed to run brewstrap");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cask cask \"foo\" skipped"));
    assert!(!stdout.contains("--cask"));
    assert!(stdout.contains("Would run: brew install wget"));
}
