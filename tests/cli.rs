//! Exercises the binary's argument handling and exit codes.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn icopack_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_icopack"))
}

#[test]
fn no_arguments_exits_2_with_usage() {
    let dir = TempDir::new().unwrap();
    let output = icopack_command()
        .current_dir(dir.path())
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("usage:"), "stderr was: {}", stderr);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn one_argument_exits_2_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let output = icopack_command()
        .arg("input.png")
        .current_dir(dir.path())
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("usage:"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn three_arguments_exit_2_and_write_nothing() {
    let dir = TempDir::new().unwrap();
    let output = icopack_command()
        .args(["a.png", "b.ico", "extra"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("usage:"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn pass_through_invocation_exits_0() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.ico");
    let output_path = dir.path().join("out.ico");
    let bytes = b"\x00\x00\x01\x00\x00\x00".to_vec();
    fs::write(&input, &bytes).unwrap();

    let output = icopack_command()
        .args([&input, &output_path])
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read(&output_path).unwrap(), bytes);
}

#[test]
fn unresolvable_input_exits_nonzero_with_message() {
    let dir = TempDir::new().unwrap();
    let output = icopack_command()
        .args([
            dir.path().join("missing"),
            dir.path().join("out.ico"),
        ])
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(1));
    assert!(!String::from_utf8_lossy(&output.stderr).is_empty());
    assert!(!dir.path().join("out.ico").exists());
}
