//! Integration tests for command mode (-c/--command flag) and sheet files

use std::io::Write;
use std::process::{Command, Stdio};

fn calcsheet() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg("run")
        .arg("-q")
        .arg("--")
        // Tests must be deterministic and not depend on a user's ~/.config/calcsheet.
        .arg("--no-default-functions")
        .arg("--no-config");
    cmd
}

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = calcsheet()
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn run_with_stdin(args: &[&str], input: &str) -> (String, i32) {
    let mut child = calcsheet()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    (stdout, output.status.code().unwrap_or(-1))
}

#[test]
fn test_basic_arithmetic() {
    let (stdout, _, code) = run_command(&["-c", "5 + 3"]);
    assert_eq!(stdout.trim(), "8");
    assert_eq!(code, 0);
}

#[test]
fn test_sheet_from_commands() {
    let (stdout, _, code) = run_command(&["-c", "x = 10", "-c", "y = 15", "-c", "z = x + y"]);
    assert_eq!(stdout.trim(), "x = 10\ny = 15\nz = 25");
    assert_eq!(code, 0);
}

#[test]
fn test_percentage_shorthand() {
    let (stdout, _, code) = run_command(&["-c", "20% of 50", "-c", "25% off 80"]);
    assert_eq!(stdout.trim(), "10\n60");
    assert_eq!(code, 0);
}

#[test]
fn test_precision() {
    let (stdout, _, _) = run_command(&["-c", "1 / 3"]);
    assert_eq!(stdout.trim(), "0.33333333333333");
}

#[test]
fn test_failure_exit_code() {
    let (stdout, _, code) = run_command(&["-c", "x = foo(", "-c", "y = x + 1", "-c", "2"]);
    assert_eq!(stdout.trim(), "Invalid assignment\nInvalid expression\n2");
    assert_eq!(code, 1);
}

#[test]
fn test_side_by_side() {
    let (stdout, _, _) = run_command(&["-s", "-c", "a = 2", "-c", "a * 21"]);
    assert_eq!(stdout, "a = 2  │ a = 2\na * 21 │ 42\n");
}

#[test]
fn test_sheet_from_stdin() {
    let (stdout, code) = run_with_stdin(&["-"], "x = 5\ny = x + 1\n\ny * 2\n");
    assert_eq!(stdout, "x = 5\ny = 6\n\n12\n");
    assert_eq!(code, 0);
}

#[test]
fn test_sheet_file_with_functions() {
    let dir = std::env::temp_dir();
    let sheet = dir.join(format!("calcsheet_cli_sheet_{}.txt", std::process::id()));
    let funcs = dir.join(format!("calcsheet_cli_funcs_{}.rhai", std::process::id()));
    std::fs::write(&sheet, "price = 80\ntax(price)\n").unwrap();
    std::fs::write(&funcs, "fn tax(x) { x * 0.2 }").unwrap();

    let (stdout, _, code) = run_command(&[
        "-f",
        funcs.to_str().unwrap(),
        sheet.to_str().unwrap(),
    ]);

    let _ = std::fs::remove_file(&sheet);
    let _ = std::fs::remove_file(&funcs);

    assert_eq!(stdout.trim(), "price = 80\n16");
    assert_eq!(code, 0);
}

#[test]
fn test_interactive_session() {
    let (stdout, code) = run_with_stdin(&["-i"], "x = 4\nx ^ 2\n:edit 1 x = 5\n:quit\n");
    assert!(stdout.contains("x = 4"));
    assert!(stdout.contains("16"));
    assert!(stdout.contains("25"));
    assert_eq!(code, 0);
}

#[test]
fn test_missing_file() {
    let (_, stderr, code) = run_command(&["/definitely/not/here.calc"]);
    assert!(stderr.contains("Failed to read"));
    assert_eq!(code, 1);
}

#[test]
fn test_unknown_option() {
    let (_, stderr, code) = run_command(&["--bogus"]);
    assert!(stderr.contains("Unknown option"));
    assert_eq!(code, 2);
}
