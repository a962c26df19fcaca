//! Tests for the brewin binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

fn brewin() -> Command {
    let mut cmd = Command::cargo_bin("brewin").unwrap();
    cmd.env_remove("BREWIN_TRACE").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_runs_script() {
    let file = script("func main void\n  funccall print \"hi \" 3\nendfunc\n");
    brewin()
        .arg(file.path())
        .assert()
        .success()
        .stdout("hi 3\n");
}

#[test]
fn test_reads_input_from_stdin() {
    let file = script(
        "func main void\n  funccall input\n  funccall strtoint results\n  funccall print resulti\nendfunc\n",
    );
    brewin()
        .arg(file.path())
        .write_stdin("17\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("17"));
}

#[test]
fn test_program_error_exits_with_failure() {
    let file = script("func main void\n  funccall print \"before\"\n  funccall missing\nendfunc\n");
    brewin()
        .arg(file.path())
        .assert()
        .code(1)
        .stdout("before\n")
        .stderr(predicate::str::contains("Error: Name error on line 3"));
}

#[test]
fn test_load_error_runs_nothing() {
    let file = script("func main void\n  funccall print \"x\"\n  while True\nendfunc\n");
    brewin()
        .arg(file.path())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Syntax error"));
}

#[test]
fn test_missing_file() {
    brewin()
        .arg("/definitely/not/here.brewin")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error reading"));
}

#[test]
fn test_trace_flag_echoes_lines() {
    let file = script("func main void\n  funccall print 1\nendfunc\n");
    brewin()
        .arg("--trace")
        .arg(file.path())
        .assert()
        .success()
        .stdout("1\n")
        .stderr(predicate::str::contains("0002:   funccall print 1"));
}

#[test]
fn test_trace_env_var() {
    let file = script("func main void\n  funccall print 1\nendfunc\n");
    brewin()
        .env("BREWIN_TRACE", "1")
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("0003: endfunc"));
}

#[test]
fn test_help_and_version() {
    brewin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE"));
    brewin()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("brewin "));
}

#[test]
fn test_usage_errors() {
    brewin().assert().code(2).stderr(predicate::str::contains("no script"));
    brewin()
        .arg("--nope")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unexpected argument"));
}
