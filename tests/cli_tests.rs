//! Process-level tests for the minicc driver.

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn missing_argument_fails_with_message() {
    let mut cmd = Command::cargo_bin("minicc").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn nonexistent_file_fails() {
    let mut cmd = Command::cargo_bin("minicc").unwrap();
    cmd.arg("no/such/file.c")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open"));
}

#[test]
fn dumps_tree_for_valid_program() {
    let mut cmd = Command::cargo_bin("minicc").unwrap();
    cmd.arg(fixture("hello.c"))
        .assert()
        .success()
        .stdout(predicate::str::contains("hello.c"))
        .stdout(predicate::str::contains("Program (1 children)"))
        .stdout(predicate::str::contains("Function: main, Return Type: int"))
        .stdout(predicate::str::contains("Return Statement"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn dumps_larger_program() {
    let mut cmd = Command::cargo_bin("minicc").unwrap();
    cmd.arg(fixture("sum.c"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Program (3 children)"))
        .stdout(predicate::str::contains("While Statement"))
        .stdout(predicate::str::contains("If Statement"))
        .stdout(predicate::str::contains("Function Call"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn diagnostics_go_to_stderr_and_exit_stays_zero() {
    let mut cmd = Command::cargo_bin("minicc").unwrap();
    cmd.arg(fixture("broken.c"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Program"))
        .stderr(predicate::str::contains("Error in"))
        .stderr(predicate::str::contains("broken.c"));
}

#[test]
fn token_mode_lists_the_token_stream() {
    let mut cmd = Command::cargo_bin("minicc").unwrap();
    cmd.arg("--tokens")
        .arg(fixture("hello.c"))
        .assert()
        .success()
        .stdout(predicate::str::contains("'int'"))
        .stdout(predicate::str::contains("identifier 'main'"))
        .stdout(predicate::str::contains("end of file"));
}
