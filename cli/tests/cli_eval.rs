// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_with_config() {
    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("2+3*4")
        .assert()
        .success()
        .stdout(predicate::eq("> 2+3*4\n14\n"));
}

#[test]
fn test_answer_carries_over() {
    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("6*7")
        .arg("ans + 1")
        .assert()
        .success()
        .stdout(predicate::eq("> 6*7\n42\n> ans + 1\n43\n"));
}

#[test]
fn test_invalid_expr() {
    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("1/0")
        .arg("2")
        .assert()
        .failure()
        .stdout(predicate::eq("> 1/0\nError. Division by 0.\n> 2\n2\n"));
}

#[test]
fn test_invalid_config() {
    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("config_that_doesnt_exist.toml")
        .arg("1+1")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to read provided config file `config_that_doesnt_exist.toml`",
        ));
}

#[test]
fn test_overrides() {
    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("-d")
        .arg("--digits")
        .arg("3")
        .arg("sin(30)")
        .arg("pi")
        .assert()
        .success()
        .stdout(predicate::eq("> sin(30)\n0.5\n> pi\n3.14\n"));
}

#[test]
fn test_run_file() {
    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("-f")
        .arg("tests/example.calc")
        .assert()
        .success()
        .stdout(predicate::eq(
            "angle_mode = degrees\n1\nfmem = \"x^2\"\n9\n1\n",
        ));
}

#[test]
fn test_run_stdin() {
    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("-f")
        .arg("-")
        .write_stdin("sum(x,1,100)\n")
        .assert()
        .success()
        .stdout(predicate::eq("5050\n"));

    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("-f")
        .arg("-")
        .write_stdin("doesnt_exist\n\n7")
        .assert()
        .failure()
        .stdout(predicate::eq("Error. Function undefined.\n7\n"));
}

#[test]
fn test_run_file_with_undecodable_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.calc");
    std::fs::write(&path, b"1+1\n\xff\n2+2\n").unwrap();

    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .arg("-f")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::eq(
            "2\nError. Line is not valid UTF-8.\n4\n",
        ));
}
