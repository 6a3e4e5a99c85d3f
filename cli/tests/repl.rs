// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_run_interactive() {
    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .write_stdin("2^10\nans/4\n")
        .env("NO_COLOR", "true")
        .assert()
        .success()
        .stdout(predicate::eq("1024\n256\n"));
}

#[test]
fn test_invalid() {
    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .write_stdin("doesnt_exist\n(1+2\n")
        .env("NO_COLOR", "true")
        .assert()
        .success()
        .stdout(predicate::eq(
            "Error. Function undefined.\nError. Bracket mismatch.\n",
        ));
}

#[test]
fn test_help_text() {
    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .write_stdin("help\n")
        .env("NO_COLOR", "true")
        .assert()
        .success()
        .stdout(predicate::eq(decicalc::repl::HELP_TEXT).trim());
}

#[test]
fn test_quit() {
    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .write_stdin("1+1\nquit\n2+2\n")
        .env("NO_COLOR", "true")
        .assert()
        .success()
        .stdout(predicate::eq("2\n"));
}

#[test]
fn test_commands() {
    let mut cmd = Command::cargo_bin("decicalc").unwrap();
    cmd.arg("-c")
        .arg("tests/config_for_tests.toml")
        .write_stdin(":mode deg\narctan(1)\n:sto\n:integral grid\n:show\n")
        .env("NO_COLOR", "true")
        .assert()
        .success()
        .stdout(predicate::eq(
            "angle_mode = degrees\n\
             45\n\
             mem = 45\n\
             Error. Invalid mode.\n\
             angle_mode = degrees\n\
             integral_mode = simpson38\n\
             divisions = 1000\n\
             digits = 6\n\
             notation = scientific\n\
             ans = 45\n\
             mem = 45\n\
             fans = \"\"\n\
             fmem = \"\"\n",
        ));
}
