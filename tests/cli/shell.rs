//! Tests for `sopsy init`, `completions` and `version`.

use crate::support::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_zsh_installs_once() {
    let t = Test::new();

    let output = t.run(&["init", "zsh"]);
    assert_success(&output);
    assert_stdout_contains(&output, "shell integration installed");

    let rc = fs::read_to_string(t.home.path().join(".zshrc")).unwrap();
    assert!(rc.contains("# sopsy shell integration"));
    assert!(rc.contains("sopsy()"));

    let output = t.run(&["init", "zsh"]);
    assert_success(&output);
    assert_stdout_contains(&output, "already installed");

    let rc = fs::read_to_string(t.home.path().join(".zshrc")).unwrap();
    assert_eq!(rc.matches("# sopsy shell integration").count(), 1);
}

#[test]
fn test_init_bash_keeps_existing_rc() {
    let t = Test::new();
    let rc_path = t.home.path().join(".bashrc");
    fs::write(&rc_path, "export PATH=$HOME/bin:$PATH\n").unwrap();

    assert_success(&t.run(&["init", "bash"]));

    let rc = fs::read_to_string(rc_path).unwrap();
    assert!(rc.starts_with("export PATH=$HOME/bin:$PATH\n"));
    assert!(rc.contains("# sopsy shell integration"));
}

#[test]
fn test_init_rejects_unknown_shell() {
    let t = Test::new();

    let output = t.run(&["init", "tcsh"]);
    assert_failure(&output);
}

#[test]
fn test_completions_bash() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sopsy"));
}

#[test]
fn test_completions_fish() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c sopsy"));
}

#[test]
fn test_version() {
    let t = Test::new();

    t.cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sopsy"));
}
