//! Tests for error reporting and global flags.

use crate::support::*;

#[test]
fn test_missing_config_suggests_init() {
    let t = Test::new();

    let output = t.dry_run(&["-p", "dev", "encrypt", "s.yaml"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "config file not found");
    assert_stderr_contains(&output, "sopsy config init");
}

#[test]
fn test_unknown_profile_flag() {
    let t = Test::init();
    assert_success(&t.add_recipients("dev", &["age1aaa"]));

    let output = t.dry_run(&["-p", "nope", "encrypt", "s.yaml"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "profile not found: nope");
    assert_stderr_contains(&output, "sopsy profile ls");
}

#[test]
fn test_unknown_profile_flag_on_decrypt() {
    let t = Test::init();

    let output = t.dry_run(&["-p", "nope", "decrypt", "s.yaml"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "profile not found: nope");
}

#[test]
fn test_missing_file_argument() {
    let t = Test::init();

    let output = t.run(&["encrypt"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "<FILE>");
}

#[test]
fn test_errors_go_to_stderr_only() {
    let t = Test::init();

    let output = t.run(&["profile", "show", "nope"]);
    assert_failure(&output);
    assert!(stdout(&output).is_empty());
    assert_stderr_contains(&output, "✗");
}

#[test]
fn test_verbose_logs_to_stderr() {
    let t = Test::init();
    assert_success(&t.add_recipients("dev", &["age1aaa"]));

    let output = t.dry_run(&["-v", "-p", "dev", "encrypt", "s.yaml"]);
    assert_success(&output);
    assert_stderr_contains(&output, "built sops arguments");
    assert_stdout_excludes(&output, "built sops arguments");
}

#[test]
fn test_quiet_by_default() {
    let t = Test::init();
    assert_success(&t.add_recipients("dev", &["age1aaa"]));

    let output = t.dry_run(&["-p", "dev", "encrypt", "s.yaml"]);
    assert_success(&output);
    assert!(stderr(&output).is_empty());
}
