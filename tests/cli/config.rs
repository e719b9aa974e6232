//! Tests for `sopsy config` commands.

use crate::support::*;

#[test]
fn test_config_init_creates_file() {
    let t = Test::new();

    let output = t.config_init();
    assert_success(&output);
    assert_stdout_contains(&output, "configuration created at");
    assert_stdout_contains(&output, "Next steps");

    let contents = t.config_contents();
    assert!(contents.contains("version: '1'") || contents.contains("version: \"1\""));
    assert!(contents.contains("sops_path: sops"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let t = Test::init();

    let output = t.config_init();
    assert_failure(&output);
    assert_stderr_contains(&output, "config already exists");
    assert_stderr_contains(&output, "--force");
}

#[test]
fn test_config_init_force_resets() {
    let t = Test::init();
    assert_success(&t.add_recipients("dev", &["age1dev"]));

    let output = t.run(&["config", "init", "--force"]);
    assert_success(&output);
    assert!(!t.config_contents().contains("age1dev"));
}

#[test]
fn test_config_show_prints_yaml() {
    let t = Test::init();
    assert_success(&t.add_recipients("dev", &["age1dev"]));

    let output = t.run(&["config", "show"]);
    assert_success(&output);
    assert_stdout_contains(&output, "profiles:");
    assert_stdout_contains(&output, "dev:");
    assert_stdout_contains(&output, "age1dev");
}

#[test]
fn test_config_show_without_file_prints_defaults() {
    let t = Test::new();

    let output = t.run(&["config", "show"]);
    assert_success(&output);
    assert_stdout_contains(&output, "sops_path: sops");
    assert!(!t.config_path().exists());
}

#[test]
fn test_config_path_default() {
    let t = Test::new();

    let output = t.run(&["config", "path"]);
    assert_success(&output);
    assert!(stdout(&output).trim().ends_with("config.yaml"));
    assert_stdout_contains(&output, ".config/sopsy");
}

#[test]
fn test_config_flag_overrides_location() {
    let t = Test::new();
    let custom = t.dir.path().join("custom.yaml");
    let custom_str = custom.to_string_lossy().to_string();

    assert_success(&t.run(&["--config", &custom_str, "config", "init"]));
    assert!(custom.exists());
    assert!(!t.config_path().exists());

    let output = t.run(&["-c", &custom_str, "config", "path"]);
    assert_stdout_contains(&output, &custom_str);
}

#[test]
fn test_config_env_var_overrides_location() {
    let t = Test::new();
    let custom = t.dir.path().join("env.yaml");

    let output = t
        .cmd()
        .env("SOPSY_CONFIG", &custom)
        .args(["config", "init"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(custom.exists());
}

#[test]
fn test_broken_config_reports_parse_error() {
    let t = Test::init();
    std::fs::write(t.config_path(), "profiles: [not, a, map").unwrap();

    let output = t.run(&["profile", "ls"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config");

    // path still works so the file can be fixed
    assert_success(&t.run(&["config", "path"]));
}
