//! Tests for `sopsy profile` commands.

use crate::support::*;

#[test]
fn test_add_with_recipients() {
    let t = Test::init();

    let output = t.add_recipients("dev", &["age1aaa", "age1bbb"]);
    assert_success(&output);
    assert_stdout_contains(&output, "profile 'dev' added");

    let contents = t.config_contents();
    assert!(contents.contains("age1aaa"));
    assert!(contents.contains("age1bbb"));
}

#[test]
fn test_add_with_comma_separated_recipients() {
    let t = Test::init();

    assert_success(&t.run(&["profile", "add", "dev", "--age", "age1aaa,age1bbb"]));

    let output = t.run(&["profile", "show", "dev"]);
    assert_stdout_contains(&output, "age1aaa");
    assert_stdout_contains(&output, "age1bbb");
}

#[test]
fn test_add_without_config_creates_it() {
    let t = Test::new();

    assert_success(&t.add_recipients("dev", &["age1aaa"]));
    assert!(t.config_path().exists());
}

#[test]
fn test_add_requires_backend() {
    let t = Test::init();

    let output = t.run(&["profile", "add", "dev", "--description", "Development"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "at least one encryption backend is required");
}

#[test]
fn test_add_duplicate_fails() {
    let t = Test::init();
    assert_success(&t.add_recipients("dev", &["age1aaa"]));

    let output = t.add_recipients("dev", &["age1bbb"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "profile already exists: dev");
}

#[test]
fn test_add_with_sops_options() {
    let t = Test::init();

    let output = t.run(&[
        "profile",
        "add",
        "k8s",
        "--age",
        "age1aaa",
        "--encrypted-regex",
        "^(data|stringData)$",
    ]);
    assert_success(&output);

    let show = t.run(&["profile", "show", "k8s"]);
    assert_stdout_contains(&show, "sops options");
    assert_stdout_contains(&show, "^(data|stringData)$");
}

#[test]
fn test_ls_sorted_with_default_marker() {
    let t = Test::init();
    assert_success(&t.add_recipients("zeta", &["age1z"]));
    assert_success(&t.add_recipients("alpha", &["age1a"]));
    assert_success(&t.use_profile("zeta"));

    let output = t.run(&["profile", "ls"]);
    assert_success(&output);
    let out = stdout(&output);
    let alpha = out.find("alpha").expect("alpha listed");
    let zeta = out.find("zeta").expect("zeta listed");
    assert!(alpha < zeta);
    assert!(out.lines().any(|l| l.starts_with('*') && l.contains("zeta")));
    assert!(out.lines().any(|l| l.starts_with(' ') && l.contains("alpha")));
}

#[test]
fn test_ls_empty() {
    let t = Test::init();

    let output = t.run(&["profile", "list"]);
    assert_success(&output);
    assert_stdout_contains(&output, "no profiles configured");
}

#[test]
fn test_ls_json() {
    let t = Test::init();
    assert_success(&t.run(&[
        "profile",
        "add",
        "dev",
        "--age",
        "age1aaa",
        "--description",
        "Development",
    ]));
    assert_success(&t.use_profile("dev"));

    let output = t.run(&["profile", "ls", "--json"]);
    assert_success(&output);

    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows[0]["name"], "dev");
    assert_eq!(rows[0]["description"], "Development");
    assert_eq!(rows[0]["backends"], "age");
    assert_eq!(rows[0]["default"], true);
}

#[test]
fn test_show_key_file_profile() {
    let t = Test::init();
    let key = t.key_file("dev.txt", "age1fromfile");
    assert_success(&t.add_key_file("dev", &key));

    let output = t.run(&["profile", "show", "dev"]);
    assert_success(&output);
    assert_stdout_contains(&output, "key file:");
    assert_stdout_contains(&output, &key);
    assert_stdout_contains(&output, "default:");
}

#[test]
fn test_show_unknown_profile() {
    let t = Test::init();

    let output = t.run(&["profile", "show", "nope"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "profile not found: nope");
    assert_stderr_contains(&output, "sopsy profile ls");
}

#[test]
fn test_use_prints_export_line() {
    let t = Test::init();
    let key = t.key_file("dev.txt", "age1fromfile");
    assert_success(&t.add_key_file("dev", &key));

    let output = t.use_profile("dev");
    assert_success(&output);
    assert_stdout_contains(&output, "default profile set to 'dev'");
    assert_stdout_contains(&output, &format!("export SOPS_AGE_KEY_FILE='{}'", key));
    assert!(t.config_contents().contains("default_profile: dev"));
}

#[test]
fn test_use_without_key_file_prints_no_export() {
    let t = Test::init();
    assert_success(&t.add_recipients("dev", &["age1aaa"]));

    let output = t.use_profile("dev");
    assert_success(&output);
    assert_stdout_excludes(&output, "export");
}

#[test]
fn test_use_unknown_profile_fails() {
    let t = Test::init();

    let output = t.use_profile("nope");
    assert_failure(&output);
    assert_stderr_contains(&output, "profile not found: nope");
}

#[test]
fn test_reset_clears_default() {
    let t = Test::init();
    assert_success(&t.add_recipients("dev", &["age1aaa"]));
    assert_success(&t.use_profile("dev"));

    let output = t.run(&["profile", "reset"]);
    assert_success(&output);
    assert!(!t.config_contents().contains("default_profile"));
}

#[test]
fn test_rm_removes_and_clears_default() {
    let t = Test::init();
    assert_success(&t.add_recipients("dev", &["age1aaa"]));
    assert_success(&t.use_profile("dev"));

    let output = t.run(&["profile", "rm", "dev"]);
    assert_success(&output);
    assert_stdout_contains(&output, "profile 'dev' removed");
    assert_stderr_contains(&output, "default profile cleared");

    let contents = t.config_contents();
    assert!(!contents.contains("age1aaa"));
    assert!(!contents.contains("default_profile"));
}

#[test]
fn test_rm_unknown_profile_fails() {
    let t = Test::init();

    let output = t.run(&["profile", "rm", "ghost"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "profile not found: ghost");
}

#[test]
fn test_link_and_unlink_current_dir() {
    let t = Test::init();
    assert_success(&t.add_recipients("dev", &["age1aaa"]));

    let output = t.run(&["profile", "link", "dev", "--auto"]);
    assert_success(&output);
    assert_stdout_contains(&output, "linked to profile 'dev' (auto)");
    assert!(t.config_contents().contains("directories:"));

    let output = t.run(&["profile", "unlink"]);
    assert_success(&output);
    assert_stdout_contains(&output, "unlinked from profile 'dev'");
    assert!(!t.config_contents().contains("directories:"));
}

#[test]
fn test_link_unknown_profile_fails() {
    let t = Test::init();

    let output = t.run(&["profile", "link", "ghost"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "profile not found: ghost");
}

#[test]
fn test_unlink_without_rule_fails() {
    let t = Test::init();

    let output = t.run(&["profile", "unlink"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no directory rule for");
}

#[test]
fn test_rm_warns_about_linked_directories() {
    let t = Test::init();
    assert_success(&t.add_recipients("dev", &["age1aaa"]));
    assert_success(&t.run(&["profile", "link", "dev"]));

    let output = t.run(&["profile", "rm", "dev"]);
    assert_success(&output);
    assert_stderr_contains(&output, "is still linked to 'dev'");
}
