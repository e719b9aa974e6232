//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a sopsy command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test working directory
    /// - NO_COLOR set for stable output
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sopsy").expect("failed to find sopsy binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SOPSY_CONFIG");
        cmd.env_remove("SOPSY_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run sopsy with `args`.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run sopsy")
    }

    /// Shortcut for `sopsy config init`.
    pub fn config_init(&self) -> Output {
        self.run(&["config", "init"])
    }

    /// Shortcut for `sopsy profile add <name> --age <key>...`.
    pub fn add_recipients(&self, name: &str, keys: &[&str]) -> Output {
        let mut args = vec!["profile", "add", name];
        for key in keys {
            args.push("--age");
            args.push(key);
        }
        self.run(&args)
    }

    /// Shortcut for `sopsy profile add <name> --age-key-file <path>`.
    pub fn add_key_file(&self, name: &str, key_file: &str) -> Output {
        self.run(&["profile", "add", name, "--age-key-file", key_file])
    }

    /// Shortcut for `sopsy profile use <name>`.
    pub fn use_profile(&self, name: &str) -> Output {
        self.run(&["profile", "use", name])
    }

    /// Shortcut for `sopsy --dry-run <args>`.
    pub fn dry_run(&self, args: &[&str]) -> Output {
        let mut all = vec!["--dry-run"];
        all.extend_from_slice(args);
        self.run(&all)
    }
}
