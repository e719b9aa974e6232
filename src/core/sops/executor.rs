//! Running sops.
//!
//! Process creation goes through the [`Launcher`] trait so commands can be
//! exercised without spawning anything.

use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use crate::core::constants;
use crate::error::{ExecError, Result};

/// A program invocation: no shell, arguments passed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Added on top of the inherited environment
    pub env: Vec<(String, String)>,
}

/// Launches a program and waits for it.
pub trait Launcher {
    /// Run `invocation` with inherited stdio and return its exit code
    /// (`None` when terminated by a signal).
    fn launch(&self, invocation: &Invocation) -> std::io::Result<Option<i32>>;
}

/// [`Launcher`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, invocation: &Invocation) -> std::io::Result<Option<i32>> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k, v)))
            .status()?;
        Ok(status.code())
    }
}

/// Runs sops, or describes what it would run.
pub struct Executor {
    sops_path: String,
    launcher: Box<dyn Launcher>,
}

impl Executor {
    /// Executor for `sops_path` using real processes.
    pub fn new(sops_path: &str) -> Self {
        Self::with_launcher(sops_path, Box::new(SystemLauncher))
    }

    pub fn with_launcher(sops_path: &str, launcher: Box<dyn Launcher>) -> Self {
        let sops_path = if sops_path.is_empty() {
            constants::DEFAULT_SOPS_PATH
        } else {
            sops_path
        };
        Self {
            sops_path: sops_path.to_string(),
            launcher,
        }
    }

    pub fn sops_path(&self) -> &str {
        &self.sops_path
    }

    /// Run sops with `args`.
    pub fn execute(&self, args: &[String]) -> Result<()> {
        self.execute_with_key_file(args, None)
    }

    /// Run sops with `args`, exporting `SOPS_AGE_KEY_FILE` when a key file
    /// is given.
    ///
    /// # Errors
    ///
    /// `ExecError::NotFound` if sops cannot be found, `ExecError::Launch` for
    /// other spawn failures and `ExecError::Failed` on a non-zero exit.
    pub fn execute_with_key_file(&self, args: &[String], key_file: Option<&Path>) -> Result<()> {
        let invocation = self.invocation(args, key_file);
        info!(program = %invocation.program, args = ?invocation.args, "running sops");

        let code = self
            .launcher
            .launch(&invocation)
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => ExecError::NotFound(self.sops_path.clone()),
                _ => ExecError::Launch {
                    program: self.sops_path.clone(),
                    source,
                },
            })?;

        debug!(?code, "sops exited");
        match code {
            Some(0) => Ok(()),
            code => Err(ExecError::Failed {
                program: self.sops_path.clone(),
                code,
            }
            .into()),
        }
    }

    /// Describe the command `execute` would run.
    pub fn dry_run(&self, args: &[String]) -> String {
        self.dry_run_with_key_file(args, None)
    }

    /// Describe the command `execute_with_key_file` would run.
    ///
    /// Arguments containing a space are quoted one by one, so the output is
    /// informative rather than guaranteed shell-safe.
    pub fn dry_run_with_key_file(&self, args: &[String], key_file: Option<&Path>) -> String {
        let mut out = String::from("Would execute:\n");
        if let Some(key_file) = key_file {
            out.push_str(&format!(
                "  {}={} \\\n",
                constants::SOPS_AGE_KEY_FILE,
                key_file.display()
            ));
        }
        out.push_str(&format!("  {} {}\n", self.sops_path, format_args(args)));
        out
    }

    fn invocation(&self, args: &[String], key_file: Option<&Path>) -> Invocation {
        Invocation {
            program: self.sops_path.clone(),
            args: args.to_vec(),
            env: key_file
                .map(|k| {
                    vec![(
                        constants::SOPS_AGE_KEY_FILE.to_string(),
                        k.to_string_lossy().to_string(),
                    )]
                })
                .unwrap_or_default(),
        }
    }
}

/// Join arguments for display, quoting those that contain spaces.
fn format_args(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            if arg.contains(' ') {
                format!("{:?}", arg)
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
