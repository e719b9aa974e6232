//! Interactive profile selection.
//!
//! Uses fzf when it is installed, a plain terminal menu otherwise.

use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, trace};

use crate::core::constants;
use crate::error::{Error, ExecError, Result};

/// Picks one name out of a list.
pub trait Selector {
    /// Ask the user to choose from `names`.
    ///
    /// `query` pre-filters or pre-selects a likely candidate. Returns `None`
    /// when the user cancels.
    fn select(&self, names: &[String], query: Option<&str>) -> Result<Option<String>>;
}

/// fzf-backed [`Selector`].
#[derive(Debug, Default, Clone)]
pub struct FzfSelector {
    /// Extra fzf arguments, whitespace separated
    options: Option<String>,
}

impl FzfSelector {
    pub fn new(options: Option<String>) -> Self {
        Self { options }
    }

    fn fzf_args(&self, query: Option<&str>) -> Vec<String> {
        let mut args = vec!["--prompt=profile> ".to_string()];
        if let Some(query) = query {
            args.push(format!("--query={}", query));
        }
        if let Some(options) = &self.options {
            args.extend(options.split_whitespace().map(str::to_string));
        }
        args
    }

    fn run_fzf(
        &self,
        fzf: &std::path::Path,
        names: &[String],
        query: Option<&str>,
    ) -> Result<Option<String>> {
        let args = self.fzf_args(query);
        trace!(?args, "spawning fzf");

        let mut child = Command::new(fzf)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ExecError::Launch {
                program: constants::FZF.to_string(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(names.join("\n").as_bytes())?;
        }

        let output = child.wait_with_output()?;
        match output.status.code() {
            Some(0) => {
                let choice = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Ok(Some(choice).filter(|c| !c.is_empty()))
            }
            // no match / interrupted
            Some(1) | Some(130) => Ok(None),
            code => Err(ExecError::Failed {
                program: constants::FZF.to_string(),
                code,
            }
            .into()),
        }
    }

    fn run_menu(&self, names: &[String], query: Option<&str>) -> Result<Option<String>> {
        let default = query
            .and_then(|q| names.iter().position(|n| n == q))
            .unwrap_or(0);

        let index = dialoguer::Select::new()
            .with_prompt("Select profile")
            .items(names)
            .default(default)
            .interact_opt()
            .map_err(|e| Error::Other(format!("profile selection failed: {}", e)))?;

        Ok(index.map(|i| names[i].clone()))
    }
}

impl Selector for FzfSelector {
    fn select(&self, names: &[String], query: Option<&str>) -> Result<Option<String>> {
        match which::which(constants::FZF) {
            Ok(fzf) => self.run_fzf(&fzf, names, query),
            Err(_) => {
                debug!("fzf not found, using terminal menu");
                self.run_menu(names, query)
            }
        }
    }
}
