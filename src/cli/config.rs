//! Config commands: init, show, edit, path.

use std::path::Path;
use tracing::info;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::config::Config;
use crate::core::constants;
use crate::core::sops::{Invocation, Launcher, SystemLauncher};
use crate::error::{ConfigError, Error, ExecError, Result};

/// Create a fresh config at `path`.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()).into());
    }

    Config::new().save(path)?;
    info!(path = %path.display(), "config created");

    output::success(&format!(
        "configuration created at {}",
        output::path(&path.display().to_string())
    ));
    output::blank();
    output::header("Next steps");
    output::list_item(&format!(
        "add a profile:   {}",
        output::cmd("sopsy profile add <name> --age-key-file <path>")
    ));
    output::list_item(&format!(
        "set default:     {}",
        output::cmd("sopsy profile use <name>")
    ));
    output::list_item(&format!(
        "encrypt a file:  {}",
        output::cmd("sopsy encrypt <file>")
    ));
    Ok(())
}

/// Print the loaded configuration as YAML.
pub fn show(ctx: &Context) -> Result<()> {
    let yaml = serde_yaml_ng::to_string(&ctx.config).map_err(ConfigError::Serialize)?;
    print!("{}", yaml);
    Ok(())
}

/// Open the config file in `$EDITOR`.
pub fn edit(path: &Path) -> Result<()> {
    open_in_editor(&SystemLauncher, path)
}

/// Print the config file path.
pub fn path(path: &Path) -> Result<()> {
    println!("{}", path.display());
    Ok(())
}

/// Editor invocation for `path`.
///
/// `EDITOR` may carry arguments (`code --wait`); it is split on whitespace.
pub fn editor_invocation(editor: Option<&str>, path: &Path) -> Invocation {
    let editor = editor
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(constants::DEFAULT_EDITOR);

    let mut parts = editor.split_whitespace().map(str::to_string);
    let program = parts
        .next()
        .unwrap_or_else(|| constants::DEFAULT_EDITOR.to_string());
    let mut args: Vec<String> = parts.collect();
    args.push(path.display().to_string());

    Invocation {
        program,
        args,
        env: Vec::new(),
    }
}

/// Launch `$EDITOR` on `path` and wait for it.
pub fn open_in_editor(launcher: &dyn Launcher, path: &Path) -> Result<()> {
    let editor = std::env::var("EDITOR").ok();
    let invocation = editor_invocation(editor.as_deref(), path);
    info!(editor = %invocation.program, "opening editor");

    let code = launcher
        .launch(&invocation)
        .map_err(|source| ExecError::Launch {
            program: invocation.program.clone(),
            source,
        })?;

    match code {
        Some(0) => Ok(()),
        code => Err(Error::Exec(ExecError::Failed {
            program: invocation.program,
            code,
        })),
    }
}
