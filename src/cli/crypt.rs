//! Encrypt, decrypt and edit commands.
//!
//! Each command resolves a profile, turns it into a sops call and either runs
//! it or prints it (`--dry-run`).

use std::path::PathBuf;
use tracing::info;

use crate::cli::context::{current_dir, Context};
use crate::cli::resolve;
use crate::core::profile::Profile;
use crate::core::sops::{args, Executor};
use crate::error::Result;

/// Arguments and key file for one sops run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SopsCall {
    pub args: Vec<String>,
    pub key_file: Option<PathBuf>,
}

impl SopsCall {
    pub fn encrypt(profile: &Profile, file: &str) -> Result<Self> {
        Ok(Self {
            args: args::build(profile, "encrypt", file)?,
            key_file: args::key_file_path(Some(profile)),
        })
    }

    pub fn decrypt(profile: Option<&Profile>, file: &str) -> Self {
        Self {
            args: args::build_decrypt(file),
            key_file: args::key_file_path(profile),
        }
    }

    pub fn edit(profile: Option<&Profile>, file: &str) -> Result<Self> {
        Ok(Self {
            args: args::build_edit(profile, file)?,
            key_file: args::key_file_path(profile),
        })
    }
}

/// Encrypt `file` with the selected profile.
pub fn encrypt(ctx: &Context, file: &str) -> Result<()> {
    let cwd = current_dir()?;
    let profile = resolve::select_profile(ctx, &cwd, &ctx.selector())?;
    info!(profile = %profile.name, file, "encrypting");

    let call = SopsCall::encrypt(profile, file)?;
    run(ctx, &ctx.executor(), &call)
}

/// Decrypt `file`, exporting the profile's key file when there is one.
pub fn decrypt(ctx: &Context, file: &str) -> Result<()> {
    let cwd = current_dir()?;
    let profile = resolve::optional_profile(ctx, &cwd)?;
    info!(profile = ?profile.map(|p| &p.name), file, "decrypting");

    run(ctx, &ctx.executor(), &SopsCall::decrypt(profile, file))
}

/// Open `file` in sops' editor.
pub fn edit(ctx: &Context, file: &str) -> Result<()> {
    let cwd = current_dir()?;
    let profile = resolve::optional_profile(ctx, &cwd)?;
    info!(profile = ?profile.map(|p| &p.name), file, "editing");

    let call = SopsCall::edit(profile, file)?;
    run(ctx, &ctx.executor(), &call)
}

/// Run `call`, or print it under `--dry-run`.
pub fn run(ctx: &Context, executor: &Executor, call: &SopsCall) -> Result<()> {
    let key_file = call.key_file.as_deref();
    if ctx.dry_run {
        print!("{}", executor.dry_run_with_key_file(&call.args, key_file));
        return Ok(());
    }
    executor.execute_with_key_file(&call.args, key_file)
}
