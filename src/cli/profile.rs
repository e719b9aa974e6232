//! Profile commands.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::config::open_in_editor;
use crate::cli::context::{current_dir, Context};
use crate::cli::{output, shell, ProfileSpec};
use crate::core::constants;
use crate::core::paths;
use crate::core::profile::{AgeConfig, Profile, SopsOptions};
use crate::core::sops::SystemLauncher;
use crate::error::{Result, ValidationError};

/// Add a profile from command-line settings.
pub fn add(ctx: &mut Context, name: &str, spec: ProfileSpec) -> Result<()> {
    let profile = profile_from_spec(name, spec);
    if !profile.has_backends() {
        return Err(ValidationError::NoBackend.into());
    }

    ctx.config.add_profile(profile)?;
    ctx.save()?;

    info!(profile = name, "profile added");
    output::success(&format!("profile '{}' added", name));
    Ok(())
}

fn profile_from_spec(name: &str, spec: ProfileSpec) -> Profile {
    let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());

    let age = AgeConfig {
        key_file: non_empty(spec.age_key_file),
        recipients: spec.age.into_iter().filter(|r| !r.is_empty()).collect(),
    };

    Profile {
        name: name.to_string(),
        description: non_empty(spec.description),
        age: Some(age).filter(AgeConfig::is_configured),
        sops: SopsOptions {
            encrypted_regex: non_empty(spec.encrypted_regex),
            encrypted_suffix: non_empty(spec.encrypted_suffix),
            unencrypted_regex: non_empty(spec.unencrypted_regex),
            unencrypted_suffix: non_empty(spec.unencrypted_suffix),
        },
    }
}

/// One row of `profile ls --json`.
#[derive(Debug, Serialize)]
struct ProfileSummary<'a> {
    name: &'a str,
    description: Option<&'a str>,
    backends: &'static str,
    default: bool,
}

/// List profiles sorted by name.
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let mut profiles = ctx.config.list_profiles();
    profiles.sort_by(|a, b| a.name.cmp(&b.name));

    let default = ctx.config.default_profile.as_deref();
    let rows: Vec<ProfileSummary<'_>> = profiles
        .iter()
        .map(|p| ProfileSummary {
            name: &p.name,
            description: p.description.as_deref(),
            backends: p.backend_summary(),
            default: Some(p.name.as_str()) == default,
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&rows)
            .map_err(|e| crate::error::Error::Other(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    if rows.is_empty() {
        output::dimmed("no profiles configured");
        return Ok(());
    }

    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4) + 2;
    let desc_width = rows
        .iter()
        .map(|r| r.description.unwrap_or("").len())
        .max()
        .unwrap_or(0)
        .max(11);

    output::header(&format!(
        "  {:<name_width$}  {:<desc_width$}  {}",
        "NAME", "DESCRIPTION", "BACKENDS"
    ));
    for row in &rows {
        let marker = if row.default { "*" } else { " " };
        println!(
            "{} {:<name_width$}  {:<desc_width$}  {}",
            marker,
            row.name,
            row.description.unwrap_or(""),
            row.backends
        );
    }
    Ok(())
}

/// Show details of one profile.
pub fn show(ctx: &Context, name: &str) -> Result<()> {
    let profile = ctx.config.get_profile(name)?;
    let is_default = ctx.config.default_profile.as_deref() == Some(name);

    output::header(&profile.name);
    output::kv("description:", profile.description.as_deref().unwrap_or("-"));
    output::kv("backends:   ", profile.backend_summary());
    output::kv("default:    ", if is_default { "yes" } else { "no" });

    if let Some(age) = &profile.age {
        if let Some(key_file) = &age.key_file {
            output::kv("key file:   ", output::path(key_file));
        }
        if !age.recipients.is_empty() {
            output::blank();
            output::header("age recipients");
            for recipient in &age.recipients {
                output::list_item(&output::key(recipient));
            }
        }
    }

    let sops = &profile.sops;
    if !sops.is_empty() {
        output::blank();
        output::header("sops options");
        let options = [
            ("encrypted_regex:   ", &sops.encrypted_regex),
            ("encrypted_suffix:  ", &sops.encrypted_suffix),
            ("unencrypted_regex: ", &sops.unencrypted_regex),
            ("unencrypted_suffix:", &sops.unencrypted_suffix),
        ];
        for (label, value) in options {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                output::kv(label, value);
            }
        }
    }
    Ok(())
}

/// Remove a profile. Clears the default when it pointed at it.
pub fn rm(ctx: &mut Context, name: &str) -> Result<()> {
    ctx.config.remove_profile(name)?;

    let was_default = ctx.config.default_profile.as_deref() == Some(name);
    if was_default {
        ctx.config.clear_default_profile();
    }
    ctx.save()?;

    output::success(&format!("profile '{}' removed", name));
    if was_default {
        output::warn("default profile cleared");
    }

    let linked: Vec<&str> = ctx
        .config
        .directories
        .iter()
        .filter(|(_, rule)| rule.profile == name)
        .map(|(dir, _)| dir.as_str())
        .collect();
    for dir in linked {
        output::warn(&format!("{} is still linked to '{}'", output::path(dir), name));
        output::hint(&format!("run: sopsy profile unlink --dir {}", dir));
    }
    Ok(())
}

/// Open the config in `$EDITOR` to edit a profile by hand.
pub fn edit(ctx: &Context, name: &str) -> Result<()> {
    ctx.config.get_profile(name)?;
    open_in_editor(&SystemLauncher, &ctx.config_path)
}

/// Make a profile the default.
///
/// Prints an `export` line for the key file; the shell integration
/// evaluates it.
pub fn use_profile(ctx: &mut Context, name: &str) -> Result<()> {
    ctx.config.set_default_profile(name)?;
    ctx.save()?;

    output::success(&format!("default profile set to '{}'", name));
    if let Some(key_file) = ctx.config.get_profile(name)?.key_file_path() {
        println!(
            "export {}={}",
            constants::SOPS_AGE_KEY_FILE,
            shell::quote(&key_file.display().to_string())
        );
    }
    Ok(())
}

/// Clear the default profile.
pub fn reset(ctx: &mut Context) -> Result<()> {
    ctx.config.clear_default_profile();
    ctx.save()?;

    output::success("default profile cleared");
    Ok(())
}

/// Bind a profile to a directory (default: the current one).
pub fn link(ctx: &mut Context, name: &str, dir: Option<&Path>, auto: bool) -> Result<()> {
    let dir = absolute_dir(dir)?;
    let key = dir.display().to_string();

    ctx.config.link_directory(&key, name, auto)?;
    ctx.save()?;

    output::success(&format!(
        "{} linked to profile '{}'{}",
        output::path(&key),
        name,
        if auto { " (auto)" } else { "" }
    ));
    Ok(())
}

/// Remove the binding for a directory (default: the current one).
pub fn unlink(ctx: &mut Context, dir: Option<&Path>) -> Result<()> {
    let dir = absolute_dir(dir)?;
    let key = dir.display().to_string();

    let rule = ctx.config.unlink_directory(&key)?;
    ctx.save()?;

    output::success(&format!(
        "{} unlinked from profile '{}'",
        output::path(&key),
        rule.profile
    ));
    Ok(())
}

/// Expand and absolutize a directory argument against the working directory.
fn absolute_dir(dir: Option<&Path>) -> Result<PathBuf> {
    let cwd = current_dir()?;
    let dir = match dir {
        None => cwd,
        Some(dir) => {
            let expanded = paths::expand(&dir.to_string_lossy());
            if expanded.is_absolute() {
                expanded
            } else {
                cwd.join(expanded)
            }
        }
    };
    Ok(paths::clean(&dir))
}
