//! Profile resolution helpers for CLI commands.

use std::path::Path;
use tracing::{debug, warn};

use crate::cli::context::Context;
use crate::core::profile::Profile;
use crate::core::select::Selector;
use crate::error::{ProfileError, Result};

/// Pick the profile to encrypt with.
///
/// Rules, first hit wins:
/// - `--profile` (must exist)
/// - a directory rule with `auto` set (must exist)
/// - the default profile, skipped with a warning if it no longer exists
/// - interactive selection, pre-filtered with a non-auto directory rule
pub fn select_profile<'a>(
    ctx: &'a Context,
    cwd: &Path,
    selector: &dyn Selector,
) -> Result<&'a Profile> {
    let config = &ctx.config;

    if let Some(name) = &ctx.profile {
        return config.get_profile(name);
    }

    let rule = config.resolve_profile_for(cwd);
    if let Some(rule) = rule.as_ref().filter(|r| r.auto) {
        debug!(profile = %rule.profile, dir = %rule.directory.display(), "auto profile from directory");
        return config.get_profile(&rule.profile);
    }

    if let Some(name) = &config.default_profile {
        match config.get_profile(name) {
            Ok(profile) => return Ok(profile),
            Err(_) => warn!(profile = %name, "default profile not found, ignoring"),
        }
    }

    let names: Vec<String> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return Err(ProfileError::NoProfiles.into());
    }

    let query = rule.as_ref().map(|r| r.profile.as_str());
    let choice = selector
        .select(&names, query)?
        .ok_or(ProfileError::NoneSelected)?;
    config.get_profile(&choice)
}

/// Profile for commands that can run without one (decrypt, edit).
///
/// `--profile` must exist. Otherwise an `auto` directory rule, then the
/// default profile, are used when they resolve; a dangling name is ignored
/// and the command runs with no profile.
pub fn optional_profile<'a>(ctx: &'a Context, cwd: &Path) -> Result<Option<&'a Profile>> {
    let config = &ctx.config;

    if let Some(name) = &ctx.profile {
        return config.get_profile(name).map(Some);
    }

    let fallbacks = config
        .resolve_profile_for(cwd)
        .filter(|r| r.auto)
        .map(|r| r.profile)
        .into_iter()
        .chain(config.default_profile.clone());

    for name in fallbacks {
        match config.get_profile(&name) {
            Ok(profile) => return Ok(Some(profile)),
            Err(_) => debug!(profile = %name, "profile not found, continuing without"),
        }
    }

    Ok(None)
}
