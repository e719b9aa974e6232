//! Translation of profiles into sops command lines.

use std::path::PathBuf;
use tracing::debug;

use crate::core::profile::Profile;
use crate::error::Result;

/// Build sops arguments for `command` on `file` using `profile`.
///
/// Emits one `--age <key>` pair per public key, then the non-empty sops
/// options in fixed order, then `command` and `file`.
///
/// # Errors
///
/// Fails when the profile's age key file cannot be read or holds no
/// public key line.
pub fn build(profile: &Profile, command: &str, file: &str) -> Result<Vec<String>> {
    let mut args = Vec::with_capacity(16);

    if let Some(age) = &profile.age {
        for key in age.all_public_keys()? {
            args.push("--age".to_string());
            args.push(key);
        }
    }

    let opts = &profile.sops;
    let flags = [
        ("--encrypted-regex", &opts.encrypted_regex),
        ("--encrypted-suffix", &opts.encrypted_suffix),
        ("--unencrypted-regex", &opts.unencrypted_regex),
        ("--unencrypted-suffix", &opts.unencrypted_suffix),
    ];
    for (flag, value) in flags {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            args.push(flag.to_string());
            args.push(value.to_string());
        }
    }

    args.push(command.to_string());
    args.push(file.to_string());

    debug!(profile = %profile.name, command, argc = args.len(), "built sops arguments");
    Ok(args)
}

/// Arguments for decrypt.
///
/// sops reads recipients from the file's own metadata; only the identity
/// file is needed, and that goes through the environment.
pub fn build_decrypt(file: &str) -> Vec<String> {
    vec!["decrypt".to_string(), file.to_string()]
}

/// Arguments for edit, with the profile's keys when there is one.
pub fn build_edit(profile: Option<&Profile>, file: &str) -> Result<Vec<String>> {
    match profile {
        Some(profile) => build(profile, "edit", file),
        None => Ok(vec!["edit".to_string(), file.to_string()]),
    }
}

/// Key file to export as `SOPS_AGE_KEY_FILE`, if the profile has one.
pub fn key_file_path(profile: Option<&Profile>) -> Option<PathBuf> {
    profile.and_then(Profile::key_file_path)
}
