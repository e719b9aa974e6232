//! Encryption profiles.
//!
//! A profile bundles the age backend settings and sops options used to
//! build a sops invocation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::trace;

use crate::core::constants;
use crate::core::paths;
use crate::core::types::{ProfileName, PublicKey};
use crate::error::{ProfileError, Result};

/// A named sops encryption profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Populated from the map key on load, never persisted.
    #[serde(skip)]
    pub name: ProfileName,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// age backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<AgeConfig>,

    /// Options controlling which parts of a file sops encrypts
    #[serde(default, skip_serializing_if = "SopsOptions::is_empty")]
    pub sops: SopsOptions,
}

/// age backend configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeConfig {
    /// Path to the age key file (holds both the identity and its public key).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,

    /// Explicit recipient public keys.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<PublicKey>,
}

/// sops options selecting encrypted and unencrypted regions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SopsOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_regex: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_suffix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unencrypted_regex: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unencrypted_suffix: Option<String>,
}

impl Profile {
    /// Create an empty profile with the given name.
    pub fn new(name: impl Into<ProfileName>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// True when at least one backend is configured.
    pub fn has_backends(&self) -> bool {
        self.age.as_ref().is_some_and(AgeConfig::is_configured)
    }

    /// Human-readable summary of configured backends.
    pub fn backend_summary(&self) -> &'static str {
        if self.has_backends() {
            "age"
        } else {
            "none"
        }
    }

    /// Expanded age key file path, if one is configured.
    pub fn key_file_path(&self) -> Option<PathBuf> {
        self.age.as_ref().and_then(AgeConfig::key_file_path)
    }
}

impl AgeConfig {
    /// True when a key file or at least one recipient is set.
    pub fn is_configured(&self) -> bool {
        self.key_file.as_deref().is_some_and(|f| !f.is_empty()) || !self.recipients.is_empty()
    }

    /// Expanded key file path.
    pub fn key_file_path(&self) -> Option<PathBuf> {
        self.key_file
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(paths::expand)
    }

    /// The profile's primary public key.
    ///
    /// The first explicit recipient when there is one, otherwise the key read
    /// from the key file.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NoAgeKeys` when neither is set, and the
    /// [`read_public_key`] errors otherwise.
    pub fn public_key(&self) -> Result<PublicKey> {
        if let Some(first) = self.recipients.first() {
            return Ok(first.clone());
        }
        match self.key_file_path() {
            Some(path) => read_public_key(&path),
            None => Err(ProfileError::NoAgeKeys.into()),
        }
    }

    /// All public keys: recipients first, then the key file's public key if
    /// it is not already listed.
    pub fn all_public_keys(&self) -> Result<Vec<PublicKey>> {
        let mut keys = self.recipients.clone();

        if let Some(path) = self.key_file_path() {
            let key = read_public_key(&path)?;
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        Ok(keys)
    }
}

impl SopsOptions {
    pub fn is_empty(&self) -> bool {
        [
            &self.encrypted_regex,
            &self.encrypted_suffix,
            &self.unencrypted_regex,
            &self.unencrypted_suffix,
        ]
        .iter()
        .all(|v| v.as_deref().map_or(true, str::is_empty))
    }
}

/// Extract the public key from an age key file.
///
/// age writes it as a comment: `# public key: age1...`. The first such line
/// with a value wins.
pub fn read_public_key(path: &std::path::Path) -> Result<PublicKey> {
    trace!(path = %path.display(), "reading age public key");

    let contents = std::fs::read_to_string(path).map_err(|source| ProfileError::KeyFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    contents
        .lines()
        .filter_map(|line| line.strip_prefix(constants::PUBLIC_KEY_PREFIX))
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProfileError::NoPublicKey(path.to_path_buf()).into())
}
