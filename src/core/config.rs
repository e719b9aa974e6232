//! Configuration file management.
//!
//! Handles reading, writing, and mutating `~/.config/sopsy/config.yaml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::paths;
use crate::core::profile::Profile;
use crate::core::types::{DirectoryKey, ProfileName};
use crate::error::{ConfigError, ProfileError, Result, ValidationError};

/// sopsy configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Document version
    #[serde(default = "default_version")]
    pub version: String,

    /// Profile used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<ProfileName>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<ProfileName, Profile>,

    #[serde(default)]
    pub settings: Settings,

    /// Directory rules for automatic profile selection
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub directories: BTreeMap<DirectoryKey, DirectoryRule>,
}

/// Global settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Extra arguments passed to fzf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fzf_options: Option<String>,

    /// sops binary; a bare name is looked up in PATH
    #[serde(default = "default_sops_path")]
    pub sops_path: String,
}

/// Profile bound to a directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRule {
    pub profile: ProfileName,

    /// Use the profile without prompting
    #[serde(default)]
    pub auto: bool,
}

fn default_version() -> String {
    constants::CONFIG_VERSION.to_string()
}

fn default_sops_path() -> String {
    constants::DEFAULT_SOPS_PATH.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fzf_options: None,
            sops_path: default_sops_path(),
        }
    }
}

impl Settings {
    /// sops binary, falling back to the default when the setting is blank.
    pub fn sops_path(&self) -> &str {
        if self.sops_path.trim().is_empty() {
            constants::DEFAULT_SOPS_PATH
        } else {
            &self.sops_path
        }
    }
}

impl Config {
    /// Create a new empty configuration with current version
    pub fn new() -> Self {
        Self {
            version: default_version(),
            default_profile: None,
            profiles: BTreeMap::new(),
            settings: Settings::default(),
            directories: BTreeMap::new(),
        }
    }

    /// Default config location: `~/.config/sopsy/config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if the home directory is unknown.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }

    /// Load configuration from `path`.
    ///
    /// An empty file yields the defaults. Profile names are filled in from
    /// their map keys.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// or `ConfigError::Parse` if the YAML is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Err(e) => return Err(ConfigError::Read(e).into()),
        };

        let mut config: Self = if contents.trim().is_empty() {
            Self::new()
        } else {
            serde_yaml_ng::from_str(&contents).map_err(ConfigError::Parse)?
        };

        for (name, profile) in config.profiles.iter_mut() {
            profile.name = name.clone();
        }

        debug!(
            profiles = config.profiles.len(),
            directories = config.directories.len(),
            "config loaded"
        );

        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    ///
    /// Overwrites the file in place.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Look up a profile by name.
    pub fn get_profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()).into())
    }

    /// Insert a new profile.
    ///
    /// # Errors
    ///
    /// `ValidationError::EmptyName` for an empty name,
    /// `ProfileError::AlreadyExists` when the name is taken.
    pub fn add_profile(&mut self, profile: Profile) -> Result<()> {
        if profile.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.profiles.contains_key(&profile.name) {
            return Err(ProfileError::AlreadyExists(profile.name).into());
        }
        debug!(profile = %profile.name, "adding profile");
        self.profiles.insert(profile.name.clone(), profile);
        Ok(())
    }

    /// Remove a profile, returning it.
    pub fn remove_profile(&mut self, name: &str) -> Result<Profile> {
        debug!(profile = name, "removing profile");
        self.profiles
            .remove(name)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()).into())
    }

    /// All profiles. Ordering is not part of the contract; sort if needed.
    pub fn list_profiles(&self) -> Vec<&Profile> {
        self.profiles.values().collect()
    }

    /// Make `name` the default profile. The profile must exist.
    pub fn set_default_profile(&mut self, name: &str) -> Result<()> {
        self.get_profile(name)?;
        self.default_profile = Some(name.to_string());
        Ok(())
    }

    pub fn clear_default_profile(&mut self) {
        self.default_profile = None;
    }

    /// Bind `profile` to directory `dir`, replacing any existing rule.
    pub fn link_directory(&mut self, dir: &str, profile: &str, auto: bool) -> Result<()> {
        self.get_profile(profile)?;
        debug!(dir, profile, auto, "linking directory");
        self.directories.insert(
            dir.to_string(),
            DirectoryRule {
                profile: profile.to_string(),
                auto,
            },
        );
        Ok(())
    }

    /// Drop the rule for `dir`, returning it.
    ///
    /// The rule is matched by key first, then by expanded path, so `~/proj`
    /// and `/home/me/proj` refer to the same rule.
    pub fn unlink_directory(&mut self, dir: &str) -> Result<DirectoryRule> {
        if let Some(rule) = self.directories.remove(dir) {
            return Ok(rule);
        }

        let wanted = paths::expand(dir);
        let key = self
            .directories
            .keys()
            .find(|k| paths::expand(k) == wanted)
            .cloned()
            .ok_or(ProfileError::DirectoryNotLinked(wanted))?;

        self.directories
            .remove(&key)
            .ok_or_else(|| ProfileError::DirectoryNotLinked(PathBuf::from(key)).into())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
