//! Per-invocation command context.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::config::Config;
use crate::core::select::FzfSelector;
use crate::core::sops::Executor;
use crate::error::{ConfigError, Error, Result};

/// Everything a command needs: the loaded config, where it lives, and the
/// global flags. Built once in [`crate::cli::execute`].
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    /// `--profile`
    pub profile: Option<String>,
    /// `--dry-run`
    pub dry_run: bool,
}

impl Context {
    /// Config file location: the `--config` flag or the default path.
    pub fn config_path(flag: Option<&Path>) -> Result<PathBuf> {
        match flag {
            Some(path) => Ok(path.to_path_buf()),
            None => Config::default_path(),
        }
    }

    /// Load the config and build the context.
    ///
    /// With `allow_missing`, a config file that does not exist yet yields an
    /// empty config. Parse errors are never swallowed.
    pub fn load(
        config_flag: Option<PathBuf>,
        profile: Option<String>,
        dry_run: bool,
        allow_missing: bool,
    ) -> Result<Self> {
        let config_path = Self::config_path(config_flag.as_deref())?;

        let config = match Config::load(&config_path) {
            Ok(config) => config,
            Err(Error::Config(ConfigError::NotFound(_))) if allow_missing => {
                debug!(path = %config_path.display(), "no config yet, starting empty");
                Config::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            config,
            config_path,
            profile,
            dry_run,
        })
    }

    /// Context around an in-memory config.
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
            profile: None,
            dry_run: false,
        }
    }

    /// Persist the config to where it was loaded from.
    pub fn save(&self) -> Result<()> {
        self.config.save(&self.config_path)
    }

    /// sops executor for the configured binary.
    pub fn executor(&self) -> Executor {
        Executor::new(self.config.settings.sops_path())
    }

    /// Interactive profile selector.
    pub fn selector(&self) -> FzfSelector {
        FzfSelector::new(self.config.settings.fzf_options.clone())
    }
}

/// Current working directory.
pub fn current_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}
