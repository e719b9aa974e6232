//! Directory-based profile resolution.

use std::path::{Path, PathBuf};
use tracing::trace;

use crate::core::config::Config;
use crate::core::paths;
use crate::core::types::ProfileName;

/// A directory rule that matched a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub profile: ProfileName,
    pub auto: bool,
    /// Expanded directory of the matching rule
    pub directory: PathBuf,
}

impl Config {
    /// Find the profile bound to `cwd` by directory rules.
    ///
    /// A rule matches when its expanded directory equals `cwd` or is a
    /// component-wise ancestor of it (`/foo` does not match `/foo2`). When
    /// several rules match, the longest directory wins.
    pub fn resolve_profile(&self, cwd: &str) -> Option<Resolution> {
        if self.directories.is_empty() {
            return None;
        }

        let cwd = paths::expand(cwd);

        let resolution = self
            .directories
            .iter()
            .map(|(dir, rule)| (paths::expand(dir), rule))
            .filter(|(dir, _)| cwd.starts_with(dir))
            .max_by_key(|(dir, _)| dir.components().count())
            .map(|(directory, rule)| Resolution {
                profile: rule.profile.clone(),
                auto: rule.auto,
                directory,
            });

        trace!(cwd = %cwd.display(), ?resolution, "resolved directory rule");
        resolution
    }

    /// [`Config::resolve_profile`] for a filesystem path.
    pub fn resolve_profile_for(&self, cwd: &Path) -> Option<Resolution> {
        self.resolve_profile(&cwd.to_string_lossy())
    }
}
