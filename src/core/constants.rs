//! Constants used throughout sopsy.
//!
//! Centralizes magic strings and configuration values.

/// Config directory relative to HOME (~/.config/sopsy).
pub const CONFIG_DIR: &str = ".config/sopsy";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

/// Current config document version.
pub const CONFIG_VERSION: &str = "1";

/// Default external encryption tool, resolved through PATH.
pub const DEFAULT_SOPS_PATH: &str = "sops";

/// Environment variable sops reads the age identity file from.
pub const SOPS_AGE_KEY_FILE: &str = "SOPS_AGE_KEY_FILE";

/// Marker line preceding the public key in an age key file.
pub const PUBLIC_KEY_PREFIX: &str = "# public key:";

/// Fuzzy selector binary.
pub const FZF: &str = "fzf";

/// Editor used when `EDITOR` is unset.
pub const DEFAULT_EDITOR: &str = "vim";

/// Comment marking the installed shell integration.
pub const SHELL_MARKER: &str = "# sopsy shell integration";
