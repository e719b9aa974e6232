//! Error types for sopsy.
//!
//! Errors are grouped by concern and wrapped in a top-level [`Error`].

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error means "the thing asked for does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Config(ConfigError::NotFound(_))
                | Error::Profile(ProfileError::NotFound(_))
                | Error::Profile(ProfileError::NoPublicKey(_))
        )
    }
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("config already exists at {} (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_yaml_ng::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("failed to create config directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to determine home directory")]
    NoHomeDir,
}

/// Profile lookup and key material errors.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("profile not found: {0}")]
    NotFound(String),

    #[error("profile already exists: {0}")]
    AlreadyExists(String),

    #[error("failed to open key file {}: {source}", .path.display())]
    KeyFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no public key found in key file: {}", .0.display())]
    NoPublicKey(PathBuf),

    #[error("no age key file or recipients configured")]
    NoAgeKeys,

    #[error("no profiles configured")]
    NoProfiles,

    #[error("no profile selected")]
    NoneSelected,

    #[error("no directory rule for {}", .0.display())]
    DirectoryNotLinked(PathBuf),
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("profile name is required")]
    EmptyName,

    #[error("at least one encryption backend is required (--age-key-file or --age)")]
    NoBackend,
}

/// External process errors.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("{0} not found in PATH")]
    NotFound(String),

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}", describe_exit(.code))]
    Failed { program: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
