//! Command-line interface.

pub mod banner;
pub mod completions;
pub mod config;
pub mod context;
pub mod crypt;
pub mod output;
pub mod profile;
pub mod resolve;
pub mod shell;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::Result;
pub use context::Context;

/// sopsy - Profile manager for SOPS.
#[derive(Parser)]
#[command(
    name = "sopsy",
    about = "Profile manager for SOPS",
    long_about = "Manage age key files and recipients as named profiles and run sops with them.\n\n\
                  Quick start:\n  \
                  1. sopsy config init\n  \
                  2. sopsy profile add stg --age-key-file ~/.sops/stg.txt\n  \
                  3. sopsy profile use stg\n  \
                  4. sopsy encrypt secrets.yaml",
    version
)]
pub struct Cli {
    /// Config file (default: ~/.config/sopsy/config.yaml)
    #[arg(short, long, global = true, env = "SOPSY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Print the sops command instead of running it
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage encryption profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Encrypt a file with the selected profile
    Encrypt {
        /// File to encrypt
        file: String,
    },

    /// Decrypt a file
    Decrypt {
        /// File to decrypt
        file: String,
    },

    /// Edit an encrypted file in $EDITOR
    Edit {
        /// File to edit
        file: String,
    },

    /// Install shell integration for `profile use`
    Init {
        #[arg(value_enum)]
        shell: IntegrationShell,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version
    Version,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Create a new configuration file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Print the current configuration
    Show,

    /// Open the configuration in $EDITOR
    Edit,

    /// Print the configuration file path
    Path,
}

/// Profile subcommands.
#[derive(Subcommand)]
pub enum ProfileAction {
    /// Add a new profile
    #[command(after_help = "Examples:\n  \
        sopsy profile add dev --description Development --age-key-file ~/.config/sops/age/keys.txt\n  \
        sopsy profile add team --age age1abc... --age age1def...")]
    Add {
        /// Profile name
        name: String,
        #[command(flatten)]
        spec: ProfileSpec,
    },

    /// List profiles
    #[command(alias = "list")]
    Ls {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show profile details
    Show {
        /// Profile name
        name: String,
    },

    /// Remove a profile
    Rm {
        /// Profile name
        name: String,
    },

    /// Open the configuration in $EDITOR
    Edit {
        /// Profile name
        name: String,
    },

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// Clear the default profile
    Reset,

    /// Bind a profile to a directory tree
    Link {
        /// Profile name
        name: String,
        /// Directory (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Use the profile without prompting
        #[arg(long)]
        auto: bool,
    },

    /// Remove a directory binding
    Unlink {
        /// Directory (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

/// Profile settings accepted by `profile add`.
#[derive(clap::Args, Debug, Default)]
pub struct ProfileSpec {
    /// Profile description
    #[arg(long)]
    pub description: Option<String>,

    /// Path to age key file (contains public and private keys)
    #[arg(long)]
    pub age_key_file: Option<String>,

    /// age recipient public key (repeatable)
    #[arg(long = "age", value_delimiter = ',')]
    pub age: Vec<String>,

    /// Only encrypt keys matching this regex
    #[arg(long)]
    pub encrypted_regex: Option<String>,

    /// Only encrypt keys with this suffix
    #[arg(long)]
    pub encrypted_suffix: Option<String>,

    /// Leave keys matching this regex unencrypted
    #[arg(long)]
    pub unencrypted_regex: Option<String>,

    /// Leave keys with this suffix unencrypted
    #[arg(long)]
    pub unencrypted_suffix: Option<String>,
}

/// Shells supported by the `init` integration.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum IntegrationShell {
    Zsh,
    Bash,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a parsed command line.
///
/// The config is loaded once here and handed to the command as a [`Context`].
/// `config` and `profile` commands start from an empty config when the file
/// does not exist yet.
pub fn execute(cli: Cli) -> Result<()> {
    let Cli {
        config: config_flag,
        profile: profile_flag,
        dry_run,
        command,
        ..
    } = cli;
    let load = |allow_missing: bool| {
        Context::load(
            config_flag.clone(),
            profile_flag.clone(),
            dry_run,
            allow_missing,
        )
    };

    match command {
        Command::Init { shell } => shell::install(shell),
        Command::Completions { shell } => completions::execute(shell),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Config { action } => {
            // init, edit and path work on the file itself, even a broken one
            let path = Context::config_path(config_flag.as_deref())?;
            match action {
                ConfigAction::Init { force } => config::init(&path, force),
                ConfigAction::Show => config::show(&load(true)?),
                ConfigAction::Edit => config::edit(&path),
                ConfigAction::Path => config::path(&path),
            }
        }
        Command::Profile { action } => {
            let mut ctx = load(true)?;
            match action {
                ProfileAction::Add { name, spec } => profile::add(&mut ctx, &name, spec),
                ProfileAction::Ls { json } => profile::list(&ctx, json),
                ProfileAction::Show { name } => profile::show(&ctx, &name),
                ProfileAction::Rm { name } => profile::rm(&mut ctx, &name),
                ProfileAction::Edit { name } => profile::edit(&ctx, &name),
                ProfileAction::Use { name } => profile::use_profile(&mut ctx, &name),
                ProfileAction::Reset => profile::reset(&mut ctx),
                ProfileAction::Link { name, dir, auto } => {
                    profile::link(&mut ctx, &name, dir.as_deref(), auto)
                }
                ProfileAction::Unlink { dir } => profile::unlink(&mut ctx, dir.as_deref()),
            }
        }
        Command::Encrypt { file } => crypt::encrypt(&load(false)?, &file),
        Command::Decrypt { file } => crypt::decrypt(&load(false)?, &file),
        Command::Edit { file } => crypt::edit(&load(false)?, &file),
    }
}
