//! sopsy - Profile manager for SOPS.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sopsy::cli::output;
use sopsy::cli::{execute, Cli};
use sopsy::error::{ConfigError, Error, ExecError, ProfileError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("SOPSY_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("sopsy=debug")
        } else {
            EnvFilter::new("sopsy=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotFound(_)) => Some("run: sopsy config init"),
            Error::Profile(ProfileError::NoProfiles) => {
                Some("run: sopsy profile add <name> --age-key-file <path>")
            }
            Error::Profile(ProfileError::NotFound(_)) => Some("run: sopsy profile ls"),
            Error::Exec(ExecError::NotFound(_)) => {
                Some("install sops or set settings.sops_path in the config")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
