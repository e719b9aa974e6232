//! sops integration.
//!
//! - [`args`]: profile → argument vector
//! - [`executor`]: launching sops or rendering a dry run

pub mod args;
mod executor;

pub use executor::{Executor, Invocation, Launcher, SystemLauncher};
