//! Core library components.
//!
//! Profile and configuration management, directory resolution and the sops
//! integration. User-facing output lives in `cli`.

pub mod config;
pub mod constants;
pub mod paths;
pub mod profile;
pub mod resolver;
pub mod select;
pub mod sops;
pub mod types;
