//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A profile name (key of the `profiles` map).
pub type ProfileName = String;

/// An age public key string (starts with "age1...").
pub type PublicKey = String;

/// A directory path as written in the config (may start with `~`).
pub type DirectoryKey = String;
