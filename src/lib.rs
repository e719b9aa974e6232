//! sopsy - Profile manager for SOPS.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── context       # Per-invocation config + flags
//! │   ├── config        # config init/show/edit/path
//! │   ├── profile       # profile add/ls/show/rm/edit/use/reset/link/unlink
//! │   ├── crypt         # encrypt/decrypt/edit
//! │   ├── resolve       # Profile selection rules
//! │   ├── shell         # Shell integration install
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # config.yaml management
//!     ├── profile       # Profiles, age key files
//!     ├── resolver      # Directory rules
//!     ├── select        # fzf / menu selection
//!     └── sops/         # sops integration
//!         ├── args      # Profile → argument vector
//!         └── executor  # Launch or dry-run
//! ```
//!
//! sopsy implements no cryptography: sops does the work, sopsy decides which
//! keys and options it gets.

pub mod cli;
pub mod core;
pub mod error;
