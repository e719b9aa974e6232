//! Shell integration.
//!
//! Installs a shell function wrapping `sopsy` so that `sopsy profile use`
//! exports `SOPS_AGE_KEY_FILE` into the calling shell.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::cli::{banner, output, IntegrationShell};
use crate::core::constants;
use crate::error::{ConfigError, Error, Result};

const SHELL_FUNCTION: &str = r#"
# sopsy shell integration
sopsy() {
  if [[ "${1:-}" == "profile" && "${2:-}" == "use" ]]; then
    local output; output=$(command sopsy "$@" 2>&1); local rc=$?
    if [[ $rc -eq 0 ]]; then
      while IFS= read -r line; do
        [[ "$line" == export\ * ]] && eval "$line" && echo "✓ Set ${line#export }"
      done <<< "$output"
    else echo "$output" >&2; return $rc; fi
  else command sopsy "$@"; fi
}
"#;

/// Shell rc file for `shell`.
fn rc_file(shell: IntegrationShell) -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(match shell {
        IntegrationShell::Zsh => home.join(".zshrc"),
        IntegrationShell::Bash => home.join(".bashrc"),
    })
}

/// Append the shell function to the rc file, once.
pub fn install(shell: IntegrationShell) -> Result<()> {
    let rc = rc_file(shell)?;
    let rc_display = rc.display().to_string();

    let existing = std::fs::read_to_string(&rc).unwrap_or_default();
    if existing.contains(constants::SHELL_MARKER) {
        output::success(&format!("already installed in {}", output::path(&rc_display)));
        return Ok(());
    }

    banner::print_banner();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&rc)
        .map_err(|e| Error::Other(format!("failed to open {}: {}", rc_display, e)))?;
    file.write_all(SHELL_FUNCTION.as_bytes())
        .map_err(|e| Error::Other(format!("failed to write to {}: {}", rc_display, e)))?;

    info!(rc = %rc_display, "shell integration installed");
    output::success(&format!(
        "shell integration installed to {}",
        output::path(&rc_display)
    ));
    output::blank();
    output::hint(&format!("restart your terminal or run: source {}", rc_display));
    output::hint("then switch profiles with: sopsy profile use <name>");
    Ok(())
}

/// Single-quote `value` for POSIX shells.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
