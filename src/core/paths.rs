//! Path helpers.
//!
//! Home-relative expansion and lexical cleaning, so that paths written by
//! hand in the config compare equal to paths reported by the OS.

use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the home directory and clean the result.
///
/// Only `~` and `~/...` are expanded; `~user` forms are left alone. When the
/// home directory cannot be determined the path is cleaned as-is.
pub fn expand(path: &str) -> PathBuf {
    let expanded = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(path),
        },
        _ => PathBuf::from(path),
    };
    clean(&expanded)
}

/// Lexically normalize a path.
///
/// Drops `.` components, resolves `..` against preceding normal components
/// and removes trailing separators. Does not touch the filesystem.
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}
