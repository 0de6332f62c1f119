//! Utility functions and helpers.

pub mod http;

use std::path::{Path, PathBuf};

/// Get the user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if s.starts_with("~/") || s == "~" {
        if let Some(home) = home_dir() {
            return home.join(s.strip_prefix("~/").unwrap_or(""));
        }
    }
    path.to_path_buf()
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".procon-gardener")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(
            expand_tilde(Path::new("/srv/archive")),
            PathBuf::from("/srv/archive")
        );
        assert_eq!(
            expand_tilde(Path::new("archive/~x")),
            PathBuf::from("archive/~x")
        );
    }

    #[test]
    fn test_expand_tilde_uses_home() {
        if let Some(home) = home_dir() {
            assert_eq!(expand_tilde(Path::new("~/ac")), home.join("ac"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }

    #[test]
    fn test_default_config_path() {
        assert!(default_config_path().ends_with(".procon-gardener/config.toml"));
    }
}
