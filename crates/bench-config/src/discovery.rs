//! Locating tool binaries and the timing harness on `PATH`

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;
use which::which;

use crate::errors::ConfigError;

const PYENV_SHIM_MARKER: &str = "pyenv/shims";

/// Find a binary on `PATH`, returning its full path.
///
/// pyenv shims are resolved to the real executable through `pyenv which`,
/// since a shim re-resolves the interpreter on every spawn and skews timing.
pub fn find_binary(name: &str) -> Option<PathBuf> {
    let found = which(name).ok()?;
    if !is_pyenv_shim(&found) {
        return Some(found);
    }

    debug!("{} resolves to a pyenv shim: {:?}", name, found);
    match Command::new("pyenv").args(["which", name]).output() {
        Ok(output) if output.status.success() => {
            let resolved = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if resolved.is_empty() {
                Some(found)
            } else {
                Some(PathBuf::from(resolved))
            }
        }
        _ => Some(found),
    }
}

pub fn is_pyenv_shim(path: &Path) -> bool {
    path.to_string_lossy().contains(PYENV_SHIM_MARKER)
}

/// Locate `hyperfine`, preferring an explicit override
pub fn find_hyperfine(override_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = override_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(ConfigError::HyperfineMissing(path.to_path_buf()));
    }
    which("hyperfine").map_err(|_| ConfigError::HyperfineNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pyenv_shim_detection() {
        assert!(is_pyenv_shim(Path::new("/home/dev/.pyenv/shims/pipenv")));
        assert!(!is_pyenv_shim(Path::new("/usr/local/bin/pipenv")));
    }

    #[test]
    fn test_missing_binary_is_none() {
        assert!(find_binary("bench-ripenv-definitely-not-installed").is_none());
    }

    #[test]
    fn test_hyperfine_override() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let fake = temp_dir.path().join("hyperfine");
        assert!(std::fs::write(&fake, "").is_ok());
        assert!(find_hyperfine(Some(&fake)).is_ok_and(|p| p == fake));

        let missing = temp_dir.path().join("nope");
        assert!(matches!(
            find_hyperfine(Some(&missing)),
            Err(ConfigError::HyperfineMissing(_))
        ));
    }
}
