//! Install-directory resolution
//!
//! Precedence: `--install-dir` flag, then the `INSTALL_DIR` environment
//! variable, then `~/.local/bin`.

use std::path::{Path, PathBuf};

const INSTALL_DIR_ENV: &str = "INSTALL_DIR";

/// Default install directory (~/.local/bin)
pub fn default_install_dir() -> PathBuf {
    dirs::home_dir()
        .expect("Could not determine home directory")
        .join(".local")
        .join("bin")
}

/// Resolve the install directory from the flag, the environment, or the default.
pub fn install_dir(flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    match std::env::var(INSTALL_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => default_install_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ends_with_local_bin() {
        let path = default_install_dir();
        assert!(path.ends_with(".local/bin"));
    }

    #[test]
    fn flag_takes_precedence() {
        let path = install_dir(Some(Path::new("/opt/tools/bin")));
        assert_eq!(path, PathBuf::from("/opt/tools/bin"));
    }
}
