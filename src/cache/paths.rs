// Cache path utilities.
// Resolves the well-known directory and file backing the store.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// Environment variable overriding the storage directory.
pub const DIR_ENV_VAR: &str = "RUCIO_JUPYTERLAB_DIR";

const DIR_NAME: &str = ".rucio_jupyterlab";
const DB_FILE_NAME: &str = "cache.db";

/// Get the default storage directory (~/.rucio_jupyterlab).
pub fn default_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(DIR_NAME))
}

/// Get the storage directory, honoring the environment override.
pub fn store_dir() -> Option<PathBuf> {
    resolve_dir(env::var_os(DIR_ENV_VAR))
}

/// Pick the override directory if set and non-empty, else the default.
fn resolve_dir(over: Option<OsString>) -> Option<PathBuf> {
    match over {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => default_dir(),
    }
}

/// Path to the database file inside a storage directory.
pub fn db_path(dir: &Path) -> PathBuf {
    dir.join(DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path() {
        let path = db_path(Path::new("/tmp/store"));
        assert_eq!(path, PathBuf::from("/tmp/store/cache.db"));
    }

    #[test]
    fn test_resolve_dir_override() {
        let dir = resolve_dir(Some(OsString::from("/x")));
        assert_eq!(dir, Some(PathBuf::from("/x")));
    }

    #[test]
    fn test_resolve_dir_empty_or_unset_uses_default() {
        assert_eq!(resolve_dir(Some(OsString::new())), default_dir());
        assert_eq!(resolve_dir(None), default_dir());
    }

    #[test]
    fn test_default_dir() {
        // Verifies path construction only
        if let Some(dir) = default_dir() {
            assert!(dir.ends_with(".rucio_jupyterlab"));
        }
    }
}
