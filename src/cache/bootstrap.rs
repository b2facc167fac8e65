// Process bootstrap for the cache store.
// Ensures the storage directory, database file, and tables exist before first use.

use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::error::{CacheError, Result};

use super::paths;
use super::schema;
use super::store::CacheStore;

/// Open the store in the well-known directory.
///
/// Honors `RUCIO_JUPYTERLAB_DIR`, falling back to `~/.rucio_jupyterlab`.
pub fn open_default() -> Result<CacheStore> {
    let dir = paths::store_dir().ok_or(CacheError::NoHomeDir)?;
    open(&dir)
}

/// Open the store in `dir`, creating the directory and tables if needed.
///
/// Idempotent: repeated calls reuse the existing file and its contents.
pub fn open(dir: &Path) -> Result<CacheStore> {
    Ok(CacheStore::new(open_connection(dir)?))
}

/// Prepare `dir` and return a connection with all tables created.
pub fn open_connection(dir: &Path) -> Result<Connection> {
    fs::create_dir_all(dir)?;

    let path = paths::db_path(dir);
    let conn = Connection::open(&path)?;
    schema::create_tables(&conn)?;

    info!(path = %path.display(), "cache store ready");
    Ok(conn)
}
