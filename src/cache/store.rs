// Cache store for configuration values and DID lookups.
// Handles TTL stamping, expiry filtering, and JSON encoding of attached-file lists.

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::error::Result;

use super::clock::{Clock, SystemClock};
use super::schema::{self, AttachedFile, FileReplica};

/// TTL for both cache tables: 1 hour.
pub const CACHE_TTL: i64 = 3600;

/// Configuration key holding the active instance name.
pub const ACTIVE_INSTANCE_KEY: &str = "instance";

/// Façade over the backing database.
///
/// Holds the single connection opened at bootstrap. Every operation is one
/// blocking statement; upserts are `INSERT OR REPLACE` so concurrent writers
/// never interleave a read-then-write.
pub struct CacheStore<C = SystemClock> {
    conn: Connection,
    clock: C,
}

impl CacheStore<SystemClock> {
    /// Wrap a connection whose tables already exist.
    pub fn new(conn: Connection) -> Self {
        Self::with_clock(conn, SystemClock)
    }

    /// Open a non-persistent store with the full schema.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::create_tables(&conn)?;
        Ok(Self::new(conn))
    }
}

impl<C: Clock> CacheStore<C> {
    /// Wrap a connection whose tables already exist, reading time from `clock`.
    pub fn with_clock(conn: Connection, clock: C) -> Self {
        Self { conn, clock }
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Release the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn expiry(&self) -> i64 {
        self.clock.now() + CACHE_TTL
    }

    /// Insert or overwrite a configuration value.
    pub fn put_config(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO Configuration (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        debug!(key, "stored config value");
        Ok(())
    }

    /// Read a configuration value, `None` if it was never set.
    pub fn get_config(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM Configuration WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Read the active instance name.
    pub fn get_active_instance(&self) -> Result<Option<String>> {
        self.get_config(ACTIVE_INSTANCE_KEY)
    }

    /// Set the active instance name.
    pub fn set_active_instance(&self, name: &str) -> Result<()> {
        self.put_config(ACTIVE_INSTANCE_KEY, name)
    }

    /// Read the cached files attached to `did`.
    ///
    /// Returns `None` when no live entry exists. `Some(vec![])` is a hit for a
    /// parent with no attached files.
    pub fn get_attached_files(
        &self,
        namespace: &str,
        did: &str,
    ) -> Result<Option<Vec<AttachedFile>>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT file_dids FROM AttachedFilesCache \
                 WHERE namespace = ?1 AND did = ?2 AND expiry > ?3",
                params![namespace, did, self.clock.now()],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(payload) => {
                let files = schema::decode_attached_files(&payload)?;
                debug!(namespace, did, count = files.len(), "attached files cache hit");
                Ok(Some(files))
            }
            None => {
                debug!(namespace, did, "attached files cache miss");
                Ok(None)
            }
        }
    }

    /// Replace the cached attached-files list for `parent_did`.
    pub fn set_attached_files(
        &self,
        namespace: &str,
        parent_did: &str,
        attached_files: &[AttachedFile],
    ) -> Result<()> {
        let payload = schema::encode_attached_files(attached_files)?;
        let expiry = self.expiry();

        self.conn.execute(
            "INSERT OR REPLACE INTO AttachedFilesCache (namespace, did, file_dids, expiry) \
             VALUES (?1, ?2, ?3, ?4)",
            params![namespace, parent_did, payload, expiry],
        )?;
        debug!(
            namespace,
            did = parent_did,
            count = attached_files.len(),
            expiry,
            "cached attached files"
        );
        Ok(())
    }

    /// Read the cached replica for `file_did`, `None` on miss or expiry.
    ///
    /// A hit may still carry `pfn: None`.
    pub fn get_file_replica(
        &self,
        namespace: &str,
        file_did: &str,
    ) -> Result<Option<FileReplica>> {
        let replica = self
            .conn
            .query_row(
                "SELECT namespace, did, pfn, size, expiry FROM FileReplicasCache \
                 WHERE namespace = ?1 AND did = ?2 AND expiry > ?3",
                params![namespace, file_did, self.clock.now()],
                FileReplica::from_row,
            )
            .optional()?;

        debug!(namespace, did = file_did, hit = replica.is_some(), "file replica lookup");
        Ok(replica)
    }

    /// Replace the cached replica for `file_did`.
    pub fn set_file_replica(
        &self,
        namespace: &str,
        file_did: &str,
        pfn: Option<&str>,
        size: i64,
    ) -> Result<()> {
        let expiry = self.expiry();

        self.conn.execute(
            "INSERT OR REPLACE INTO FileReplicasCache (namespace, did, pfn, size, expiry) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![namespace, file_did, pfn, size, expiry],
        )?;
        debug!(namespace, did = file_did, expiry, "cached file replica");
        Ok(())
    }
}
