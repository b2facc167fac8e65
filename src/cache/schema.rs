// Persisted record shapes.
// Table definitions, value objects, and row mapping for the three tables.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIGURATION_TABLE: &str = "Configuration";
pub const ATTACHED_FILES_TABLE: &str = "AttachedFilesCache";
pub const FILE_REPLICAS_TABLE: &str = "FileReplicasCache";

const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS Configuration (
        key TEXT NOT NULL UNIQUE,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS AttachedFilesCache (
        namespace TEXT NOT NULL,
        did TEXT NOT NULL,
        file_dids TEXT NOT NULL,
        expiry INTEGER NOT NULL,
        PRIMARY KEY (namespace, did)
    );

    CREATE TABLE IF NOT EXISTS FileReplicasCache (
        namespace TEXT NOT NULL,
        did TEXT NOT NULL,
        pfn TEXT,
        size INTEGER NOT NULL,
        expiry INTEGER NOT NULL,
        PRIMARY KEY (namespace, did)
    );
"#;

/// Create all tables if they do not exist yet. Safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_TABLES)?;
    Ok(())
}

/// A file attached to a parent DID.
///
/// Only `did` and `size` are persisted; `size` is `null` when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedFile {
    pub did: String,
    pub size: Option<i64>,
}

impl AttachedFile {
    /// Create an attached file with an optional size.
    pub fn new(did: impl Into<String>, size: Option<i64>) -> Self {
        Self {
            did: did.into(),
            size,
        }
    }
}

/// Encode an attached-files list for the `file_dids` column.
pub fn encode_attached_files(files: &[AttachedFile]) -> Result<String> {
    Ok(serde_json::to_string(files)?)
}

/// Decode the `file_dids` column back into an ordered list.
pub fn decode_attached_files(payload: &str) -> Result<Vec<AttachedFile>> {
    Ok(serde_json::from_str(payload)?)
}

/// A cached replica location for a single file DID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReplica {
    pub namespace: String,
    pub did: String,
    /// Physical file name. `None` means the location is unknown.
    pub pfn: Option<String>,
    pub size: i64,
    /// Unix timestamp after which the entry is stale.
    pub expiry: i64,
}

impl FileReplica {
    /// Map a `FileReplicasCache` row selected in column order.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            namespace: row.get(0)?,
            did: row.get(1)?,
            pfn: row.get(2)?,
            size: row.get(3)?,
            expiry: row.get(4)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN (?1, ?2, ?3)",
                [CONFIGURATION_TABLE, ATTACHED_FILES_TABLE, FILE_REPLICAS_TABLE],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_encoded_payload_has_only_did_and_size() {
        let files = vec![
            AttachedFile::new("file:1", Some(100)),
            AttachedFile::new("file:2", None),
        ];

        let payload = encode_attached_files(&files).unwrap();
        assert_eq!(
            payload,
            r#"[{"did":"file:1","size":100},{"did":"file:2","size":null}]"#
        );
    }

    #[test]
    fn test_decode_missing_size_is_none() {
        let files = decode_attached_files(r#"[{"did":"file:3"}]"#).unwrap();
        assert_eq!(files, vec![AttachedFile::new("file:3", None)]);
    }

    #[test]
    fn test_decode_corrupt_payload_fails() {
        assert!(decode_attached_files("not json").is_err());
        assert!(decode_attached_files(r#"{"did":"x"}"#).is_err());
    }
}
