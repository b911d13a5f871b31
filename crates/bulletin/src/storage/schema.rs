//! `SQLite` schema for the board database.
//!
//! One table, `kv`, with a row per key. The schema version is kept in the
//! database header (`PRAGMA user_version`); a fresh file reads as 0.

use rusqlite::Connection;
use tracing::debug;

use crate::error::{Error, Result};

/// Schema version written by this build.
pub const SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the key-value table.
pub const CREATE_KV_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// Create the `kv` table if needed and stamp the schema version.
///
/// # Errors
///
/// Returns an error if the database was written with a newer schema
/// version, or if creating the table fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {found} is newer than supported version {SCHEMA_VERSION}"
            ),
        });
    }

    conn.execute_batch(CREATE_KV_TABLE)?;
    if found < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        debug!(from = found, to = SCHEMA_VERSION, "stamped schema version");
    }
    Ok(())
}

/// The schema version recorded in the database header.
///
/// # Errors
///
/// Returns an error if the pragma cannot be read.
pub fn schema_version(conn: &Connection) -> Result<i32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
