//! Schema migrations, applied in order and recorded in `schema_version`.

mod v001_initial_schema;

use rusqlite::{params, Connection};
use tracing::info;

use attend_core::errors::{AttendError, AttendResult, StorageError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> AttendResult<()>;

const MIGRATIONS: &[(u32, MigrationFn)] = &[(1, v001_initial_schema::migrate)];

/// Highest schema version known to this build.
pub const LATEST_VERSION: u32 = 1;

/// Current schema version of the database, 0 when fresh.
pub fn current_version(conn: &Connection) -> AttendResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let version: Option<i64> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i64>>(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(version.unwrap_or(0) as u32)
}

/// Apply every pending migration, each in its own transaction.
pub fn run_migrations(conn: &Connection) -> AttendResult<u32> {
    let current = current_version(conn)?;
    for &(version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        migrate(&*tx).map_err(|e| {
            AttendError::StorageError(StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })
        })?;
        tx.execute("INSERT INTO schema_version (version) VALUES (?1)", params![version])
            .map_err(|e| to_storage_err(e.to_string()))?;
        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        info!(version, "applied schema migration");
    }
    Ok(LATEST_VERSION.max(current))
}
