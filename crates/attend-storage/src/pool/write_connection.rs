//! Single connection behind `std::sync::Mutex`. Serialized access.
//!
//! A blocking mutex rather than an async one: every caller is synchronous,
//! and the optimization worker reaches the store through `spawn_blocking`.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use attend_core::config::StorageConfig;
use attend_core::errors::AttendResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a connection to the given database path.
    pub fn open(path: &Path, config: &StorageConfig) -> AttendResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory(config: &StorageConfig) -> AttendResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the lock and execute a closure with the connection.
    pub fn with_conn<F, T>(&self, f: F) -> AttendResult<T>
    where
        F: FnOnce(&Connection) -> AttendResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("connection lock poisoned: {e}")))?;
        f(&guard)
    }

    /// Run a closure inside a transaction; commits on `Ok`, rolls back on `Err`.
    pub fn with_transaction<F, T>(&self, f: F) -> AttendResult<T>
    where
        F: FnOnce(&Connection) -> AttendResult<T>,
    {
        self.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(e.to_string()))?;
            let out = f(&*tx)?;
            tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
            Ok(out)
        })
    }
}
