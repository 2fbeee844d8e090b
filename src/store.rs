// Store handle
//
// One SQLite connection per process, opened by whoever composes the
// application (server binary, CLI, tests) and passed down explicitly.
// Cloning the handle shares the same connection.

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::db::setup_database;
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct CollegeStore {
    conn: Arc<Mutex<Connection>>,
}

impl CollegeStore {
    /// Open (or create) a database file and make sure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "opened college store");
        Self::from_connection(conn)
    }

    /// Private in-memory database, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wrap an existing connection, running schema setup on it
    pub fn from_connection(conn: Connection) -> Result<Self> {
        let store = CollegeStore {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init()?;
        Ok(store)
    }

    /// Ensure the schema exists. Repeated calls are no-ops.
    pub fn init(&self) -> Result<()> {
        let conn = self.lock()?;
        setup_database(&conn)
    }

    /// Exclusive access to the connection for one operation
    pub fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::LockPoisoned)
    }
}
