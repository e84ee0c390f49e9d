//! Connection pool for the embedded database, backed by `r2d2`. Each store call
//! checks out one connection and hands it back when the guard drops, so a
//! connection is released on every exit path, errors and panics included.
//! A connection is never used by two callers at the same time.

use std::time::Duration;

use log::trace;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::DatabaseSettings;
use crate::db::connection::connection_manager;
use crate::error::StoreResult;

/// Checked-out connection. Derefs to [`rusqlite::Connection`].
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

pub struct ConnectionPool {
    settings: DatabaseSettings,
    pool: Pool<SqliteConnectionManager>,
}

impl ConnectionPool {
    /// Build the pool. Connections are opened lazily on first use, at most
    /// `pool_size` of them at once.
    pub fn new(settings: DatabaseSettings) -> StoreResult<Self> {
        let manager = connection_manager(&settings)?;
        let pool = Pool::builder()
            .max_size(settings.pool_size.max(1))
            .min_idle(Some(0))
            .connection_timeout(Duration::from_millis(settings.connect_timeout_ms.max(1)))
            .build(manager)?;
        Ok(Self { settings, pool })
    }

    pub fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    /// Check out a connection, waiting up to `connect_timeout_ms` for one to
    /// free up when the pool is exhausted.
    pub fn get(&self) -> StoreResult<PooledConnection> {
        trace!("checking out connection to {}", self.settings.path.display());
        Ok(self.pool.get()?)
    }

    /// Number of connections currently parked in the pool.
    pub fn idle_count(&self) -> usize {
        self.pool.state().idle_connections as usize
    }
}
