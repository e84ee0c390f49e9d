use log::{debug, info, warn};

use crate::config::DatabaseSettings;
use crate::db::connection::ensure_schema;
use crate::db::pool::ConnectionPool;
use crate::db::record::Record;
use crate::error::{StoreError, StoreResult};
use crate::models::{Key, RecordKind};

/// Entry point for callers. Every method checks out one pooled connection,
/// runs one statement, and releases the connection before returning. Nothing
/// is cached: `list_all` always re-reads the table.
pub struct LibraryStore {
    pool: ConnectionPool,
}

impl LibraryStore {
    /// Build the pool and make sure the schema exists.
    pub fn open(settings: DatabaseSettings) -> StoreResult<Self> {
        let store = Self {
            pool: ConnectionPool::new(settings)?,
        };
        {
            let conn = store.pool.get()?;
            ensure_schema(&conn)?;
        }
        info!(
            "library store open at {}",
            store.pool.settings().path.display()
        );
        Ok(store)
    }

    /// The underlying pool, mainly for inspecting idle connections.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Every row of `R`'s table, re-read on each call.
    pub fn list_all<R: Record>(&self) -> StoreResult<Vec<R>> {
        let conn = self.pool.get()?;
        let records = R::list_all(&conn).map_err(|err| log_failure(R::KIND, "list", err))?;
        debug!("listed {} {} rows", records.len(), R::KIND);
        Ok(records)
    }

    /// Insert `record`, ignoring its key field, and return the assigned key.
    pub fn create<R: Record>(&self, record: &R) -> StoreResult<Key> {
        let conn = self.pool.get()?;
        let key = R::create(&conn, record).map_err(|err| log_failure(R::KIND, "create", err))?;
        debug!("created {} {key}", R::KIND);
        Ok(key)
    }

    /// Overwrite the row keyed by `record.key()`. A missing key is a no-op.
    pub fn update<R: Record>(&self, record: &R) -> StoreResult<()> {
        let conn = self.pool.get()?;
        R::update(&conn, record).map_err(|err| log_failure(R::KIND, "update", err))?;
        debug!("updated {} {}", R::KIND, record.key());
        Ok(())
    }

    /// Remove the row with `key`. A missing key is a no-op; a row that is
    /// still referenced fails with a foreign-key constraint error.
    pub fn delete<R: Record>(&self, key: Key) -> StoreResult<()> {
        let conn = self.pool.get()?;
        R::delete(&conn, key).map_err(|err| log_failure(R::KIND, "delete", err))?;
        debug!("deleted {} {key}", R::KIND);
        Ok(())
    }

    /// Row count per kind, for status output.
    pub fn counts(&self) -> StoreResult<Vec<(RecordKind, i64)>> {
        let conn = self.pool.get()?;
        let counts = RecordKind::ALL
            .iter()
            .map(|&kind| -> StoreResult<(RecordKind, i64)> {
                let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
                let count = conn.query_row(&sql, [], |row| row.get(0))?;
                Ok((kind, count))
            })
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(counts)
    }
}

fn log_failure(kind: RecordKind, op: &str, err: StoreError) -> StoreError {
    warn!("{op} {kind} failed: {err}");
    err
}
