use rusqlite::Connection;

use crate::error::StoreResult;
use crate::models::{Key, RecordKind};

/// The four operations every record kind supports. Each kind implements this
/// in its own module with hand-written SQL and an explicit column mapping, so
/// a renamed column or field fails to compile rather than failing at runtime.
pub trait Record: Sized {
    const KIND: RecordKind;

    /// Primary key of this record. Ignored by `create`.
    fn key(&self) -> Key;

    /// Every row of the table, in whatever order the engine returns them.
    fn list_all(conn: &Connection) -> StoreResult<Vec<Self>>;

    /// Insert the record and return the key the database assigned.
    fn create(conn: &Connection, record: &Self) -> StoreResult<Key>;

    /// Overwrite every mutable column of the row with `record.key()`. A key
    /// that matches nothing is not an error.
    fn update(conn: &Connection, record: &Self) -> StoreResult<()>;

    /// Remove the row with `key`. A key that matches nothing is not an error.
    fn delete(conn: &Connection, key: Key) -> StoreResult<()>;
}
