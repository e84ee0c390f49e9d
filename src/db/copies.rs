use rusqlite::{named_params, Connection, Row};

use crate::db::record::Record;
use crate::error::StoreResult;
use crate::models::{BookCopy, Key, RecordKind};

/// Retrieve every physical copy in storage order.
pub fn fetch_copies(conn: &Connection) -> StoreResult<Vec<BookCopy>> {
    let mut stmt = conn.prepare("SELECT copy_id, book_id, is_available FROM bookcopies")?;

    let copies = stmt
        .query_map([], copy_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(copies)
}

/// Insert a copy of an existing book and return the generated `copy_id`.
pub fn create_copy(conn: &Connection, copy: &BookCopy) -> StoreResult<Key> {
    let id = conn.query_row(
        "INSERT INTO bookcopies (book_id, is_available)
         VALUES (:book_id, :is_available)
         RETURNING copy_id",
        named_params! {
            ":book_id": copy.book_id,
            ":is_available": copy.is_available,
        },
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Overwrite the copy's book and availability. Availability is taken as given;
/// open loans on the copy are not consulted.
pub fn update_copy(conn: &Connection, copy: &BookCopy) -> StoreResult<()> {
    conn.execute(
        "UPDATE bookcopies
         SET book_id = :book_id, is_available = :is_available
         WHERE copy_id = :copy_id",
        named_params! {
            ":book_id": copy.book_id,
            ":is_available": copy.is_available,
            ":copy_id": copy.copy_id,
        },
    )?;
    Ok(())
}

/// Remove a copy. Fails while a loan still references it.
pub fn delete_copy(conn: &Connection, id: Key) -> StoreResult<()> {
    conn.execute("DELETE FROM bookcopies WHERE copy_id = ?1", [id])?;
    Ok(())
}

fn copy_from_row(row: &Row<'_>) -> rusqlite::Result<BookCopy> {
    Ok(BookCopy {
        copy_id: row.get("copy_id")?,
        book_id: row.get("book_id")?,
        is_available: row.get("is_available")?,
    })
}

impl Record for BookCopy {
    const KIND: RecordKind = RecordKind::BookCopy;

    fn key(&self) -> Key {
        self.copy_id
    }

    fn list_all(conn: &Connection) -> StoreResult<Vec<Self>> {
        fetch_copies(conn)
    }

    fn create(conn: &Connection, record: &Self) -> StoreResult<Key> {
        create_copy(conn, record)
    }

    fn update(conn: &Connection, record: &Self) -> StoreResult<()> {
        update_copy(conn, record)
    }

    fn delete(conn: &Connection, key: Key) -> StoreResult<()> {
        delete_copy(conn, key)
    }
}
