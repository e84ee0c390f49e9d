use rusqlite::{named_params, Connection, Row};

use crate::db::record::Record;
use crate::error::StoreResult;
use crate::models::{Author, Key, RecordKind};

/// Retrieve every author in storage order.
pub fn fetch_authors(conn: &Connection) -> StoreResult<Vec<Author>> {
    let mut stmt = conn.prepare(
        "SELECT author_id, last_name, first_name, middle_name
         FROM authors",
    )?;

    let authors = stmt
        .query_map([], author_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(authors)
}

/// Insert a new author and return the generated `author_id`.
pub fn create_author(conn: &Connection, author: &Author) -> StoreResult<Key> {
    let id = conn.query_row(
        "INSERT INTO authors (last_name, first_name, middle_name)
         VALUES (:last_name, :first_name, :middle_name)
         RETURNING author_id",
        named_params! {
            ":last_name": author.last_name,
            ":first_name": author.first_name,
            ":middle_name": author.middle_name,
        },
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Overwrite the author's names. An unknown `author_id` changes nothing.
pub fn update_author(conn: &Connection, author: &Author) -> StoreResult<()> {
    conn.execute(
        "UPDATE authors
         SET last_name = :last_name, first_name = :first_name, middle_name = :middle_name
         WHERE author_id = :author_id",
        named_params! {
            ":last_name": author.last_name,
            ":first_name": author.first_name,
            ":middle_name": author.middle_name,
            ":author_id": author.author_id,
        },
    )?;
    Ok(())
}

/// Remove an author. Fails while any book still points at it.
pub fn delete_author(conn: &Connection, id: Key) -> StoreResult<()> {
    conn.execute("DELETE FROM authors WHERE author_id = ?1", [id])?;
    Ok(())
}

fn author_from_row(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author {
        author_id: row.get("author_id")?,
        last_name: row.get("last_name")?,
        first_name: row.get("first_name")?,
        middle_name: row.get("middle_name")?,
    })
}

impl Record for Author {
    const KIND: RecordKind = RecordKind::Author;

    fn key(&self) -> Key {
        self.author_id
    }

    fn list_all(conn: &Connection) -> StoreResult<Vec<Self>> {
        fetch_authors(conn)
    }

    fn create(conn: &Connection, record: &Self) -> StoreResult<Key> {
        create_author(conn, record)
    }

    fn update(conn: &Connection, record: &Self) -> StoreResult<()> {
        update_author(conn, record)
    }

    fn delete(conn: &Connection, key: Key) -> StoreResult<()> {
        delete_author(conn, key)
    }
}
