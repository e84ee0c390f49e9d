use rusqlite::{named_params, Connection, Row};

use crate::db::record::Record;
use crate::error::StoreResult;
use crate::models::{Key, Reader, RecordKind};

/// Retrieve every reader. Dates come back from their ISO-8601 text columns.
pub fn fetch_readers(conn: &Connection) -> StoreResult<Vec<Reader>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, last_name, first_name, middle_name, birth_date,
                phone, email, address, get_rent, must_return
         FROM readers",
    )?;

    let readers = stmt
        .query_map([], reader_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(readers)
}

/// Insert a reader and return the generated `user_id`. Empty contact fields
/// are stored as empty strings.
pub fn create_reader(conn: &Connection, reader: &Reader) -> StoreResult<Key> {
    let id = conn.query_row(
        "INSERT INTO readers (last_name, first_name, middle_name, birth_date,
                              phone, email, address, get_rent, must_return)
         VALUES (:last_name, :first_name, :middle_name, :birth_date,
                 :phone, :email, :address, :get_rent, :must_return)
         RETURNING user_id",
        named_params! {
            ":last_name": reader.last_name,
            ":first_name": reader.first_name,
            ":middle_name": reader.middle_name,
            ":birth_date": reader.birth_date,
            ":phone": reader.phone,
            ":email": reader.email,
            ":address": reader.address,
            ":get_rent": reader.get_rent,
            ":must_return": reader.must_return,
        },
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Overwrite every column of the reader with `reader.user_id`.
pub fn update_reader(conn: &Connection, reader: &Reader) -> StoreResult<()> {
    conn.execute(
        "UPDATE readers
         SET last_name = :last_name, first_name = :first_name, middle_name = :middle_name,
             birth_date = :birth_date, phone = :phone, email = :email, address = :address,
             get_rent = :get_rent, must_return = :must_return
         WHERE user_id = :user_id",
        named_params! {
            ":last_name": reader.last_name,
            ":first_name": reader.first_name,
            ":middle_name": reader.middle_name,
            ":birth_date": reader.birth_date,
            ":phone": reader.phone,
            ":email": reader.email,
            ":address": reader.address,
            ":get_rent": reader.get_rent,
            ":must_return": reader.must_return,
            ":user_id": reader.user_id,
        },
    )?;
    Ok(())
}

/// Remove a reader. Their loans and blocks are left alone, so the delete fails
/// while any of them remain.
pub fn delete_reader(conn: &Connection, id: Key) -> StoreResult<()> {
    conn.execute("DELETE FROM readers WHERE user_id = ?1", [id])?;
    Ok(())
}

fn reader_from_row(row: &Row<'_>) -> rusqlite::Result<Reader> {
    Ok(Reader {
        user_id: row.get("user_id")?,
        last_name: row.get("last_name")?,
        first_name: row.get("first_name")?,
        middle_name: row.get("middle_name")?,
        birth_date: row.get("birth_date")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
        get_rent: row.get("get_rent")?,
        must_return: row.get("must_return")?,
    })
}

impl Record for Reader {
    const KIND: RecordKind = RecordKind::Reader;

    fn key(&self) -> Key {
        self.user_id
    }

    fn list_all(conn: &Connection) -> StoreResult<Vec<Self>> {
        fetch_readers(conn)
    }

    fn create(conn: &Connection, record: &Self) -> StoreResult<Key> {
        create_reader(conn, record)
    }

    fn update(conn: &Connection, record: &Self) -> StoreResult<()> {
        update_reader(conn, record)
    }

    fn delete(conn: &Connection, key: Key) -> StoreResult<()> {
        delete_reader(conn, key)
    }
}
