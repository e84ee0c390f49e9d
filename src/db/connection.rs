use std::fs;
use std::time::Duration;

use log::info;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::config::DatabaseSettings;
use crate::error::{StoreError, StoreResult};

/// Build the connection manager the pool opens connections through. The data
/// directory is created up front so a bad location fails here with the real
/// I/O error instead of a generic "unable to open database file".
pub fn connection_manager(settings: &DatabaseSettings) -> StoreResult<SqliteConnectionManager> {
    if let Some(parent) = settings.path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| StoreError::data_dir(parent, err))?;
        }
    }

    let busy_timeout = Duration::from_millis(settings.busy_timeout_ms);
    Ok(SqliteConnectionManager::file(&settings.path)
        .with_init(move |conn| configure_connection(conn, busy_timeout)))
}

/// Per-connection setup. SQLite keeps `foreign_keys` per connection, and
/// without it dangling keys would be accepted silently.
fn configure_connection(conn: &mut Connection, busy_timeout: Duration) -> rusqlite::Result<()> {
    conn.busy_timeout(busy_timeout)?;
    conn.execute_batch("PRAGMA foreign_keys = ON")
}

/// Create the six catalog tables if they are missing. Keys use
/// `AUTOINCREMENT` so a deleted id is never handed out again. Foreign keys do
/// not cascade: deleting a parent that still has children fails.
pub fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS authors (
            author_id INTEGER PRIMARY KEY AUTOINCREMENT,
            last_name TEXT NOT NULL,
            first_name TEXT NOT NULL,
            middle_name TEXT
        );

        CREATE TABLE IF NOT EXISTS books (
            book_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            year INTEGER,
            language TEXT,
            pages INTEGER,
            author_id INTEGER NOT NULL REFERENCES authors(author_id)
        );

        CREATE TABLE IF NOT EXISTS bookcopies (
            copy_id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_id INTEGER NOT NULL REFERENCES books(book_id),
            is_available INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS readers (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            last_name TEXT NOT NULL,
            first_name TEXT NOT NULL,
            middle_name TEXT,
            birth_date TEXT,
            phone TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            get_rent INTEGER NOT NULL DEFAULT 0,
            must_return TEXT
        );

        CREATE TABLE IF NOT EXISTS loans (
            loan_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES readers(user_id),
            copy_id INTEGER NOT NULL REFERENCES bookcopies(copy_id),
            bear_date TEXT NOT NULL,
            due_date TEXT,
            return_date TEXT,
            is_returned INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS blocks (
            block_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES readers(user_id),
            is_blocked INTEGER NOT NULL DEFAULT 0,
            block_reason TEXT,
            paid_amount INTEGER NOT NULL DEFAULT 0
        );",
    )?;

    info!("catalog schema ready");
    Ok(())
}
