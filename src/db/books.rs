use rusqlite::{named_params, Connection, Row};

use crate::db::record::Record;
use crate::error::StoreResult;
use crate::models::{Book, Key, RecordKind};

/// Retrieve every book in storage order.
pub fn fetch_books(conn: &Connection) -> StoreResult<Vec<Book>> {
    let mut stmt = conn.prepare(
        "SELECT book_id, title, year, language, pages, author_id
         FROM books",
    )?;

    let books = stmt
        .query_map([], book_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(books)
}

/// Insert a book. An `author_id` with no matching author is rejected by the
/// foreign key, not checked here.
pub fn create_book(conn: &Connection, book: &Book) -> StoreResult<Key> {
    let id = conn.query_row(
        "INSERT INTO books (title, year, language, pages, author_id)
         VALUES (:title, :year, :language, :pages, :author_id)
         RETURNING book_id",
        named_params! {
            ":title": book.title,
            ":year": book.year,
            ":language": book.language,
            ":pages": book.pages,
            ":author_id": book.author_id,
        },
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Overwrite every column of the book with `book.book_id`. Cleared optional
/// fields are written as NULL.
pub fn update_book(conn: &Connection, book: &Book) -> StoreResult<()> {
    conn.execute(
        "UPDATE books
         SET title = :title, year = :year, language = :language, pages = :pages,
             author_id = :author_id
         WHERE book_id = :book_id",
        named_params! {
            ":title": book.title,
            ":year": book.year,
            ":language": book.language,
            ":pages": book.pages,
            ":author_id": book.author_id,
            ":book_id": book.book_id,
        },
    )?;
    Ok(())
}

/// Remove a book. Copies are not deleted along with it, so this fails while
/// any copy still references the book.
pub fn delete_book(conn: &Connection, id: Key) -> StoreResult<()> {
    conn.execute("DELETE FROM books WHERE book_id = ?1", [id])?;
    Ok(())
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        book_id: row.get("book_id")?,
        title: row.get("title")?,
        year: row.get("year")?,
        language: row.get("language")?,
        pages: row.get("pages")?,
        author_id: row.get("author_id")?,
    })
}

impl Record for Book {
    const KIND: RecordKind = RecordKind::Book;

    fn key(&self) -> Key {
        self.book_id
    }

    fn list_all(conn: &Connection) -> StoreResult<Vec<Self>> {
        fetch_books(conn)
    }

    fn create(conn: &Connection, record: &Self) -> StoreResult<Key> {
        create_book(conn, record)
    }

    fn update(conn: &Connection, record: &Self) -> StoreResult<()> {
        update_book(conn, record)
    }

    fn delete(conn: &Connection, key: Key) -> StoreResult<()> {
        delete_book(conn, key)
    }
}
