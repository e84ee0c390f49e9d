//! Persistence module split by record kind. Each kind module owns its SQL and
//! row mapping; `store` ties them to the connection pool.

mod authors;
mod blocks;
mod books;
mod connection;
mod copies;
mod loans;
mod pool;
mod readers;
mod record;
mod store;

pub use authors::{create_author, delete_author, fetch_authors, update_author};
pub use blocks::{create_block, delete_block, fetch_blocks, update_block};
pub use books::{create_book, delete_book, fetch_books, update_book};
pub use connection::{connection_manager, ensure_schema};
pub use copies::{create_copy, delete_copy, fetch_copies, update_copy};
pub use loans::{create_loan, delete_loan, fetch_loans, update_loan};
pub use pool::{ConnectionPool, PooledConnection};
pub use readers::{create_reader, delete_reader, fetch_readers, update_reader};
pub use record::Record;
pub use store::LibraryStore;
