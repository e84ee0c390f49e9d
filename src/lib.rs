//! Record store for a small library catalog: authors, books, physical copies,
//! readers, loans, and reader blocks, each with list/create/update/delete
//! against an embedded SQLite database.
//!
//! Callers open a [`LibraryStore`] and drive it with the record types from
//! [`models`]; [`forms`] turns raw editor input into those records and applies
//! the required-field checks the store itself leaves out.
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod logging;
pub mod models;

pub use config::{DatabaseSettings, LibraryConfig, LoggingSettings};
pub use db::{LibraryStore, Record};
pub use error::{ConstraintKind, StoreError, StoreResult};
pub use models::{Author, Block, Book, BookCopy, Key, Loan, Reader, RecordKind};
