//! Domain models that mirror the catalog schema one row per struct. They stay
//! plain data holders: the persistence layer maps them to and from rows, and
//! the form layer builds them from user input. Keys are plain integers
//! assigned by the database on insert.

use std::fmt;

use chrono::NaiveDate;

/// Store-assigned integer identifying a row of a given kind.
pub type Key = i64;

/// The six record kinds the catalog knows about. Used for log lines and error
/// context so a failure names the table it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Author,
    Book,
    BookCopy,
    Reader,
    Loan,
    Block,
}

impl RecordKind {
    /// Every kind, in dependency order (parents before children).
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Author,
        RecordKind::Book,
        RecordKind::BookCopy,
        RecordKind::Reader,
        RecordKind::Loan,
        RecordKind::Block,
    ];

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            RecordKind::Author => "authors",
            RecordKind::Book => "books",
            RecordKind::BookCopy => "bookcopies",
            RecordKind::Reader => "readers",
            RecordKind::Loan => "loans",
            RecordKind::Block => "blocks",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Author => "author",
            RecordKind::Book => "book",
            RecordKind::BookCopy => "book copy",
            RecordKind::Reader => "reader",
            RecordKind::Loan => "loan",
            RecordKind::Block => "block",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A book author. Referenced by [`Book::author_id`].
pub struct Author {
    /// Primary key. Ignored on create.
    pub author_id: Key,
    pub last_name: String,
    pub first_name: String,
    /// Patronymic or middle name, stored as NULL when absent.
    pub middle_name: Option<String>,
}

impl Author {
    /// `Last First Middle`, skipping the middle name when absent.
    pub fn full_name(&self) -> String {
        join_name(&self.last_name, &self.first_name, self.middle_name.as_deref())
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A catalog title. Physical copies live in [`BookCopy`].
pub struct Book {
    /// Primary key. Ignored on create.
    pub book_id: Key,
    pub title: String,
    /// Publication year.
    pub year: Option<i32>,
    /// Free-text language name, e.g. `en` or `Russian`.
    pub language: Option<String>,
    /// Page count.
    pub pages: Option<i32>,
    /// The [`Author`] who wrote it. Must exist.
    pub author_id: Key,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} ({year})", self.title),
            None => f.write_str(&self.title),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// One physical copy of a [`Book`] on the shelf.
pub struct BookCopy {
    /// Primary key. Ignored on create.
    pub copy_id: Key,
    /// The [`Book`] this is a copy of. Must exist.
    pub book_id: Key,
    /// Whether the copy can be lent out. Nothing flips this automatically when
    /// a loan is created or returned; callers set it explicitly.
    pub is_available: bool,
}

impl fmt::Display for BookCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Copy #{}", self.copy_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A library patron. The key column is `user_id` because loans and blocks
/// refer to readers under that name.
pub struct Reader {
    /// Primary key. Ignored on create.
    pub user_id: Key,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    /// Contact fields may be empty but are never NULL.
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Whether the reader is allowed to borrow.
    pub get_rent: bool,
    /// Date by which the reader has to bring borrowed books back.
    pub must_return: Option<NaiveDate>,
}

impl Reader {
    /// `Last First Middle`, skipping the middle name when absent.
    pub fn full_name(&self) -> String {
        join_name(&self.last_name, &self.first_name, self.middle_name.as_deref())
    }
}

impl fmt::Display for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A copy handed out to a reader.
pub struct Loan {
    /// Primary key. Ignored on create.
    pub loan_id: Key,
    /// The borrowing [`Reader`]. Must exist.
    pub user_id: Key,
    /// The lent [`BookCopy`]. Must exist.
    pub copy_id: Key,
    /// Day the copy left the library.
    pub bear_date: NaiveDate,
    /// Day the copy is expected back.
    pub due_date: Option<NaiveDate>,
    /// Day the copy actually came back.
    pub return_date: Option<NaiveDate>,
    pub is_returned: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A restriction placed on a reader, together with any fine paid towards it.
pub struct Block {
    /// Primary key. Ignored on create.
    pub block_id: Key,
    /// The blocked [`Reader`]. Must exist.
    pub user_id: Key,
    /// Whether the block is currently in force.
    pub is_blocked: bool,
    pub block_reason: Option<String>,
    /// Whole currency units paid so far.
    pub paid_amount: i32,
}

fn join_name(last: &str, first: &str, middle: Option<&str>) -> String {
    match middle {
        Some(middle) if !middle.trim().is_empty() => format!("{last} {first} {middle}"),
        _ => format!("{last} {first}"),
    }
}
