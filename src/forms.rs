//! Caller-side form state for each record kind. A form holds raw input the
//! way an editor collects it (free text, a picked parent, a date, a checkbox)
//! and turns it into a record with `parse_inputs`. The required-field checks
//! live here because the store deliberately accepts whatever it is given.

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};

use crate::models::{Author, Block, Book, BookCopy, Key, Loan, Reader};

/// Trim the input and treat an empty result as "no value".
fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn required_text(raw: &str, message: &'static str) -> Result<String> {
    optional_text(raw).ok_or_else(|| anyhow!(message))
}

/// Numbers that may be left blank. Anything that does not parse is dropped
/// rather than rejected.
fn lenient_int(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn required_selection(selected: Option<Key>, message: &'static str) -> Result<Key> {
    selected.ok_or_else(|| anyhow!(message))
}

#[derive(Debug, Default, Clone)]
pub struct AuthorForm {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
}

impl AuthorForm {
    /// Populate the form from an existing author when editing.
    pub fn from_author(author: &Author) -> Self {
        Self {
            last_name: author.last_name.clone(),
            first_name: author.first_name.clone(),
            middle_name: author.middle_name.clone().unwrap_or_default(),
        }
    }

    pub fn parse_inputs(&self, author_id: Key) -> Result<Author> {
        Ok(Author {
            author_id,
            last_name: required_text(&self.last_name, "Last and first name are required.")?,
            first_name: required_text(&self.first_name, "Last and first name are required.")?,
            middle_name: optional_text(&self.middle_name),
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct BookForm {
    pub title: String,
    pub year: String,
    pub language: String,
    pub pages: String,
    pub author_id: Option<Key>,
}

impl BookForm {
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            year: book.year.map(|year| year.to_string()).unwrap_or_default(),
            language: book.language.clone().unwrap_or_default(),
            pages: book.pages.map(|pages| pages.to_string()).unwrap_or_default(),
            author_id: Some(book.author_id),
        }
    }

    pub fn parse_inputs(&self, book_id: Key) -> Result<Book> {
        let title = required_text(&self.title, "Title is required.")?;
        let author_id = required_selection(self.author_id, "Select an author.")?;
        Ok(Book {
            book_id,
            title,
            year: lenient_int(&self.year),
            language: optional_text(&self.language),
            pages: lenient_int(&self.pages),
            author_id,
        })
    }
}

/// The availability checkbox starts unchecked for a new copy.
#[derive(Debug, Default, Clone)]
pub struct BookCopyForm {
    pub book_id: Option<Key>,
    pub is_available: bool,
}

impl BookCopyForm {
    pub fn from_copy(copy: &BookCopy) -> Self {
        Self {
            book_id: Some(copy.book_id),
            is_available: copy.is_available,
        }
    }

    pub fn parse_inputs(&self, copy_id: Key) -> Result<BookCopy> {
        Ok(BookCopy {
            copy_id,
            book_id: required_selection(self.book_id, "Select a book.")?,
            is_available: self.is_available,
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct ReaderForm {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub get_rent: bool,
    pub must_return: Option<NaiveDate>,
}

impl ReaderForm {
    pub fn from_reader(reader: &Reader) -> Self {
        Self {
            last_name: reader.last_name.clone(),
            first_name: reader.first_name.clone(),
            middle_name: reader.middle_name.clone().unwrap_or_default(),
            birth_date: reader.birth_date,
            phone: reader.phone.clone(),
            email: reader.email.clone(),
            address: reader.address.clone(),
            get_rent: reader.get_rent,
            must_return: reader.must_return,
        }
    }

    /// Contact fields are stored trimmed but may be empty.
    pub fn parse_inputs(&self, user_id: Key) -> Result<Reader> {
        Ok(Reader {
            user_id,
            last_name: required_text(&self.last_name, "Last and first name are required.")?,
            first_name: required_text(&self.first_name, "Last and first name are required.")?,
            middle_name: optional_text(&self.middle_name),
            birth_date: self.birth_date,
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            get_rent: self.get_rent,
            must_return: self.must_return,
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct LoanForm {
    pub user_id: Option<Key>,
    pub copy_id: Option<Key>,
    pub bear_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub is_returned: bool,
}

impl LoanForm {
    pub fn from_loan(loan: &Loan) -> Self {
        Self {
            user_id: Some(loan.user_id),
            copy_id: Some(loan.copy_id),
            bear_date: Some(loan.bear_date),
            due_date: loan.due_date,
            return_date: loan.return_date,
            is_returned: loan.is_returned,
        }
    }

    /// Build the loan, defaulting a blank issue date to today.
    pub fn parse_inputs(&self, loan_id: Key) -> Result<Loan> {
        self.parse_inputs_on(loan_id, Local::now().date_naive())
    }

    pub fn parse_inputs_on(&self, loan_id: Key, today: NaiveDate) -> Result<Loan> {
        let (user_id, copy_id) = match (self.user_id, self.copy_id) {
            (Some(user_id), Some(copy_id)) => (user_id, copy_id),
            _ => return Err(anyhow!("Select a reader and a copy.")),
        };
        Ok(Loan {
            loan_id,
            user_id,
            copy_id,
            bear_date: self.bear_date.unwrap_or(today),
            due_date: self.due_date,
            return_date: self.return_date,
            is_returned: self.is_returned,
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct BlockForm {
    pub user_id: Option<Key>,
    pub is_blocked: bool,
    pub block_reason: String,
    pub paid_amount: String,
}

impl BlockForm {
    pub fn from_block(block: &Block) -> Self {
        Self {
            user_id: Some(block.user_id),
            is_blocked: block.is_blocked,
            block_reason: block.block_reason.clone().unwrap_or_default(),
            paid_amount: block.paid_amount.to_string(),
        }
    }

    /// A blank amount means nothing was paid; anything else must be a number.
    pub fn parse_inputs(&self, block_id: Key) -> Result<Block> {
        let user_id = required_selection(self.user_id, "Select a reader.")?;
        let paid_raw = self.paid_amount.trim();
        let paid_amount = if paid_raw.is_empty() {
            0
        } else {
            paid_raw
                .parse::<i32>()
                .context("Paid amount must be a number.")?
        };
        Ok(Block {
            block_id,
            user_id,
            is_blocked: self.is_blocked,
            block_reason: optional_text(&self.block_reason),
            paid_amount,
        })
    }
}
