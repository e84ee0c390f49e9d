use rusqlite::{named_params, Connection, Row};

use crate::db::record::Record;
use crate::error::StoreResult;
use crate::models::{Key, Loan, RecordKind};

/// Retrieve every loan, returned or not.
pub fn fetch_loans(conn: &Connection) -> StoreResult<Vec<Loan>> {
    let mut stmt = conn.prepare(
        "SELECT loan_id, user_id, copy_id, bear_date, due_date, return_date, is_returned
         FROM loans",
    )?;

    let loans = stmt
        .query_map([], loan_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(loans)
}

/// Record a loan. The copy's `is_available` flag is not touched; callers that
/// want the copy marked as lent out update it themselves.
pub fn create_loan(conn: &Connection, loan: &Loan) -> StoreResult<Key> {
    let id = conn.query_row(
        "INSERT INTO loans (user_id, copy_id, bear_date, due_date, return_date, is_returned)
         VALUES (:user_id, :copy_id, :bear_date, :due_date, :return_date, :is_returned)
         RETURNING loan_id",
        named_params! {
            ":user_id": loan.user_id,
            ":copy_id": loan.copy_id,
            ":bear_date": loan.bear_date,
            ":due_date": loan.due_date,
            ":return_date": loan.return_date,
            ":is_returned": loan.is_returned,
        },
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Overwrite the loan's dates, parties, and returned flag. Marking a loan
/// returned does not make the copy available again.
pub fn update_loan(conn: &Connection, loan: &Loan) -> StoreResult<()> {
    conn.execute(
        "UPDATE loans
         SET user_id = :user_id, copy_id = :copy_id, bear_date = :bear_date,
             due_date = :due_date, return_date = :return_date, is_returned = :is_returned
         WHERE loan_id = :loan_id",
        named_params! {
            ":user_id": loan.user_id,
            ":copy_id": loan.copy_id,
            ":bear_date": loan.bear_date,
            ":due_date": loan.due_date,
            ":return_date": loan.return_date,
            ":is_returned": loan.is_returned,
            ":loan_id": loan.loan_id,
        },
    )?;
    Ok(())
}

/// Remove a loan. An unknown `loan_id` changes nothing.
pub fn delete_loan(conn: &Connection, id: Key) -> StoreResult<()> {
    conn.execute("DELETE FROM loans WHERE loan_id = ?1", [id])?;
    Ok(())
}

fn loan_from_row(row: &Row<'_>) -> rusqlite::Result<Loan> {
    Ok(Loan {
        loan_id: row.get("loan_id")?,
        user_id: row.get("user_id")?,
        copy_id: row.get("copy_id")?,
        bear_date: row.get("bear_date")?,
        due_date: row.get("due_date")?,
        return_date: row.get("return_date")?,
        is_returned: row.get("is_returned")?,
    })
}

impl Record for Loan {
    const KIND: RecordKind = RecordKind::Loan;

    fn key(&self) -> Key {
        self.loan_id
    }

    fn list_all(conn: &Connection) -> StoreResult<Vec<Self>> {
        fetch_loans(conn)
    }

    fn create(conn: &Connection, record: &Self) -> StoreResult<Key> {
        create_loan(conn, record)
    }

    fn update(conn: &Connection, record: &Self) -> StoreResult<()> {
        update_loan(conn, record)
    }

    fn delete(conn: &Connection, key: Key) -> StoreResult<()> {
        delete_loan(conn, key)
    }
}
