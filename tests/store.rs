use chrono::NaiveDate;
use library_catalog::{
    Author, Block, Book, BookCopy, ConstraintKind, DatabaseSettings, LibraryStore, Loan, Reader,
    StoreError,
};
use tempfile::TempDir;

fn open_store() -> (TempDir, LibraryStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = LibraryStore::open(DatabaseSettings::at(dir.path().join("library.sqlite"))).unwrap();
    (dir, store)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn orwell() -> Author {
    Author {
        author_id: 0,
        last_name: "Orwell".into(),
        first_name: "George".into(),
        middle_name: None,
    }
}

fn nineteen_eighty_four(author_id: i64) -> Book {
    Book {
        book_id: 0,
        title: "1984".into(),
        year: Some(1949),
        language: None,
        pages: None,
        author_id,
    }
}

fn smith() -> Reader {
    Reader {
        user_id: 0,
        last_name: "Smith".into(),
        first_name: "Winston".into(),
        middle_name: Some("W".into()),
        birth_date: Some(date(1945, 4, 4)),
        phone: "555-0100".into(),
        email: "winston@minitrue.example".into(),
        address: "Victory Mansions".into(),
        get_rent: true,
        must_return: Some(date(1984, 5, 1)),
    }
}

/// Author, book, copy, and reader keyed 1 each.
fn seed(store: &LibraryStore) -> (i64, i64, i64, i64) {
    let author = store.create(&orwell()).unwrap();
    let book = store.create(&nineteen_eighty_four(author)).unwrap();
    let copy = store
        .create(&BookCopy {
            copy_id: 0,
            book_id: book,
            is_available: true,
        })
        .unwrap();
    let reader = store.create(&smith()).unwrap();
    (author, book, copy, reader)
}

#[test]
fn empty_tables_list_nothing() {
    let (_dir, store) = open_store();
    assert!(store.list_all::<Author>().unwrap().is_empty());
    assert!(store.list_all::<Loan>().unwrap().is_empty());
    assert!(store.list_all::<Block>().unwrap().is_empty());
}

#[test]
fn orwell_scenario() {
    let (_dir, store) = open_store();

    let author_id = store.create(&orwell()).unwrap();
    assert_eq!(author_id, 1);

    let book_id = store.create(&nineteen_eighty_four(author_id)).unwrap();
    assert_eq!(book_id, 1);

    let books = store.list_all::<Book>().unwrap();
    assert_eq!(
        books,
        vec![Book {
            book_id: 1,
            ..nineteen_eighty_four(1)
        }]
    );
}

#[test]
fn create_ignores_supplied_key() {
    let (_dir, store) = open_store();
    let key = store
        .create(&Author {
            author_id: 42,
            ..orwell()
        })
        .unwrap();
    assert_eq!(key, 1);

    let authors = store.list_all::<Author>().unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0], Author {
        author_id: 1,
        ..orwell()
    });
}

#[test]
fn update_overwrites_only_the_keyed_row() {
    let (_dir, store) = open_store();
    let first = store.create(&orwell()).unwrap();
    let second = store
        .create(&Author {
            author_id: 0,
            last_name: "Huxley".into(),
            first_name: "Aldous".into(),
            middle_name: Some("Leonard".into()),
        })
        .unwrap();

    let renamed = Author {
        author_id: first,
        last_name: "Blair".into(),
        first_name: "Eric".into(),
        middle_name: Some("Arthur".into()),
    };
    store.update(&renamed).unwrap();

    let authors = store.list_all::<Author>().unwrap();
    assert!(authors.contains(&renamed));
    let huxley = authors.iter().find(|a| a.author_id == second).unwrap();
    assert_eq!(huxley.last_name, "Huxley");
}

#[test]
fn delete_removes_only_the_keyed_row() {
    let (_dir, store) = open_store();
    let first = store.create(&orwell()).unwrap();
    let second = store.create(&orwell()).unwrap();

    store.delete::<Author>(first).unwrap();

    let keys: Vec<_> = store
        .list_all::<Author>()
        .unwrap()
        .into_iter()
        .map(|a| a.author_id)
        .collect();
    assert_eq!(keys, vec![second]);
}

/// Every table holds exactly one row, keyed 1.
fn seed_every_kind(store: &LibraryStore) -> (Loan, Block) {
    let (_, _, copy, reader) = seed(store);
    let mut loan = Loan {
        loan_id: 0,
        user_id: reader,
        copy_id: copy,
        bear_date: date(1984, 4, 4),
        due_date: None,
        return_date: None,
        is_returned: false,
    };
    loan.loan_id = store.create(&loan).unwrap();
    let mut block = Block {
        block_id: 0,
        user_id: reader,
        is_blocked: true,
        block_reason: None,
        paid_amount: 0,
    };
    block.block_id = store.create(&block).unwrap();
    (loan, block)
}

#[test]
fn missing_keys_are_silent_no_ops() {
    let (_dir, store) = open_store();
    let (loan, block) = seed_every_kind(&store);
    let before = store.counts().unwrap();
    let authors = store.list_all::<Author>().unwrap();
    let books = store.list_all::<Book>().unwrap();
    let copies = store.list_all::<BookCopy>().unwrap();
    let readers = store.list_all::<Reader>().unwrap();

    store
        .update(&Author {
            author_id: 99,
            ..orwell()
        })
        .unwrap();
    store
        .update(&Book {
            book_id: 99,
            ..nineteen_eighty_four(1)
        })
        .unwrap();
    store
        .update(&BookCopy {
            copy_id: 99,
            book_id: 1,
            is_available: false,
        })
        .unwrap();
    store
        .update(&Reader {
            user_id: 99,
            ..smith()
        })
        .unwrap();
    store
        .update(&Loan {
            loan_id: 99,
            is_returned: true,
            ..loan.clone()
        })
        .unwrap();
    store
        .update(&Block {
            block_id: 99,
            paid_amount: 500,
            ..block.clone()
        })
        .unwrap();

    store.delete::<Author>(99).unwrap();
    store.delete::<Book>(99).unwrap();
    store.delete::<BookCopy>(99).unwrap();
    store.delete::<Reader>(99).unwrap();
    store.delete::<Loan>(99).unwrap();
    store.delete::<Block>(99).unwrap();

    assert_eq!(store.counts().unwrap(), before);
    assert_eq!(store.list_all::<Author>().unwrap(), authors);
    assert_eq!(store.list_all::<Book>().unwrap(), books);
    assert_eq!(store.list_all::<BookCopy>().unwrap(), copies);
    assert_eq!(store.list_all::<Reader>().unwrap(), readers);
    assert_eq!(store.list_all::<Loan>().unwrap(), vec![loan]);
    assert_eq!(store.list_all::<Block>().unwrap(), vec![block]);
}

#[test]
fn dangling_foreign_key_is_rejected() {
    let (_dir, store) = open_store();

    let err = store.create(&nineteen_eighty_four(7)).unwrap_err();
    assert!(err.is_referential(), "unexpected error: {err}");
    assert!(store.list_all::<Book>().unwrap().is_empty());

    let err = store
        .create(&Block {
            block_id: 0,
            user_id: 7,
            is_blocked: true,
            block_reason: None,
            paid_amount: 0,
        })
        .unwrap_err();
    assert!(err.is_referential());
    assert!(store.list_all::<Block>().unwrap().is_empty());

    let err = store
        .create(&BookCopy {
            copy_id: 0,
            book_id: 7,
            is_available: true,
        })
        .unwrap_err();
    assert!(err.is_referential(), "unexpected error: {err}");
    assert!(store.list_all::<BookCopy>().unwrap().is_empty());
}

#[test]
fn loan_with_dangling_reader_or_copy_is_rejected() {
    let (_dir, store) = open_store();
    let (_, _, copy, reader) = seed(&store);
    let loan = Loan {
        loan_id: 0,
        user_id: reader,
        copy_id: copy,
        bear_date: date(1984, 4, 4),
        due_date: None,
        return_date: None,
        is_returned: false,
    };

    let err = store
        .create(&Loan {
            user_id: 7,
            ..loan.clone()
        })
        .unwrap_err();
    assert!(err.is_referential(), "unexpected error: {err}");

    let err = store
        .create(&Loan {
            copy_id: 7,
            ..loan.clone()
        })
        .unwrap_err();
    assert!(err.is_referential(), "unexpected error: {err}");
    assert!(store.list_all::<Loan>().unwrap().is_empty());

    let loan_id = store.create(&loan).unwrap();
    let err = store
        .update(&Loan {
            loan_id,
            copy_id: 7,
            ..loan.clone()
        })
        .unwrap_err();
    assert!(err.is_referential());
    assert_eq!(
        store.list_all::<Loan>().unwrap(),
        vec![Loan { loan_id, ..loan }]
    );
}

#[test]
fn deleting_a_referenced_book_fails_and_keeps_the_copy() {
    let (_dir, store) = open_store();
    let (_, book, copy, _) = seed(&store);
    assert_eq!(copy, 1);

    let err = store.delete::<Book>(book).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Constraint {
            kind: ConstraintKind::ForeignKey,
            ..
        }
    ));

    let copies = store.list_all::<BookCopy>().unwrap();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].book_id, book);
    assert_eq!(store.list_all::<Book>().unwrap().len(), 1);
}

#[test]
fn store_performs_no_field_validation() {
    let (_dir, store) = open_store();
    let author = store.create(&orwell()).unwrap();

    let book = store
        .create(&Book {
            title: String::new(),
            ..nineteen_eighty_four(author)
        })
        .unwrap();
    assert!(book > 0);
}

#[test]
fn keys_are_not_reused_after_delete() {
    let (_dir, store) = open_store();
    let first = store.create(&orwell()).unwrap();
    store.delete::<Author>(first).unwrap();
    let second = store.create(&orwell()).unwrap();
    assert!(second > first);
}

#[test]
fn loan_does_not_touch_copy_availability() {
    let (_dir, store) = open_store();
    let (_, _, copy, reader) = seed(&store);

    store
        .create(&Loan {
            loan_id: 0,
            user_id: reader,
            copy_id: copy,
            bear_date: date(1984, 4, 4),
            due_date: None,
            return_date: None,
            is_returned: false,
        })
        .unwrap();

    let copies = store.list_all::<BookCopy>().unwrap();
    assert!(copies[0].is_available);
}

#[test]
fn optional_fields_round_trip_through_null() {
    let (_dir, store) = open_store();
    let (author, book, copy, reader) = seed(&store);

    let mut author_row = Author {
        author_id: author,
        middle_name: Some("Eric".into()),
        ..orwell()
    };
    store.update(&author_row).unwrap();
    author_row.middle_name = None;
    store.update(&author_row).unwrap();
    assert_eq!(store.list_all::<Author>().unwrap(), vec![author_row]);

    let mut book_row = Book {
        book_id: book,
        language: Some("en".into()),
        pages: Some(328),
        ..nineteen_eighty_four(author)
    };
    store.update(&book_row).unwrap();
    assert_eq!(store.list_all::<Book>().unwrap(), vec![book_row.clone()]);
    book_row.year = None;
    book_row.language = None;
    book_row.pages = None;
    store.update(&book_row).unwrap();
    assert_eq!(store.list_all::<Book>().unwrap(), vec![book_row]);

    let mut reader_row = Reader {
        user_id: reader,
        ..smith()
    };
    assert_eq!(store.list_all::<Reader>().unwrap(), vec![reader_row.clone()]);
    reader_row.middle_name = None;
    reader_row.birth_date = None;
    reader_row.must_return = None;
    store.update(&reader_row).unwrap();
    assert_eq!(store.list_all::<Reader>().unwrap(), vec![reader_row]);

    let mut loan = Loan {
        loan_id: 0,
        user_id: reader,
        copy_id: copy,
        bear_date: date(1984, 4, 4),
        due_date: Some(date(1984, 4, 18)),
        return_date: Some(date(1984, 4, 17)),
        is_returned: true,
    };
    loan.loan_id = store.create(&loan).unwrap();
    assert_eq!(store.list_all::<Loan>().unwrap(), vec![loan.clone()]);
    loan.due_date = None;
    loan.return_date = None;
    loan.is_returned = false;
    store.update(&loan).unwrap();
    assert_eq!(store.list_all::<Loan>().unwrap(), vec![loan]);

    let mut block = Block {
        block_id: 0,
        user_id: reader,
        is_blocked: true,
        block_reason: Some("Late return".into()),
        paid_amount: 150,
    };
    block.block_id = store.create(&block).unwrap();
    assert_eq!(store.list_all::<Block>().unwrap(), vec![block.clone()]);
    block.block_reason = None;
    block.is_blocked = false;
    store.update(&block).unwrap();
    assert_eq!(store.list_all::<Block>().unwrap(), vec![block]);
}

#[test]
fn deleting_a_reader_with_loans_fails() {
    let (_dir, store) = open_store();
    let (_, _, copy, reader) = seed(&store);
    store
        .create(&Loan {
            loan_id: 0,
            user_id: reader,
            copy_id: copy,
            bear_date: date(1984, 4, 4),
            due_date: None,
            return_date: None,
            is_returned: false,
        })
        .unwrap();

    assert!(store.delete::<Reader>(reader).unwrap_err().is_referential());
    assert_eq!(store.list_all::<Reader>().unwrap().len(), 1);
}

#[test]
fn counts_cover_every_table() {
    let (_dir, store) = open_store();
    seed(&store);

    let counts = store.counts().unwrap();
    let totals: Vec<_> = counts.iter().map(|(_, count)| *count).collect();
    assert_eq!(totals, vec![1, 1, 1, 1, 0, 0]);
}

#[test]
fn connections_go_back_to_the_pool() {
    let (_dir, store) = open_store();
    seed(&store);
    let _ = store.delete::<Book>(1);
    assert_eq!(store.pool().idle_count(), 1);
}
