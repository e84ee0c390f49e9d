//! Error types surfaced by the record store. SQLite failures get sorted into a
//! handful of kinds so callers can tell "the database is gone" apart from "the
//! row you pointed at does not exist" without parsing message strings.

use std::fmt;
use std::io;
use std::path::Path;

use rusqlite::ffi;
use rusqlite::ErrorCode;
use thiserror::Error;

/// Which constraint the engine refused to violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// A foreign key named a missing parent, or a delete left children behind.
    ForeignKey,
    NotNull,
    Unique,
    Check,
    Other,
}

impl ConstraintKind {
    fn from_extended_code(code: i32) -> Self {
        match code {
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintKind::ForeignKey,
            ffi::SQLITE_CONSTRAINT_NOTNULL => ConstraintKind::NotNull,
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                ConstraintKind::Unique
            }
            ffi::SQLITE_CONSTRAINT_CHECK => ConstraintKind::Check,
            _ => ConstraintKind::Other,
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::NotNull => "not-null",
            ConstraintKind::Unique => "unique",
            ConstraintKind::Check => "check",
            ConstraintKind::Other => "integrity",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be reached, opened, or locked for use, or the
    /// pool gave up waiting for a free connection.
    #[error("database unavailable: {message}")]
    Connectivity {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The engine rejected a write because of a schema constraint.
    #[error("{kind} constraint violated: {message}")]
    Constraint {
        kind: ConstraintKind,
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Anything else the engine reported.
    #[error(transparent)]
    Engine(rusqlite::Error),
}

impl StoreError {
    /// True for foreign-key failures, the referential errors callers most often
    /// need to single out.
    pub fn is_referential(&self) -> bool {
        matches!(
            self,
            StoreError::Constraint {
                kind: ConstraintKind::ForeignKey,
                ..
            }
        )
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, StoreError::Connectivity { .. })
    }

    /// The directory meant to hold the database file could not be created.
    pub(crate) fn data_dir(path: &Path, err: io::Error) -> Self {
        StoreError::Connectivity {
            message: format!("failed to create data directory {}: {err}", path.display()),
            source: Box::new(err),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::Connectivity {
            message: err.to_string(),
            source: Box::new(err),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        let (code, extended) = match &err {
            rusqlite::Error::SqliteFailure(inner, _) => (inner.code, inner.extended_code),
            _ => return StoreError::Engine(err),
        };
        let message = engine_message(&err);

        match code {
            ErrorCode::ConstraintViolation => StoreError::Constraint {
                kind: ConstraintKind::from_extended_code(extended),
                message,
                source: err,
            },
            ErrorCode::CannotOpen
            | ErrorCode::NotADatabase
            | ErrorCode::PermissionDenied
            | ErrorCode::ReadOnly
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::SystemIoFailure
            | ErrorCode::DatabaseCorrupt => StoreError::Connectivity {
                message,
                source: Box::new(err),
            },
            _ => StoreError::Engine(err),
        }
    }
}

/// Prefer the message SQLite attached to the failure; fall back to the code's
/// generic description.
fn engine_message(err: &rusqlite::Error) -> String {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => message.clone(),
        rusqlite::Error::SqliteFailure(inner, None) => inner.to_string(),
        other => other.to_string(),
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
