//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts, one per entity.
//! - Isolate SQLite query details from store/business orchestration.
//!
//! # Invariants
//! - Every query is scoped by `owner_id`; no repository API can read or
//!   mutate another owner's rows.
//! - Writes enforce model validation before touching SQL.
//! - Errors map onto a closed taxonomy so callers can decide
//!   surface-to-user vs. retry per kind.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod bookmark_repo;
pub mod category_repo;
pub mod memo_repo;
pub(crate) mod plan_rows;
pub mod profile_repo;
pub mod schedule_repo;
pub mod todo_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Closed error taxonomy for all persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Input rejected before any write was attempted.
    Validation(String),
    /// The addressed row does not exist for this owner.
    NotFound { entity: &'static str, id: Uuid },
    /// A uniqueness rule was violated (e.g. duplicate bookmark term).
    Conflict(String),
    /// Storage transport failure. The only kind callers may retry.
    Db(DbError),
    /// Persisted state failed to parse back into the domain model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "validation failed: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<crate::model::schedule::ScheduleValidationError> for RepoError {
    fn from(value: crate::model::schedule::ScheduleValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
