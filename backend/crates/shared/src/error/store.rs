//! Store Error - persistence failure taxonomy
//!
//! Repositories return [`StoreError`] instead of driver errors, so callers
//! branch on the variant and never on vendor error codes.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("record not found")]
    NotFound,

    /// A uniqueness or integrity constraint rejected the write.
    /// Carries the constraint name when the backend reports one.
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The backend could not be reached or is out of resources.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// True when the conflict came from the named constraint.
    pub fn is_conflict_on(&self, constraint: &str) -> bool {
        matches!(self, StoreError::Conflict(name) if name == constraint)
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                match db_err.code().as_deref() {
                    Some("23505") | Some("23503") | Some("23000") => StoreError::Conflict(
                        db_err.constraint().unwrap_or_default().to_string(),
                    ),
                    Some(code) if code.starts_with("53") || code.starts_with("57") => {
                        StoreError::Unavailable(db_err.message().to_string())
                    }
                    _ => StoreError::Internal(db_err.message().to_string()),
                }
            }
            other => StoreError::Internal(other.to_string()),
        }
    }
}
