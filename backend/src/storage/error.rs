use thiserror::Error;

/// Failures surfaced by the repositories.
/// Constraint violations are translated so a lost race reports the same
/// outcome as the explicit check that precedes every insert.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email {0} is already registered")]
    DuplicateEmail(String),

    #[error("user {0} does not exist")]
    MissingUser(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// True if `err` is a UNIQUE violation on the given `table.column`
pub(crate) fn is_unique_violation_on(err: &sqlx::Error, column: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.message().contains(column)
        }
        _ => false,
    }
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_foreign_key_violation(),
        _ => false,
    }
}
