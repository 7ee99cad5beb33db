use std::fmt;

use thiserror::Error;

use crate::domain::ids::EntityKind;
use crate::storage::StoreError;

/// Where a rejected value came from in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    Body,
    Query,
}

impl FieldSource {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldSource::Body => "body",
            FieldSource::Query => "query",
        }
    }
}

/// One invalid input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub source: FieldSource,
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(source: FieldSource, field: &str, message: impl Into<String>) -> Self {
        Self {
            source,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.source.as_str(), self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid input: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("{0} not found")]
    NotFound(EntityKind),

    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),

    #[error("storage failure: {0}")]
    Storage(#[source] StoreError),
}

impl DomainError {
    /// Shorthand for a validation failure on a single field
    pub fn invalid(source: FieldSource, field: &str, message: impl Into<String>) -> Self {
        DomainError::Validation(vec![FieldError::new(source, field, message)])
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => DomainError::DuplicateEmail(email),
            StoreError::MissingUser(_) => DomainError::NotFound(EntityKind::User),
            other => DomainError::Storage(other),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_collapse_to_domain_outcomes() {
        let dup: DomainError = StoreError::DuplicateEmail("a@b.co".to_string()).into();
        assert!(matches!(dup, DomainError::DuplicateEmail(ref e) if e == "a@b.co"));

        let missing: DomainError = StoreError::MissingUser("user_x".to_string()).into();
        assert!(matches!(missing, DomainError::NotFound(EntityKind::User)));

        let db: DomainError = StoreError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(db, DomainError::Storage(_)));
    }

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = DomainError::Validation(vec![
            FieldError::new(FieldSource::Body, "name", "must not be empty"),
            FieldError::new(FieldSource::Body, "email", "is not a valid email address"),
        ]);

        assert_eq!(
            err.to_string(),
            "invalid input: body.name: must not be empty; body.email: is not a valid email address"
        );
    }

    #[test]
    fn test_not_found_message_names_entity() {
        assert_eq!(DomainError::NotFound(EntityKind::Transaction).to_string(), "Transaction not found");
    }
}
