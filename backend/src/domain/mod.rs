//! # Domain Module
//!
//! Business rules for users and transactions.
//!
//! - **ids**: prefixed, time-ordered identifier minting
//! - **pagination**: page size bounds and cursor handling
//! - **user_service** / **transaction_service**: create, get and list
//! - **validation**: field checks for create requests
//! - **commands**: inputs the REST layer hands to the services
//!
//! Both entities are create-then-immutable. A transaction references its
//! user by ID only; "a user's transactions" is a query, not a field.

pub mod commands;
pub mod error;
pub mod ids;
pub mod models;
pub mod pagination;
pub mod transaction_service;
pub mod user_service;
pub mod validation;

pub use error::{DomainError, DomainResult, FieldError, FieldSource};
pub use ids::{EntityKind, IdMinter};
pub use pagination::{PageLimits, PageRequest};
pub use transaction_service::TransactionService;
pub use user_service::UserService;
