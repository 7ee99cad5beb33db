//! # Storage Module
//!
//! SQLite persistence for users and transactions.
//!
//! - **connection.rs**: pool setup and schema
//! - **keyset.rs**: the `ORDER BY id` / `id > cursor` page query builder
//! - **repositories/**: one repository per table
//!
//! Every create is a single INSERT statement, so its integrity check and its
//! write commit together and the write lock is taken before anything is read.

pub mod connection;
pub mod error;
pub mod keyset;
pub mod repositories;

pub use connection::DbConnection;
pub use error::{StoreError, StoreResult};
pub use repositories::{TransactionRepository, UserRepository};
