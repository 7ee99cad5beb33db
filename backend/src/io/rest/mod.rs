//! # REST API Interface Layer
//!
//! HTTP endpoints under `/api/v1`. Handlers decode the request, call one
//! service method and map the result through [`error::ApiError`]:
//!
//! - validation failures and undecodable requests: 422 with field detail
//! - unknown IDs: 404 `{"detail": "<Entity> not found"}`
//! - duplicate email: 409
//! - storage failures: 500, logged, cause not exposed

pub mod error;
pub mod health_apis;
pub mod mappers;
pub mod transaction_apis;
pub mod user_apis;

pub use error::ApiError;
