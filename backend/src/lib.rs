//! # Ledger Backend
//!
//! Users and their transactions behind a small REST API with cursor
//! pagination.
//!
//! ```text
//! IO Layer (REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (services, id minting, pagination)
//!     ↓
//! Storage Layer (SQLite pool, repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::domain::{IdMinter, PageLimits, TransactionService, UserService};
use crate::io::rest::{health_apis, transaction_apis, user_apis};
use crate::storage::{DbConnection, TransactionRepository, UserRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub transaction_service: TransactionService,
}

/// Initialize the backend from configuration
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url, config.max_connections()?).await?;

    build_app_state(db, config.page_limits()?).await
}

/// Wire services around an open database. The id minter resumes after the
/// highest stored IDs so new records always sort last.
pub async fn build_app_state(db: DbConnection, limits: PageLimits) -> Result<AppState> {
    let latest_user = UserRepository::new(db.clone()).latest_id().await?;
    let latest_transaction = TransactionRepository::new(db.clone()).latest_id().await?;
    let minter = Arc::new(IdMinter::resume_after(
        latest_user.iter().chain(latest_transaction.iter()).map(String::as_str),
    ));

    info!("Setting up domain services");
    Ok(AppState {
        user_service: UserService::new(db.clone(), minter.clone(), limits),
        transaction_service: TransactionService::new(db, minter, limits),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: Option<HeaderValue>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    let cors = match cors_origin {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    };

    let api_routes = Router::new()
        .route("/health", get(health_apis::health_check))
        .route("/users", get(user_apis::list_users).post(user_apis::create_user))
        .route("/users/:user_id", get(user_apis::get_user))
        .route(
            "/users/:user_id/transactions",
            get(transaction_apis::list_user_transactions).post(transaction_apis::create_transaction),
        )
        .route("/transactions", get(transaction_apis::list_transactions))
        .route("/transactions/:transaction_id", get(transaction_apis::get_transaction));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
