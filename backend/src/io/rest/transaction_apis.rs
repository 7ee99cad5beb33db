//! # REST API for Transactions
//!
//! Transactions are created under a user and read globally by ID.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use shared::{CreateTransactionRequest, ListRequest, Transaction};
use tracing::info;

use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::{to_list_query, transaction_mapper::TransactionMapper};
use crate::AppState;

/// Create a transaction for an existing user
pub async fn create_transaction(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let Json(request) = payload?;
    info!("POST /api/v1/users/{}/transactions - request: {:?}", user_id, request);

    let transaction = state
        .transaction_service
        .create_transaction(TransactionMapper::to_create_command(user_id, request))
        .await?;

    Ok((StatusCode::CREATED, Json(TransactionMapper::to_dto(transaction))))
}

/// Get a transaction by ID
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    info!("GET /api/v1/transactions/{}", transaction_id);

    let transaction = state
        .transaction_service
        .get_transaction(&transaction_id)
        .await?;
    Ok(Json(TransactionMapper::to_dto(transaction)))
}

/// List all transactions, one page at a time
pub async fn list_transactions(
    State(state): State<AppState>,
    query: Result<Query<ListRequest>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let Query(request) = query?;
    info!("GET /api/v1/transactions - query: {:?}", request);

    let transactions = state
        .transaction_service
        .list_transactions(to_list_query(request))
        .await?;
    Ok(Json(transactions.into_iter().map(TransactionMapper::to_dto).collect()))
}

/// List one user's transactions, one page at a time
pub async fn list_user_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<ListRequest>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let Query(request) = query?;
    info!("GET /api/v1/users/{}/transactions - query: {:?}", user_id, request);

    let transactions = state
        .transaction_service
        .list_user_transactions(&user_id, to_list_query(request))
        .await?;
    Ok(Json(transactions.into_iter().map(TransactionMapper::to_dto).collect()))
}
