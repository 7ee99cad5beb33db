//! # REST API for Users
//!
//! Endpoints for creating, retrieving and listing users.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use shared::{CreateUserRequest, ListRequest, User};
use tracing::info;

use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::{to_list_query, user_mapper::UserMapper};
use crate::AppState;

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(request) = payload?;
    info!("POST /api/v1/users - request: {:?}", request);

    let user = state
        .user_service
        .create_user(UserMapper::to_create_command(request))
        .await?;

    Ok((StatusCode::CREATED, Json(UserMapper::to_dto(user))))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    info!("GET /api/v1/users/{}", user_id);

    let user = state.user_service.get_user(&user_id).await?;
    Ok(Json(UserMapper::to_dto(user)))
}

/// List users, one page at a time
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<ListRequest>, QueryRejection>,
) -> Result<Json<Vec<User>>, ApiError> {
    let Query(request) = query?;
    info!("GET /api/v1/users - query: {:?}", request);

    let users = state.user_service.list_users(to_list_query(request)).await?;
    Ok(Json(users.into_iter().map(UserMapper::to_dto).collect()))
}
