//! User management endpoints
//!
//! Users are addressed by their current position in the store.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::parse_date;
use crate::domain::{User, UserCreateRequest, UserPatchRequest};

/// Plain confirmation body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    /// Position of the affected user, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl MessageResponse {
    fn new(message: &str, index: Option<usize>) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
            index,
        })
    }
}

/// List users response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub total: usize,
}

/// Query string for the birth date search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Resolve a path segment to a store position
///
/// Negative positions can never be occupied and are reported as not found.
fn parse_index(raw: &str) -> Result<usize, ApiError> {
    let index: i64 = raw.parse().map_err(|_| {
        ApiError::bad_request(format!("Invalid user index '{}'", raw)).with_param("userId")
    })?;

    usize::try_from(index).map_err(|_| ApiError::not_found("User not found."))
}

fn parse_query_date(value: Option<&str>, param: &str) -> Result<chrono::NaiveDate, ApiError> {
    let value = value.ok_or_else(|| {
        ApiError::bad_request(format!("Missing required parameter '{}'", param)).with_param(param)
    })?;

    parse_date(value).map_err(|e| ApiError::bad_request(e.to_string()).with_param(param))
}

/// POST /users/create
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<UserCreateRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    debug!(email = %request.email, "Creating user");

    let (index, _) = state.user_service.create(request).await?;

    Ok((
        StatusCode::CREATED,
        MessageResponse::new("User created successfully.", Some(index)),
    ))
}

/// PATCH /users/update/:user_id
pub async fn update_user_fields(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UserPatchRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(user_id = %user_id, "Updating user fields");

    let index = parse_index(&user_id)?;
    state.user_service.patch(index, request).await?;

    Ok(MessageResponse::new(
        "User fields updated successfully.",
        Some(index),
    ))
}

/// PUT /users/update-all/:user_id
pub async fn update_all_user_fields(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UserCreateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(user_id = %user_id, "Replacing user");

    let index = parse_index(&user_id)?;
    state.user_service.replace_all(index, request).await?;

    Ok(MessageResponse::new(
        "All user fields updated successfully.",
        Some(index),
    ))
}

/// DELETE /users/delete/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(user_id = %user_id, "Deleting user");

    let index = parse_index(&user_id)?;
    state.user_service.delete(index).await?;

    Ok(MessageResponse::new("User deleted successfully.", Some(index)))
}

/// GET /users/search?from=YYYY-MM-DD&to=YYYY-MM-DD
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<User>>, ApiError> {
    let from = parse_query_date(params.from.as_deref(), "from")?;
    let to = parse_query_date(params.to.as_deref(), "to")?;

    debug!(%from, %to, "Searching users by birth date");

    let users = state.user_service.search(from, to).await?;

    Ok(Json(users))
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<ListUsersResponse>, ApiError> {
    let users = state.user_service.list().await?;
    let total = users.len();

    Ok(Json(ListUsersResponse { users, total }))
}

/// GET /users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let index = parse_index(&user_id)?;

    let user = state
        .user_service
        .get(index)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found."))?;

    Ok(Json(user))
}
