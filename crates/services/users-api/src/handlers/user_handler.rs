//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use common::{AppError, AppResult};
use domain::{check_length, NewUser, User, UserChanges, MAX_EMAIL_LENGTH, MAX_USERNAME_LENGTH};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// User creation request
///
/// Both fields are optional at the JSON level so that a missing field is
/// reported as a 400 with a readable message.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(custom(function = "username_within_limit"))]
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[validate(custom(function = "email_within_limit"))]
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
}

/// User update request; absent or empty fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "username_within_limit"))]
    #[schema(example = "alice2")]
    pub username: Option<String>,
    #[validate(custom(function = "email_within_limit"))]
    #[schema(example = "new@example.com")]
    pub email: Option<String>,
}

fn username_within_limit(username: &str) -> Result<(), ValidationError> {
    check_length("username", username, MAX_USERNAME_LENGTH).map_err(too_long)
}

fn email_within_limit(email: &str) -> Result<(), ValidationError> {
    check_length("email", email, MAX_EMAIL_LENGTH).map_err(too_long)
}

fn too_long(err: domain::DomainError) -> ValidationError {
    let mut error = ValidationError::new("length");
    error.message = Some(err.to_string().into());
    error
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List all users (cached)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.user_list.list_cached().await?;
    Ok(Json(users))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing fields or constraint violation")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let new_user = NewUser::new(
        payload.username.unwrap_or_default(),
        payload.email.unwrap_or_default(),
    )?;

    let user = state.users.create(new_user).await?;
    state.user_list.invalidate().await;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<User>> {
    let user = state.users.get(id).await?;
    Ok(Json(user))
}

/// Update user (partial)
///
/// The id is resolved before the body is looked at, so an unknown id is a
/// 404 whatever the payload.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Constraint violation"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<ValidatedJson<UpdateUserRequest>, AppError>,
) -> AppResult<Json<User>> {
    state.users.get(id).await?;

    let ValidatedJson(payload) = payload?;
    let changes = UserChanges::new(payload.username, payload.email)?;

    let user = state.users.update(id, changes).await?;
    state.user_list.invalidate().await;

    Ok(Json(user))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Delete failed"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.users.delete(id).await?;
    state.user_list.invalidate().await;

    Ok(StatusCode::NO_CONTENT)
}
