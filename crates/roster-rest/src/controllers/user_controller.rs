//! User management controller.

use crate::{
    extractors::{UserIdPath, ValidatedJson},
    responses::{created, done, read, updated, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use roster_core::{ApiResponse, User};
use roster_service::{CreateUserRequest, UpdateUserRequest};
use tracing::debug;

pub const USER_CREATED: &str = "User created successfully";
pub const USER_READ: &str = "User read successfully";
pub const USER_UPDATED: &str = "User updated successfully";
pub const USER_DELETED: &str = "user deleted successfully";

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/user",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = crate::openapi::MessageEnvelope),
        (status = 400, description = "Invalid input or duplicate email", body = crate::openapi::ErrorEnvelope)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    debug!("Create user request: {}", request.email);

    state.user_service.create(request).await?;
    Ok(created(USER_CREATED))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/user",
    tag = "users",
    responses(
        (status = 200, description = "All users in creation order", body = crate::openapi::UserListEnvelope)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    debug!("List users request");

    let users = state.user_service.find_all().await?;
    read(users, USER_READ)
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = crate::openapi::UserEnvelope),
        (status = 400, description = "Invalid id or user not found", body = crate::openapi::ErrorEnvelope)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> ApiResult<User> {
    debug!("Get user request: {}", id);

    let user = state.user_service.find_one(id).await?;
    read(user, USER_READ)
}

/// Update the supplied fields of a user.
#[utoipa::path(
    patch,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "The updated user", body = crate::openapi::UpdatedUserEnvelope),
        (status = 400, description = "Invalid input or user not found", body = crate::openapi::ErrorEnvelope)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<User> {
    debug!("Update user request: {}", id);

    let user = state.user_service.update(id, request).await?;
    updated(user, USER_UPDATED)
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = crate::openapi::SuccessEnvelope),
        (status = 400, description = "Invalid id or user not found", body = crate::openapi::ErrorEnvelope)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> ApiResult<()> {
    debug!("Delete user request: {}", id);

    state.user_service.remove(id).await?;
    done(USER_DELETED)
}
