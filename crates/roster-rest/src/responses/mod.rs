//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::{ApiResponse, RosterError};
use serde::Serialize;
use tracing::{debug, error};

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub RosterError);

impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = self.0.error_code(), "Request failed: {}", self.0);
        } else {
            debug!(code = self.0.error_code(), "Request rejected: {}", self.0);
        }

        let body = Json(ApiResponse::<()>::from(&self.0));
        (status, body).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// `200 {success, user, message}`.
pub fn read<T: Serialize>(user: T, message: &str) -> ApiResult<T> {
    Ok(Json(ApiResponse::with_user(user, message)))
}

/// `200 {success, data, message}`.
pub fn updated<T: Serialize>(data: T, message: &str) -> ApiResult<T> {
    Ok(Json(ApiResponse::with_data(data, message)))
}

/// `201 {message}`.
pub fn created(message: &str) -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::CREATED, Json(ApiResponse::message(message)))
}

/// `200 {success, message}`.
pub fn done(message: &str) -> ApiResult<()> {
    Ok(Json(ApiResponse::success(message)))
}
