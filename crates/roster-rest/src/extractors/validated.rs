//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes the body and runs the `validator` rules on
//! it. Both malformed bodies and rule violations are answered with 400.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::{summarize, validation_field_errors, ApiResponse};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::{Validate, ValidationErrors};

/// JSON extractor that validates the deserialized value.
///
/// # Example
///
/// ```ignore
/// use roster_rest::extractors::ValidatedJson;
/// use roster_service::CreateUserRequest;
///
/// async fn create(ValidatedJson(request): ValidatedJson<CreateUserRequest>) {
///     // request passed every rule here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// JSON parsing/deserialization error.
    JsonError(JsonRejection),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let body = match self {
            Self::JsonError(rejection) => {
                debug!("Rejected malformed body: {}", rejection.body_text());
                ApiResponse::<()>::failure(
                    "INVALID_JSON",
                    format!("Invalid JSON: {}", rejection.body_text()),
                )
            }
            Self::ValidationError(errors) => {
                let field_errors = validation_field_errors(&errors);
                debug!("Rejected invalid body: {} field error(s)", field_errors.len());
                ApiResponse::<()>::failure("VALIDATION_ERROR", summarize(&field_errors))
                    .with_errors(field_errors)
            }
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}
