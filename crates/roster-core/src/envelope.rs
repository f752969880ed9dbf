//! The JSON envelope every `/user` response is wrapped in.

use serde::{Deserialize, Serialize};

use crate::{FieldError, RosterError};

/// Response envelope.
///
/// Successful reads carry the payload under `user`, updates under `data`.
/// Failures set `success: false` plus a machine-readable `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    fn bare(success: Option<bool>, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            user: None,
            data: None,
            code: None,
            errors: None,
        }
    }

    /// `{message}` only.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::bare(None, message)
    }

    /// `{success: true, message}`.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::bare(Some(true), message)
    }

    /// `{success: true, user, message}`.
    #[must_use]
    pub fn with_user(user: T, message: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            ..Self::success(message)
        }
    }

    /// `{success: true, data, message}`.
    #[must_use]
    pub fn with_data(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            ..Self::success(message)
        }
    }

    /// `{success: false, code, message}`.
    #[must_use]
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::bare(Some(false), message)
        }
    }

    /// Attaches field-level errors to a failure.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        if !errors.is_empty() {
            self.errors = Some(errors);
        }
        self
    }
}

impl<T> From<&RosterError> for ApiResponse<T> {
    fn from(err: &RosterError) -> Self {
        Self::failure(err.error_code(), err.public_message())
    }
}
