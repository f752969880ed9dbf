//! User-related DTOs.

use roster_core::{NewUser, UserChanges};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Request to create a new user.
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation rather than as malformed JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "firstName should not be empty"))]
    #[schema(example = "Ada")]
    pub first_name: String,

    #[validate(length(min = 1, message = "lastName should not be empty"))]
    #[schema(example = "Lovelace")]
    pub last_name: String,

    #[validate(
        length(min = 1, message = "email should not be empty"),
        email(message = "email must be an email"),
        custom(function = "require_tld")
    )]
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl CreateUserRequest {
    /// Creates a request from its three fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// Rejects addresses whose domain has no top-level label, such as
/// `ada@localhost`. Empty and `@`-less values are left to the other rules.
fn require_tld(email: &str) -> Result<(), ValidationError> {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return Ok(());
    };

    let has_tld = domain.rsplit_once('.').is_some_and(|(host, tld)| {
        !host.is_empty()
            && (tld.starts_with("xn--")
                || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())))
    });

    if has_tld {
        Ok(())
    } else {
        Err(ValidationError::new("email_tld").with_message("email must be an email".into()))
    }
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
        }
    }
}

/// Request to update a user.
///
/// Only supplied fields are validated and changed. Unknown fields such as
/// `id` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "firstName should not be empty"))]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "lastName should not be empty"))]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, message = "email should not be empty"),
        email(message = "email must be an email"),
        custom(function = "require_tld")
    )]
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
        }
    }
}
