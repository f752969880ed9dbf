//! OpenAPI documentation.

use crate::controllers::{HealthResponse, ReadinessResponse};
use roster_core::{FieldError, User, UserId};
use roster_service::{CreateUserRequest, UpdateUserRequest};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// `{message}` returned by create.
#[derive(Serialize, ToSchema)]
pub struct MessageEnvelope {
    #[schema(example = "User created successfully")]
    pub message: String,
}

/// `{success, message}` returned by delete.
#[derive(Serialize, ToSchema)]
pub struct SuccessEnvelope {
    pub success: bool,
    #[schema(example = "user deleted successfully")]
    pub message: String,
}

/// `{success, user: User[], message}` returned by list.
#[derive(Serialize, ToSchema)]
pub struct UserListEnvelope {
    pub success: bool,
    pub user: Vec<User>,
    pub message: String,
}

/// `{success, user, message}` returned by get.
#[derive(Serialize, ToSchema)]
pub struct UserEnvelope {
    pub success: bool,
    pub user: User,
    pub message: String,
}

/// `{success, data, message}` returned by update.
#[derive(Serialize, ToSchema)]
pub struct UpdatedUserEnvelope {
    pub success: bool,
    pub data: User,
    pub message: String,
}

/// `{success: false, code, message, errors?}` returned on failure.
#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub success: bool,
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    #[schema(example = "User not found")]
    pub message: String,
    pub errors: Option<Vec<FieldError>>,
}

/// OpenAPI documentation for the Roster API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        version = "1.0.0",
        description = "CRUD API for users",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
    ),
    components(
        schemas(
            UserId,
            User,
            FieldError,
            CreateUserRequest,
            UpdateUserRequest,
            HealthResponse,
            ReadinessResponse,
            MessageEnvelope,
            SuccessEnvelope,
            UserListEnvelope,
            UserEnvelope,
            UpdatedUserEnvelope,
            ErrorEnvelope,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_user_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/user"));
        assert!(doc.paths.paths.contains_key("/user/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
