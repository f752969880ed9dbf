//! `:id` path extractor.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use roster_core::{RosterError, UserId};

/// A `:id` path segment parsed as a [`UserId`].
///
/// Path extractors run before the body is read, so a malformed id is
/// reported even when the body is invalid too.
#[derive(Debug, Clone, Copy)]
pub struct UserIdPath(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError(RosterError::validation(e.body_text())))?;

        UserId::parse(&raw).map(Self).map_err(AppError)
    }
}
