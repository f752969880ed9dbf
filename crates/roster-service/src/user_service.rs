//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest};
use async_trait::async_trait;
use roster_core::{Interface, RosterResult, User, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Creates a user. Fails with `DuplicateEmail` if the email is taken.
    async fn create(&self, request: CreateUserRequest) -> RosterResult<User>;

    /// Lists every user in storage order.
    async fn find_all(&self) -> RosterResult<Vec<User>>;

    /// Gets a user by ID.
    async fn find_one(&self, id: UserId) -> RosterResult<User>;

    /// Applies the supplied fields to an existing user.
    ///
    /// Email uniqueness is not re-checked here.
    async fn update(&self, id: UserId, request: UpdateUserRequest) -> RosterResult<User>;

    /// Deletes a user, returning its last known state.
    async fn remove(&self, id: UserId) -> RosterResult<User>;
}
