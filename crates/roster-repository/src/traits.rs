//! Repository trait definitions.

use async_trait::async_trait;
use roster_core::{Interface, NewUser, RosterResult, User, UserChanges, UserId};

/// User repository trait.
///
/// Implementations own the persisted records; callers hold no cache.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Returns every user in ascending id order.
    async fn find_all(&self) -> RosterResult<Vec<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Finds a user by email, compared exactly.
    async fn find_by_email(&self, email: &str) -> RosterResult<Option<User>>;

    /// Inserts a new user and returns it with its assigned id.
    async fn insert(&self, user: &NewUser) -> RosterResult<User>;

    /// Applies `changes` to an existing user.
    ///
    /// Returns `None` when no user has the given id.
    async fn merge(&self, id: UserId, changes: &UserChanges) -> RosterResult<Option<User>>;

    /// Deletes a user by ID. Returns whether a row was removed.
    async fn delete(&self, id: UserId) -> RosterResult<bool>;
}
