//! User service implementation.

use crate::dto::{CreateUserRequest, UpdateUserRequest};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{RosterError, RosterResult, User, UserChanges, UserId, ValidateExt};
use roster_repository::UserRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User service backed by an injected repository.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceImpl {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    async fn require(&self, id: UserId) -> RosterResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                warn!("User not found: {}", id);
                RosterError::not_found("User", id)
            })
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create(&self, request: CreateUserRequest) -> RosterResult<User> {
        debug!("Creating user: {}", request.email);

        request.validate_request()?;

        if self
            .user_repository
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            warn!("Rejected duplicate email: {}", request.email);
            return Err(RosterError::duplicate_email(request.email));
        }

        let saved_user = self.user_repository.insert(&request.into()).await?;

        info!("User created: {}", saved_user.id);
        Ok(saved_user)
    }

    async fn find_all(&self) -> RosterResult<Vec<User>> {
        debug!("Listing users");

        self.user_repository.find_all().await
    }

    async fn find_one(&self, id: UserId) -> RosterResult<User> {
        debug!("Getting user: {}", id);

        self.require(id).await
    }

    async fn update(&self, id: UserId, request: UpdateUserRequest) -> RosterResult<User> {
        debug!("Updating user: {}", id);

        request.validate_request()?;
        self.require(id).await?;

        let changes = UserChanges::from(request);
        let updated_user = self
            .user_repository
            .merge(id, &changes)
            .await?
            .ok_or_else(|| RosterError::not_found("User", id))?;

        info!("User updated: {}", id);
        Ok(updated_user)
    }

    async fn remove(&self, id: UserId) -> RosterResult<User> {
        debug!("Deleting user: {}", id);

        let user = self.require(id).await?;
        self.user_repository.delete(id).await?;

        info!("User deleted: {}", id);
        Ok(user)
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::NewUser;
    use roster_repository::InMemoryUserRepository;

    mockall::mock! {
        pub Repo {}

        #[async_trait]
        impl UserRepository for Repo {
            async fn find_all(&self) -> RosterResult<Vec<User>>;
            async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;
            async fn find_by_email(&self, email: &str) -> RosterResult<Option<User>>;
            async fn insert(&self, user: &NewUser) -> RosterResult<User>;
            async fn merge(&self, id: UserId, changes: &UserChanges) -> RosterResult<Option<User>>;
            async fn delete(&self, id: UserId) -> RosterResult<bool>;
        }
    }

    fn service() -> UserServiceImpl {
        UserServiceImpl::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn ada() -> CreateUserRequest {
        CreateUserRequest::new("Ada", "Lovelace", "ada@x.com")
    }

    fn stored_ada() -> User {
        NewUser::from(ada()).into_user(UserId(1))
    }

    #[tokio::test]
    async fn test_create_user() {
        let service = service();

        let user = service.create(ada()).await.unwrap();

        assert_eq!(user.id, UserId(1));
        assert_eq!(user.first_name, "Ada");
        assert_eq!(service.find_one(user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let service = service();
        service.create(ada()).await.unwrap();

        let result = service
            .create(CreateUserRequest::new("Other", "Person", "ada@x.com"))
            .await;

        assert!(matches!(result, Err(RosterError::DuplicateEmail { .. })));
        assert_eq!(service.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_email_match_is_exact() {
        let service = service();
        service.create(ada()).await.unwrap();

        let result = service
            .create(CreateUserRequest::new("Ada", "Lovelace", "ADA@x.com"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let service = service();

        let result = service
            .create(CreateUserRequest::new("", "Lovelace", "ada@x.com"))
            .await;

        assert!(matches!(result, Err(RosterError::Validation(_))));
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_returns_every_user() {
        let service = service();
        for i in 0..3 {
            service
                .create(CreateUserRequest::new("U", "V", format!("u{i}@x.com")))
                .await
                .unwrap();
        }

        let users = service.find_all().await.unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[2].email, "u2@x.com");
    }

    #[tokio::test]
    async fn test_find_one_not_found() {
        let result = service().find_one(UserId(42)).await;
        assert!(matches!(result, Err(RosterError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_only_supplied_fields() {
        let service = service();
        let user = service.create(ada()).await.unwrap();

        let request = UpdateUserRequest {
            last_name: Some("King".to_string()),
            ..Default::default()
        };
        let updated = service.update(user.id, request).await.unwrap();

        assert_eq!(updated.first_name, "Ada");
        assert_eq!(updated.last_name, "King");
        assert_eq!(updated.email, "ada@x.com");
    }

    #[tokio::test]
    async fn test_update_does_not_recheck_email() {
        let service = service();
        service.create(ada()).await.unwrap();
        let grace = service
            .create(CreateUserRequest::new("Grace", "Hopper", "grace@x.com"))
            .await
            .unwrap();

        let request = UpdateUserRequest {
            email: Some("ada@x.com".to_string()),
            ..Default::default()
        };

        assert!(service.update(grace.id, request).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let result = service()
            .update(UserId(5), UpdateUserRequest::default())
            .await;
        assert!(matches!(result, Err(RosterError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_then_find_fails() {
        let service = service();
        let user = service.create(ada()).await.unwrap();

        let removed = service.remove(user.id).await.unwrap();
        assert_eq!(removed, user);

        let result = service.find_one(user.id).await;
        assert!(matches!(result, Err(RosterError::NotFound { .. })));
        assert!(matches!(
            service.remove(user.id).await,
            Err(RosterError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_never_inserts() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_ada())));
        repo.expect_insert().never();

        let service = UserServiceImpl::new(Arc::new(repo));
        let result = service.create(ada()).await;

        assert_eq!(result.unwrap_err().error_code(), "DUPLICATE_EMAIL");
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut repo = MockRepo::new();
        repo.expect_find_all()
            .returning(|| Err(RosterError::Database("connection reset".to_string())));

        let service = UserServiceImpl::new(Arc::new(repo));
        let err = service.find_all().await.unwrap_err();

        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_remove_skips_delete_when_missing() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let service = UserServiceImpl::new(Arc::new(repo));
        assert!(service.remove(UserId(3)).await.is_err());
    }
}
