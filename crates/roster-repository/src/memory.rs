//! In-memory user repository.
//!
//! Backs the `memory` database backend and the router tests. Ids are assigned
//! from a monotonically increasing counter and never reused.

use crate::traits::UserRepository;
use async_trait::async_trait;
use parking_lot::Mutex;
use roster_core::{NewUser, RosterResult, User, UserChanges, UserId};
use shaku::Component;
use std::collections::BTreeMap;
use tracing::debug;

/// Rows plus the last id handed out.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: BTreeMap<UserId, User>,
    last_id: i64,
}

/// In-memory user repository.
#[derive(Component, Debug, Default)]
#[shaku(interface = UserRepository)]
pub struct InMemoryUserRepository {
    #[shaku(default)]
    store: Mutex<MemoryStore>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.lock().rows.len()
    }

    /// Whether the repository holds no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.lock().rows.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> RosterResult<Vec<User>> {
        Ok(self.store.lock().rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        Ok(self.store.lock().rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RosterResult<Option<User>> {
        Ok(self
            .store
            .lock()
            .rows
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> RosterResult<User> {
        let mut store = self.store.lock();
        store.last_id += 1;
        let user = user.clone().into_user(UserId(store.last_id));
        store.rows.insert(user.id, user.clone());
        debug!("Stored user {} in memory", user.id);
        Ok(user)
    }

    async fn merge(&self, id: UserId, changes: &UserChanges) -> RosterResult<Option<User>> {
        let mut store = self.store.lock();
        Ok(store.rows.get_mut(&id).map(|user| {
            user.merge(changes);
            user.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> RosterResult<bool> {
        Ok(self.store.lock().rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(first: &str, email: &str) -> NewUser {
        NewUser {
            first_name: first.to_string(),
            last_name: "Tester".to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = InMemoryUserRepository::new();

        let a = repo.insert(&new_user("A", "a@x.com")).await.unwrap();
        let b = repo.insert(&new_user("B", "b@x.com")).await.unwrap();

        assert_eq!(a.id, UserId(1));
        assert_eq!(b.id, UserId(2));
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryUserRepository::new();

        let a = repo.insert(&new_user("A", "a@x.com")).await.unwrap();
        assert!(repo.delete(a.id).await.unwrap());
        let b = repo.insert(&new_user("B", "b@x.com")).await.unwrap();

        assert_eq!(b.id, UserId(2));
    }

    #[tokio::test]
    async fn test_find_all_in_id_order() {
        let repo = InMemoryUserRepository::new();
        for i in 0..5 {
            repo.insert(&new_user("U", &format!("u{i}@x.com"))).await.unwrap();
        }

        let ids: Vec<i64> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id.into_inner())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&new_user("Ada", "ada@x.com")).await.unwrap();

        assert!(repo.find_by_email("ada@x.com").await.unwrap().is_some());
        assert!(repo.find_by_email("ADA@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_merge_and_delete_missing() {
        let repo = InMemoryUserRepository::new();
        let changes = UserChanges {
            first_name: Some("Z".to_string()),
            ..Default::default()
        };

        assert!(repo.merge(UserId(9), &changes).await.unwrap().is_none());
        assert!(!repo.delete(UserId(9)).await.unwrap());
    }

    #[tokio::test]
    async fn test_merge_updates_stored_row() {
        let repo = InMemoryUserRepository::new();
        let ada = repo.insert(&new_user("Ada", "ada@x.com")).await.unwrap();
        let changes = UserChanges {
            last_name: Some("King".to_string()),
            ..Default::default()
        };

        let merged = repo.merge(ada.id, &changes).await.unwrap().unwrap();
        assert_eq!(merged.last_name, "King");

        let stored = repo.find_by_id(ada.id).await.unwrap().unwrap();
        assert_eq!(stored, merged);
    }
}
