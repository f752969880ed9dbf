//! The User entity and its write payloads.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Storage-assigned identifier
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all users, compared exactly as stored
    pub email: String,
}

impl User {
    /// Overwrites the fields present in `changes`, leaving the rest untouched.
    pub fn merge(&mut self, changes: &UserChanges) {
        if let Some(first_name) = &changes.first_name {
            self.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &changes.last_name {
            self.last_name.clone_from(last_name);
        }
        if let Some(email) = &changes.email {
            self.email.clone_from(email);
        }
    }

    /// Returns a copy with `changes` applied.
    #[must_use]
    pub fn merged(mut self, changes: &UserChanges) -> Self {
        self.merge(changes);
        self
    }
}

/// Insert payload; the id is assigned by storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewUser {
    /// Builds the stored entity once an id has been assigned.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserChanges {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}
