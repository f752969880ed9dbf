//! Console client state.
//!
//! Holds the last fetched user list, the create draft and the row being
//! edited. Every server failure is turned into a short-lived notice.

use crate::api::UserApi;
use roster_core::{NewUser, User, UserId};
use std::fmt::Write as _;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error};

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

pub const FETCH_FAILED: &str = "Failed to fetch users!";
pub const FETCH_USER_FAILED: &str = "Failed to fetch user!";
pub const CREATE_FAILED: &str = "Failed to create user!";
pub const UPDATE_FAILED: &str = "Failed to update user!";
pub const DELETE_FAILED: &str = "Failed to delete user!";
pub const FIELDS_REQUIRED: &str = "All fields are required!";

/// An editable user field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    FirstName,
    LastName,
    Email,
}

impl FromStr for UserField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" | "first_name" | "first" => Ok(Self::FirstName),
            "lastName" | "last_name" | "last" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            other => Err(format!("unknown field: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message shown above the table.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    posted_at: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            posted_at: Instant::now(),
        }
    }

    /// Whether the notice is past its TTL.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.posted_at.elapsed() >= NOTICE_TTL
    }
}

/// Console client over a [`UserApi`].
pub struct UserConsole<A> {
    api: A,
    users: Vec<User>,
    new_user: NewUser,
    editing_user: Option<User>,
    notice: Option<Notice>,
}

impl<A: UserApi> UserConsole<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            users: Vec::new(),
            new_user: NewUser::default(),
            editing_user: None,
            notice: None,
        }
    }

    /// The last fetched list.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The create draft.
    pub fn new_user(&self) -> &NewUser {
        &self.new_user
    }

    /// The row being edited, if any.
    pub fn editing_user(&self) -> Option<&User> {
        self.editing_user.as_ref()
    }

    /// The current notice, unless it has expired.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| !n.is_expired())
    }

    /// Fetches every user.
    pub async fn load(&mut self) {
        match self.api.list().await {
            Ok(reply) => {
                debug!("Loaded {} users", reply.value.len());
                self.users = reply.value;
            }
            Err(e) => {
                error!("Error fetching users: {}", e);
                self.post(NoticeKind::Error, FETCH_FAILED);
            }
        }
    }

    pub fn set_draft_field(&mut self, field: UserField, value: impl Into<String>) {
        let draft = &mut self.new_user;
        set_field(
            &mut draft.first_name,
            &mut draft.last_name,
            &mut draft.email,
            field,
            value.into(),
        );
    }

    /// Submits the draft. All three fields must be non-empty.
    pub async fn create(&mut self) {
        let draft = &self.new_user;
        if draft.first_name.is_empty() || draft.last_name.is_empty() || draft.email.is_empty() {
            self.post(NoticeKind::Error, FIELDS_REQUIRED);
            return;
        }

        let result = self.api.create(&self.new_user).await;
        match result {
            Ok(reply) => {
                self.new_user = NewUser::default();
                self.post(NoticeKind::Success, reply.message);
                self.load().await;
            }
            Err(e) => {
                error!("Error creating user: {}", e);
                self.post(NoticeKind::Error, CREATE_FAILED);
            }
        }
    }

    /// Starts editing the listed user with `id`. Returns false if it is not listed.
    pub fn begin_edit(&mut self, id: UserId) -> bool {
        self.editing_user = self.users.iter().find(|u| u.id == id).cloned();
        self.editing_user.is_some()
    }

    /// Fetches the current record for `id` from the server and starts editing it.
    /// The listed row is refreshed with the fetched copy.
    pub async fn open_edit(&mut self, id: UserId) {
        let result = self.api.get(id).await;
        match result {
            Ok(reply) => {
                if let Some(row) = self.users.iter_mut().find(|u| u.id == id) {
                    *row = reply.value.clone();
                }
                self.editing_user = Some(reply.value);
            }
            Err(e) => {
                error!("Error fetching user {}: {}", id, e);
                self.post(NoticeKind::Error, FETCH_USER_FAILED);
            }
        }
    }

    pub fn set_edit_field(&mut self, field: UserField, value: impl Into<String>) {
        if let Some(user) = self.editing_user.as_mut() {
            set_field(
                &mut user.first_name,
                &mut user.last_name,
                &mut user.email,
                field,
                value.into(),
            );
        }
    }

    /// Sends the edited record. On failure the edit stays open.
    pub async fn save_edit(&mut self) {
        let Some(user) = self.editing_user.as_ref() else {
            return;
        };

        let result = self.api.update(user).await;
        match result {
            Ok(reply) => {
                self.editing_user = None;
                self.post(NoticeKind::Success, reply.message);
                self.load().await;
            }
            Err(e) => {
                error!("Error updating user: {}", e);
                self.post(NoticeKind::Error, UPDATE_FAILED);
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing_user = None;
    }

    pub async fn delete(&mut self, id: UserId) {
        match self.api.delete(id).await {
            Ok(reply) => {
                self.post(NoticeKind::Success, reply.message);
                self.load().await;
            }
            Err(e) => {
                error!("Error deleting user: {}", e);
                self.post(NoticeKind::Error, DELETE_FAILED);
            }
        }
    }

    /// Draws the notice, the table and the draft as plain text.
    pub fn render(&mut self) -> String {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }

        let mut out = String::new();
        if let Some(notice) = &self.notice {
            let tag = match notice.kind {
                NoticeKind::Success => "ok",
                NoticeKind::Error => "error",
            };
            let _ = writeln!(out, "[{tag}] {}", notice.text);
        }

        let _ = writeln!(out, "{:<6} {:<16} {:<16} {}", "ID", "FIRST NAME", "LAST NAME", "EMAIL");
        for user in &self.users {
            let (row, marker) = match &self.editing_user {
                Some(edit) if edit.id == user.id => (edit, "*"),
                _ => (user, " "),
            };
            let _ = writeln!(
                out,
                "{:<6} {:<16} {:<16} {}{}",
                row.id.to_string(),
                row.first_name,
                row.last_name,
                row.email,
                marker
            );
        }
        if self.users.is_empty() {
            let _ = writeln!(out, "(no users)");
        }

        let draft = &self.new_user;
        let _ = writeln!(
            out,
            "new: firstName={:?} lastName={:?} email={:?}",
            draft.first_name, draft.last_name, draft.email
        );
        out
    }

    fn post(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice::new(kind, text));
    }
}

fn set_field(
    first: &mut String,
    last: &mut String,
    email: &mut String,
    field: UserField,
    value: String,
) {
    match field {
        UserField::FirstName => *first = value,
        UserField::LastName => *last = value,
        UserField::Email => *email = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockUserApi, Reply};
    use roster_core::{RosterError, RosterResult};

    fn ada() -> User {
        User {
            id: UserId(1),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
        }
    }

    fn listing(users: Vec<User>) -> RosterResult<Reply<Vec<User>>> {
        Ok(Reply {
            value: users,
            message: "User read successfully".to_string(),
        })
    }

    #[tokio::test]
    async fn test_load_failure_posts_notice() {
        let mut api = MockUserApi::new();
        api.expect_list().returning(|| {
            Err(RosterError::Transport("connection refused".to_string()))
        });

        let mut console = UserConsole::new(api);
        console.load().await;

        assert_eq!(console.notice().map(|n| n.text.as_str()), Some(FETCH_FAILED));
        assert!(console.users().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_all_fields() {
        let mut api = MockUserApi::new();
        api.expect_create().never();

        let mut console = UserConsole::new(api);
        console.set_draft_field(UserField::FirstName, "Ada");
        console.set_draft_field(UserField::Email, "ada@x.com");
        console.create().await;

        assert_eq!(console.notice().map(|n| n.text.as_str()), Some(FIELDS_REQUIRED));
        assert_eq!(console.new_user().first_name, "Ada");
    }

    #[tokio::test]
    async fn test_create_clears_draft_and_refetches() {
        let mut api = MockUserApi::new();
        api.expect_create().times(1).returning(|_| {
            Ok(Reply {
                value: (),
                message: "User created successfully".to_string(),
            })
        });
        api.expect_list().times(1).returning(|| listing(vec![ada()]));

        let mut console = UserConsole::new(api);
        console.set_draft_field(UserField::FirstName, "Ada");
        console.set_draft_field(UserField::LastName, "Lovelace");
        console.set_draft_field(UserField::Email, "ada@x.com");
        console.create().await;

        assert_eq!(console.new_user(), &NewUser::default());
        assert_eq!(console.users(), &[ada()]);
        assert_eq!(
            console.notice().map(|n| n.kind),
            Some(NoticeKind::Success)
        );
    }

    #[tokio::test]
    async fn test_failed_save_keeps_edit_open() {
        let mut api = MockUserApi::new();
        api.expect_list().times(1).returning(|| listing(vec![ada()]));
        api.expect_update().times(1).returning(|_| {
            Err(RosterError::Remote {
                status: 400,
                message: "User not found".to_string(),
            })
        });

        let mut console = UserConsole::new(api);
        console.load().await;
        assert!(console.begin_edit(UserId(1)));
        console.set_edit_field(UserField::LastName, "King");
        console.save_edit().await;

        assert_eq!(console.notice().map(|n| n.text.as_str()), Some(UPDATE_FAILED));
        assert_eq!(console.editing_user().map(|u| u.last_name.as_str()), Some("King"));
    }

    #[tokio::test]
    async fn test_open_edit_uses_fetched_record() {
        let mut api = MockUserApi::new();
        api.expect_list().times(1).returning(|| listing(vec![ada()]));
        api.expect_get()
            .withf(|id| *id == UserId(1))
            .times(1)
            .returning(|_| {
                Ok(Reply {
                    value: User {
                        last_name: "King".to_string(),
                        ..ada()
                    },
                    message: "User read successfully".to_string(),
                })
            });

        let mut console = UserConsole::new(api);
        console.load().await;
        console.open_edit(UserId(1)).await;

        assert_eq!(console.editing_user().map(|u| u.last_name.as_str()), Some("King"));
        assert_eq!(console.users()[0].last_name, "King");
        assert!(console.notice().is_none());
    }

    #[tokio::test]
    async fn test_open_edit_failure_posts_notice() {
        let mut api = MockUserApi::new();
        api.expect_get().returning(|_| {
            Err(RosterError::Remote {
                status: 400,
                message: "User not found".to_string(),
            })
        });

        let mut console = UserConsole::new(api);
        console.open_edit(UserId(3)).await;

        assert!(console.editing_user().is_none());
        assert_eq!(console.notice().map(|n| n.text.as_str()), Some(FETCH_USER_FAILED));
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_id() {
        let mut console = UserConsole::new(MockUserApi::new());
        assert!(!console.begin_edit(UserId(5)));
        assert!(console.editing_user().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_notice_expires_after_three_seconds() {
        let mut api = MockUserApi::new();
        api.expect_delete().returning(|_| {
            Err(RosterError::Remote {
                status: 400,
                message: "User not found".to_string(),
            })
        });

        let mut console = UserConsole::new(api);
        console.delete(UserId(9)).await;
        assert_eq!(console.notice().map(|n| n.text.as_str()), Some(DELETE_FAILED));

        tokio::time::advance(Duration::from_millis(2_900)).await;
        assert!(console.notice().is_some());

        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(console.notice().is_none());
        assert!(!console.render().contains(DELETE_FAILED));
    }

    #[test]
    fn test_parse_field_names() {
        assert_eq!("firstName".parse::<UserField>(), Ok(UserField::FirstName));
        assert_eq!("last".parse::<UserField>(), Ok(UserField::LastName));
        assert_eq!("email".parse::<UserField>(), Ok(UserField::Email));
        assert!("age".parse::<UserField>().is_err());
    }
}
