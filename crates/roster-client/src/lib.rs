//! # Roster Client
//!
//! HTTP client for the Roster `/user` API and the state behind the
//! `roster-console` terminal front end.

pub mod api;
pub mod command;
pub mod console;

pub use api::{Reply, UserApi, UserApiClient, DEFAULT_API_URL};
pub use command::Command;
pub use console::{Notice, NoticeKind, UserConsole, UserField, NOTICE_TTL};
