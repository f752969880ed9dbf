//! # Roster Service
//!
//! Business rules for users: input validation, email uniqueness and
//! existence checks. Persistence is delegated to a `UserRepository`.

pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
