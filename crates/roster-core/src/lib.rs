//! # Roster Core
//!
//! Core types, traits, and error definitions for Roster.
//! This crate provides the foundational abstractions shared by the
//! repository, service, REST and client layers.

pub mod domain;
pub mod envelope;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;

pub use domain::*;
pub use envelope::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
