//! Typed ID wrappers for domain entities.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::RosterError;

/// A strongly-typed wrapper for user IDs.
///
/// Ids are assigned by storage on insert and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Creates a user ID from its numeric value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parses a user ID from a decimal string, as found in a URL path.
    pub fn parse(s: &str) -> Result<Self, RosterError> {
        s.parse()
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // i64::from_str also accepts a leading '+', which is not a decimal id
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RosterError::validation(format!("Invalid user id: {}", s)));
        }
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| RosterError::validation(format!("Invalid user id: {}", s)))
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}
