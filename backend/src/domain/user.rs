//! User aggregate.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::UserId;

/// Maximum length of a user name, counted in characters.
pub const USER_NAME_MAX: usize = 10;

/// Validation errors returned by [`UserName::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Name is empty once trimmed of whitespace.
    #[error("user name must not be empty")]
    EmptyName,
    /// Name exceeds the form limit.
    #[error("user name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Validated user name.
///
/// The browser form caps input at ten characters; the domain enforces the
/// same bound so the constraint holds for every transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: USER_NAME_MAX });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user.
///
/// ## Invariants
/// - `id` is a valid ULID, unique across users.
/// - `name` is non-empty and at most [`USER_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, name: UserName) -> Self {
        Self { id, name }
    }

    /// Create a new user with a freshly generated identifier.
    pub fn create(name: UserName) -> Self {
        Self::new(UserId::generate(), name)
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Name shown in the user list.
    pub fn name(&self) -> &UserName {
        &self.name
    }
}
