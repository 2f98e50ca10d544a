//! Post aggregate.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{PostId, UserId};

/// Validation errors returned by [`PostText::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostValidationError {
    /// Text is empty once trimmed of whitespace.
    #[error("post text must not be empty")]
    EmptyText,
}

/// Validated post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostText(String);

impl PostText {
    /// Validate and construct a [`PostText`] from owned input.
    pub fn new(text: impl Into<String>) -> Result<Self, PostValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PostValidationError::EmptyText);
        }
        Ok(Self(text))
    }
}

impl AsRef<str> for PostText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PostText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PostText> for String {
    fn from(value: PostText) -> Self {
        value.0
    }
}

impl TryFrom<String> for PostText {
    type Error = PostValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A post written by a user.
///
/// ## Invariants
/// - `user_id` references an existing [`crate::domain::User`]; the
///   database foreign key is the source of truth.
/// - `text` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    user_id: UserId,
    text: PostText,
}

impl Post {
    /// Build a [`Post`] from validated components.
    pub fn new(id: PostId, user_id: UserId, text: PostText) -> Self {
        Self { id, user_id, text }
    }

    /// Create a new post with a freshly generated identifier.
    pub fn create(user_id: UserId, text: PostText) -> Self {
        Self::new(PostId::generate(), user_id, text)
    }

    /// Stable post identifier.
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Identifier of the owning user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Post body.
    pub fn text(&self) -> &PostText {
        &self.text
    }
}
