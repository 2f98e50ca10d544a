//! Todo aggregate.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::TodoId;

/// Validation errors returned by [`TodoText::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoValidationError {
    /// Text is empty once trimmed of whitespace.
    #[error("todo text must not be empty")]
    EmptyText,
}

/// Error returned when decoding a persisted status label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown todo status {label:?}")]
pub struct TodoStatusParseError {
    /// The label that failed to decode.
    pub label: String,
}

/// Completion state of a todo.
///
/// Transitions are binary and reversible; there is no audit trail beyond
/// the creation timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    /// The todo is still open.
    Open,
    /// The todo has been closed.
    Close,
}

impl TodoStatus {
    /// Stable label stored in the database and exposed over the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Close => "CLOSE",
        }
    }

    /// Decode a persisted status label.
    pub fn parse(label: &str) -> Result<Self, TodoStatusParseError> {
        match label {
            "OPEN" => Ok(Self::Open),
            "CLOSE" => Ok(Self::Close),
            other => Err(TodoStatusParseError {
                label: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated todo text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoText(String);

impl TodoText {
    /// Validate and construct a [`TodoText`] from owned input.
    pub fn new(text: impl Into<String>) -> Result<Self, TodoValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TodoValidationError::EmptyText);
        }
        Ok(Self(text))
    }
}

impl AsRef<str> for TodoText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TodoText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TodoText> for String {
    fn from(value: TodoText) -> Self {
        value.0
    }
}

impl TryFrom<String> for TodoText {
    type Error = TodoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A standalone todo item.
///
/// ## Invariants
/// - `text` is non-empty.
/// - `created_at` is fixed at creation and never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: TodoId,
    text: TodoText,
    status: TodoStatus,
    created_at: DateTime<Utc>,
}

impl Todo {
    /// Build a [`Todo`] from validated components.
    pub fn new(id: TodoId, text: TodoText, status: TodoStatus, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            status,
            created_at,
        }
    }

    /// Create a new open todo stamped with the current time.
    pub fn create(text: TodoText) -> Self {
        Self::new(TodoId::generate(), text, TodoStatus::Open, Utc::now())
    }

    /// Stable todo identifier.
    pub fn id(&self) -> TodoId {
        self.id
    }

    /// Todo body.
    pub fn text(&self) -> &TodoText {
        &self.text
    }

    /// Current completion state.
    pub fn status(&self) -> TodoStatus {
        self.status
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the completion state.
    pub fn set_status(&mut self, status: TodoStatus) {
        self.status = status;
    }

    /// Replace the body text.
    pub fn set_text(&mut self, text: TodoText) {
        self.text = text;
    }
}
