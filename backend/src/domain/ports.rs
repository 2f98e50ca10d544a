//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::id::{PostId, TodoId, UserId};
use super::post::Post;
use super::todo::{Todo, TodoStatus, TodoText};
use super::user::User;

/// Number of posts returned alongside a user, most recent first.
pub const RECENT_POSTS_LIMIT: i64 = 5;

/// Number of todos returned by the list query, most recent first.
pub const TODO_LIST_LIMIT: i64 = 10;

/// Persistence errors raised by [`UserRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by [`PostRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostPersistenceError {
    /// Repository connection could not be established.
    #[error("post repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("post repository query failed: {message}")]
    Query { message: String },
    /// The referenced owner does not exist.
    #[error("post owner {user_id} does not exist")]
    UserMissing { user_id: String },
}

impl PostPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for foreign key violations on the owning user.
    pub fn user_missing(user_id: impl Into<String>) -> Self {
        Self::UserMissing {
            user_id: user_id.into(),
        }
    }
}

/// Persistence errors raised by [`TodoRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoPersistenceError {
    /// Repository connection could not be established.
    #[error("todo repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("todo repository query failed: {message}")]
    Query { message: String },
}

impl TodoPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Read model pairing a user with its most recent posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithPosts {
    /// The user aggregate.
    pub user: User,
    /// Up to [`RECENT_POSTS_LIMIT`] posts, most recent first.
    pub posts: Vec<Post>,
}

/// Read model pairing a post with its owning user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    /// The post aggregate.
    pub post: Post,
    /// The user that wrote the post.
    pub author: User,
}

/// Partial update applied to a todo.
///
/// Fields left as `None` keep their current value; an all-`None` change set
/// leaves the row untouched and returns it as stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoChanges {
    /// Replacement completion state, if any.
    pub status: Option<TodoStatus>,
    /// Replacement body text, if any.
    pub text: Option<TodoText>,
}

impl TodoChanges {
    /// Whether the change set carries no updates at all.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.text.is_none()
    }
}

/// Persistence port for user aggregates.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user together with its most recent posts.
    ///
    /// Returns `None` when the user does not exist. The post list is
    /// ordered most recent first and capped at [`RECENT_POSTS_LIMIT`].
    async fn find_with_recent_posts(
        &self,
        id: UserId,
    ) -> Result<Option<UserWithPosts>, UserPersistenceError>;
}

/// Persistence port for post aggregates.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post record.
    ///
    /// Fails with [`PostPersistenceError::UserMissing`] when the owning
    /// user does not exist.
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError>;

    /// Fetch a post together with its owning user.
    ///
    /// Returns `None` when the post does not exist.
    async fn find_with_author(
        &self,
        id: PostId,
    ) -> Result<Option<PostWithAuthor>, PostPersistenceError>;
}

/// Persistence port for todo aggregates.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a new todo record.
    async fn insert(&self, todo: &Todo) -> Result<(), TodoPersistenceError>;

    /// Fetch a single todo, or `None` when it does not exist.
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoPersistenceError>;

    /// Fetch the [`TODO_LIST_LIMIT`] most recently created todos,
    /// newest first.
    async fn list_recent(&self) -> Result<Vec<Todo>, TodoPersistenceError>;

    /// Apply a partial update and return the stored row.
    ///
    /// Returns `None` when the todo does not exist.
    async fn update(
        &self,
        id: TodoId,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, TodoPersistenceError>;
}
