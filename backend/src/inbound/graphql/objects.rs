//! GraphQL object types exposed by the schema.
//!
//! These are wire-shape DTOs: domain aggregates are reshaped at this
//! boundary (timestamps become RFC 3339 strings, the status enum becomes
//! its GraphQL counterpart) and never leak transport concerns back into
//! the domain.

use async_graphql::{Enum, SimpleObject, ID};
use chrono::SecondsFormat;

use crate::domain::ports::{PostWithAuthor, UserWithPosts};
use crate::domain::{Post, Todo, TodoStatus, User};

/// Completion state of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(name = "TodoStatus")]
pub enum TodoStatusValue {
    /// The todo is still open.
    Open,
    /// The todo has been closed.
    Close,
}

impl From<TodoStatus> for TodoStatusValue {
    fn from(value: TodoStatus) -> Self {
        match value {
            TodoStatus::Open => Self::Open,
            TodoStatus::Close => Self::Close,
        }
    }
}

impl From<TodoStatusValue> for TodoStatus {
    fn from(value: TodoStatusValue) -> Self {
        match value {
            TodoStatusValue::Open => Self::Open,
            TodoStatusValue::Close => Self::Close,
        }
    }
}

/// A registered user and its most recent posts.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "User")]
pub struct UserObject {
    /// Sortable user identifier.
    pub id: ID,
    /// Name shown in the user list.
    pub name: String,
    /// Most recent posts, newest first, capped at five.
    pub posts: Vec<PostObject>,
}

impl UserObject {
    /// Shape a bare user; the post list is empty.
    pub fn from_user(user: User) -> Self {
        Self {
            id: ID::from(user.id().to_string()),
            name: String::from(user.name().clone()),
            posts: Vec::new(),
        }
    }

    /// Shape a user together with its recent posts.
    pub fn from_user_with_posts(read: UserWithPosts) -> Self {
        let UserWithPosts { user, posts } = read;
        let posts = posts.into_iter().map(PostObject::from_post).collect();
        Self {
            posts,
            ..Self::from_user(user)
        }
    }
}

/// A post written by a user.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Post")]
pub struct PostObject {
    /// Sortable post identifier.
    pub id: ID,
    /// Post body.
    pub text: String,
    /// Owning user; populated only by the single-post lookup.
    pub user: Option<UserObject>,
}

impl PostObject {
    /// Shape a bare post without its author.
    pub fn from_post(post: Post) -> Self {
        Self {
            id: ID::from(post.id().to_string()),
            text: String::from(post.text().clone()),
            user: None,
        }
    }

    /// Shape a post together with its owning user.
    pub fn from_post_with_author(read: PostWithAuthor) -> Self {
        let PostWithAuthor { post, author } = read;
        Self {
            user: Some(UserObject::from_user(author)),
            ..Self::from_post(post)
        }
    }
}

/// A standalone todo item.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Todo")]
pub struct TodoObject {
    /// Sortable todo identifier.
    pub id: ID,
    /// Todo body.
    pub text: String,
    /// Current completion state.
    pub status: TodoStatusValue,
    /// Creation time as an RFC 3339 UTC string.
    pub created_at: String,
}

impl From<Todo> for TodoObject {
    fn from(todo: Todo) -> Self {
        Self {
            id: ID::from(todo.id().to_string()),
            text: String::from(todo.text().clone()),
            status: todo.status().into(),
            created_at: todo
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
