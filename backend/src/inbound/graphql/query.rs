//! Query resolvers.
//!
//! Each resolver performs exactly one repository call and reshapes the
//! result. Lookups by id return `null` for unknown ids; a malformed id
//! cannot name a stored row, so it resolves to `null` as well instead of
//! an error.

use async_graphql::{Context, Object, Result, ID};

use crate::domain::{PostId, TodoId, UserId};

use super::error::{post_repository_error, todo_repository_error, user_repository_error};
use super::objects::{PostObject, TodoObject, UserObject};
use super::state::GqlPorts;

/// Root query object.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Fetch a user and up to five of its most recent posts.
    async fn get_user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<UserObject>> {
        let ports = ctx.data::<GqlPorts>()?;
        let Ok(id) = UserId::parse(id.as_str()) else {
            return Ok(None);
        };
        let found = ports
            .users
            .find_with_recent_posts(id)
            .await
            .map_err(user_repository_error)?;
        Ok(found.map(UserObject::from_user_with_posts))
    }

    /// Fetch a post and its owning user.
    async fn get_post(&self, ctx: &Context<'_>, id: ID) -> Result<Option<PostObject>> {
        let ports = ctx.data::<GqlPorts>()?;
        let Ok(id) = PostId::parse(id.as_str()) else {
            return Ok(None);
        };
        let found = ports
            .posts
            .find_with_author(id)
            .await
            .map_err(post_repository_error)?;
        Ok(found.map(PostObject::from_post_with_author))
    }

    /// Fetch a single todo.
    async fn get_todo(&self, ctx: &Context<'_>, id: ID) -> Result<Option<TodoObject>> {
        let ports = ctx.data::<GqlPorts>()?;
        let Ok(id) = TodoId::parse(id.as_str()) else {
            return Ok(None);
        };
        let found = ports
            .todos
            .find_by_id(id)
            .await
            .map_err(todo_repository_error)?;
        Ok(found.map(TodoObject::from))
    }

    /// Fetch the ten most recently created todos, newest first.
    async fn get_todo_list(&self, ctx: &Context<'_>) -> Result<Vec<TodoObject>> {
        let ports = ctx.data::<GqlPorts>()?;
        let todos = ports
            .todos
            .list_recent()
            .await
            .map_err(todo_repository_error)?;
        Ok(todos.into_iter().map(TodoObject::from).collect())
    }
}
