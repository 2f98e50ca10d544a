//! Mutation resolvers.
//!
//! Field validation happens at this boundary through the domain
//! constructors; repository failures are mapped onto the GraphQL error
//! envelope. Identifier generation is server-side, so every mutation
//! returns the freshly stored shape.

use async_graphql::{Context, Object, Result, ID};

use crate::domain::ports::TodoChanges;
use crate::domain::{Error, Post, PostText, Todo, TodoId, TodoText, User, UserId, UserName};

use super::error::{
    graphql_error, post_repository_error, todo_repository_error, user_repository_error,
};
use super::objects::{PostObject, TodoObject, TodoStatusValue, UserObject};
use super::state::GqlPorts;

fn invalid_request(err: impl std::fmt::Display) -> async_graphql::Error {
    graphql_error(Error::invalid_request(err.to_string()))
}

fn unknown_todo(id: &ID) -> async_graphql::Error {
    graphql_error(Error::not_found(format!("todo {} does not exist", id.as_str())))
}

/// Root mutation object.
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Register a new user.
    async fn add_user(&self, ctx: &Context<'_>, name: String) -> Result<UserObject> {
        let ports = ctx.data::<GqlPorts>()?;
        let name = UserName::new(name).map_err(invalid_request)?;
        let user = User::create(name);
        ports
            .users
            .insert(&user)
            .await
            .map_err(user_repository_error)?;
        Ok(UserObject::from_user(user))
    }

    /// Write a post for an existing user.
    async fn add_post(&self, ctx: &Context<'_>, user_id: ID, text: String) -> Result<PostObject> {
        let ports = ctx.data::<GqlPorts>()?;
        let user_id = UserId::parse(user_id.as_str()).map_err(|_| {
            graphql_error(Error::not_found(format!(
                "user {} does not exist",
                user_id.as_str()
            )))
        })?;
        let text = PostText::new(text).map_err(invalid_request)?;
        let post = Post::create(user_id, text);
        ports
            .posts
            .insert(&post)
            .await
            .map_err(post_repository_error)?;
        Ok(PostObject::from_post(post))
    }

    /// Create a new todo in the default open state.
    async fn add_todo(&self, ctx: &Context<'_>, text: String) -> Result<TodoObject> {
        let ports = ctx.data::<GqlPorts>()?;
        let text = TodoText::new(text).map_err(invalid_request)?;
        let todo = Todo::create(text);
        ports
            .todos
            .insert(&todo)
            .await
            .map_err(todo_repository_error)?;
        Ok(TodoObject::from(todo))
    }

    /// Apply a partial update to a todo.
    ///
    /// Omitted fields keep their stored value; an update naming no fields
    /// returns the row as stored.
    async fn update_todo(
        &self,
        ctx: &Context<'_>,
        id: ID,
        status: Option<TodoStatusValue>,
        text: Option<String>,
    ) -> Result<TodoObject> {
        let ports = ctx.data::<GqlPorts>()?;
        let todo_id = TodoId::parse(id.as_str()).map_err(|_| unknown_todo(&id))?;
        let text = text
            .map(TodoText::new)
            .transpose()
            .map_err(invalid_request)?;
        let changes = TodoChanges {
            status: status.map(Into::into),
            text,
        };
        let updated = ports
            .todos
            .update(todo_id, changes)
            .await
            .map_err(todo_repository_error)?;
        updated
            .map(TodoObject::from)
            .ok_or_else(|| unknown_todo(&id))
    }
}
