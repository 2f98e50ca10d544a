//! In-memory fixture implementations of the persistence ports.
//!
//! The fixture store backs the integration tests and the server's
//! database-less mode. It mirrors the relational adapters' observable
//! behaviour: foreign keys are enforced on insert and list queries order by
//! identifier, which sorts by creation order.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use super::id::{PostId, TodoId, UserId};
use super::ports::{
    PostPersistenceError, PostRepository, PostWithAuthor, TodoChanges, TodoPersistenceError,
    TodoRepository, UserPersistenceError, UserRepository, UserWithPosts, RECENT_POSTS_LIMIT,
    TODO_LIST_LIMIT,
};
use super::post::Post;
use super::todo::Todo;
use super::user::User;

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    posts: Vec<Post>,
    todos: Vec<Todo>,
}

/// Shared in-memory store implementing all three repository ports.
///
/// Clones share the same state, so a single store can be handed to the
/// user, post, and todo ports of one schema instance.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    state: Arc<Mutex<State>>,
}

impl FixtureStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

#[async_trait]
impl UserRepository for FixtureStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.with_state(|state| state.users.push(user.clone()));
        Ok(())
    }

    async fn find_with_recent_posts(
        &self,
        id: UserId,
    ) -> Result<Option<UserWithPosts>, UserPersistenceError> {
        Ok(self.with_state(|state| {
            let user = state.users.iter().find(|user| user.id() == id)?.clone();
            let mut posts: Vec<Post> = state
                .posts
                .iter()
                .filter(|post| post.user_id() == id)
                .cloned()
                .collect();
            posts.sort_by_key(|post| std::cmp::Reverse(post.id()));
            posts.truncate(RECENT_POSTS_LIMIT as usize);
            Some(UserWithPosts { user, posts })
        }))
    }
}

#[async_trait]
impl PostRepository for FixtureStore {
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError> {
        self.with_state(|state| {
            if !state.users.iter().any(|user| user.id() == post.user_id()) {
                return Err(PostPersistenceError::user_missing(
                    post.user_id().to_string(),
                ));
            }
            state.posts.push(post.clone());
            Ok(())
        })
    }

    async fn find_with_author(
        &self,
        id: PostId,
    ) -> Result<Option<PostWithAuthor>, PostPersistenceError> {
        self.with_state(|state| {
            let Some(post) = state.posts.iter().find(|post| post.id() == id).cloned() else {
                return Ok(None);
            };
            let author = state
                .users
                .iter()
                .find(|user| user.id() == post.user_id())
                .cloned()
                .ok_or_else(|| PostPersistenceError::query("post author record is missing"))?;
            Ok(Some(PostWithAuthor { post, author }))
        })
    }
}

#[async_trait]
impl TodoRepository for FixtureStore {
    async fn insert(&self, todo: &Todo) -> Result<(), TodoPersistenceError> {
        self.with_state(|state| state.todos.push(todo.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoPersistenceError> {
        Ok(self.with_state(|state| state.todos.iter().find(|todo| todo.id() == id).cloned()))
    }

    async fn list_recent(&self) -> Result<Vec<Todo>, TodoPersistenceError> {
        Ok(self.with_state(|state| {
            let mut todos = state.todos.clone();
            todos.sort_by_key(|todo| std::cmp::Reverse((todo.created_at(), todo.id())));
            todos.truncate(TODO_LIST_LIMIT as usize);
            todos
        }))
    }

    async fn update(
        &self,
        id: TodoId,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, TodoPersistenceError> {
        Ok(self.with_state(|state| {
            let todo = state.todos.iter_mut().find(|todo| todo.id() == id)?;
            if let Some(status) = changes.status {
                todo.set_status(status);
            }
            if let Some(text) = changes.text {
                todo.set_text(text);
            }
            Some(todo.clone())
        }))
    }
}
