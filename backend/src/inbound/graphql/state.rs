//! Shared GraphQL adapter state.
//!
//! Resolvers reach their dependencies through this bundle, stored in the
//! schema's context data. They depend only on domain ports and remain
//! testable without I/O.

use std::sync::Arc;

use crate::domain::fixtures::FixtureStore;
use crate::domain::ports::{PostRepository, TodoRepository, UserRepository};

/// Parameter object bundling the port implementations resolvers use.
#[derive(Clone)]
pub struct GqlPorts {
    /// User persistence port.
    pub users: Arc<dyn UserRepository>,
    /// Post persistence port.
    pub posts: Arc<dyn PostRepository>,
    /// Todo persistence port.
    pub todos: Arc<dyn TodoRepository>,
}

impl GqlPorts {
    /// Bundle ports backed by a single shared in-memory store.
    ///
    /// Used by the integration tests and by the server when no database
    /// is configured.
    pub fn fixture() -> Self {
        let store = FixtureStore::new();
        Self {
            users: Arc::new(store.clone()),
            posts: Arc::new(store.clone()),
            todos: Arc::new(store),
        }
    }
}
