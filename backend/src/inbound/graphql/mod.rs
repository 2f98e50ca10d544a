//! GraphQL inbound adapter.
//!
//! Declares the schema the browser apps consume: `Query` lookups for
//! users, posts, and todos, and `Mutation` fields for creating and
//! updating them. Resolvers talk to the domain through the port bundle in
//! [`state::GqlPorts`].

pub mod error;
pub mod mutation;
pub mod objects;
pub mod query;
pub mod state;

use async_graphql::{EmptySubscription, Schema};

use mutation::MutationRoot;
use query::QueryRoot;
use state::GqlPorts;

/// Schema type served over `/graphql`.
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema around a port bundle.
pub fn build_schema(ports: GqlPorts) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(ports)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn sdl_exposes_the_demo_contract() {
        let schema = build_schema(GqlPorts::fixture());
        let sdl = schema.sdl();
        for field in [
            "getUser", "getPost", "getTodo", "getTodoList", "addUser", "addPost", "addTodo",
            "updateTodo",
        ] {
            assert!(sdl.contains(field), "schema is missing {field}");
        }
        assert!(sdl.contains("enum TodoStatus"));
        assert!(sdl.contains("OPEN"));
        assert!(sdl.contains("CLOSE"));
    }
}
