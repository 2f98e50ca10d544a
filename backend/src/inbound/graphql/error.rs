//! GraphQL adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type transport-agnostic while letting
//! resolvers surface failures through the GraphQL error envelope with a
//! stable `code` extension. Internal error messages are redacted before
//! they reach clients.

use async_graphql::ErrorExtensions;
use tracing::error;

use crate::domain::ports::{PostPersistenceError, TodoPersistenceError, UserPersistenceError};
use crate::domain::{Error, ErrorCode};

fn redact_if_internal(err: Error) -> Error {
    if matches!(err.code(), ErrorCode::InternalError) {
        error!(message = %err, "internal error surfaced to GraphQL layer");
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = err.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        err
    }
}

/// Convert a domain error into the GraphQL error envelope.
pub(crate) fn graphql_error(err: Error) -> async_graphql::Error {
    let err = redact_if_internal(err);
    async_graphql::Error::new(err.message().to_owned()).extend_with(|_, extensions| {
        extensions.set("code", err.code().as_str());
        if let Some(trace_id) = err.trace_id() {
            extensions.set("traceId", trace_id);
        }
        if let Some(details) = err.details() {
            let details = async_graphql::Value::from_json(details.clone()).unwrap_or_default();
            extensions.set("details", details);
        }
    })
}

pub(crate) fn user_repository_error(err: UserPersistenceError) -> async_graphql::Error {
    let mapped = match err {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    };
    graphql_error(mapped)
}

pub(crate) fn post_repository_error(err: PostPersistenceError) -> async_graphql::Error {
    let mapped = match err {
        PostPersistenceError::Connection { message } => Error::service_unavailable(message),
        PostPersistenceError::Query { message } => Error::internal(message),
        PostPersistenceError::UserMissing { user_id } => {
            Error::not_found(format!("user {user_id} does not exist"))
        }
    };
    graphql_error(mapped)
}

pub(crate) fn todo_repository_error(err: TodoPersistenceError) -> async_graphql::Error {
    let mapped = match err {
        TodoPersistenceError::Connection { message } => Error::service_unavailable(message),
        TodoPersistenceError::Query { message } => Error::internal(message),
    };
    graphql_error(mapped)
}
