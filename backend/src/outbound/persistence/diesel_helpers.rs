//! Shared helpers for Diesel repository implementations.
//!
//! Provides generic error mapping from pool and Diesel failures into each
//! port's error type, plus decoding of raw rows into validated domain
//! aggregates.

use tracing::debug;

use crate::domain::{Post, PostId, PostText, Todo, TodoId, TodoStatus, TodoText, User, UserId, UserName};

use super::models::{PostRow, TodoRow, UserRow};
use super::pool::PoolError;

/// Map pool errors into a port's connection error variant.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => connection(message),
    }
}

/// Map Diesel errors into a port's query or connection error variant.
pub(crate) fn map_diesel_error<E>(
    error: diesel::result::Error,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        other => query(other.to_string()),
    }
}

/// Decode a stored user row through the validated domain constructors.
///
/// A failure here means the row violates a domain invariant; the message
/// is mapped into the calling port's query error.
pub(crate) fn decode_user(row: UserRow) -> Result<User, String> {
    let id = UserId::parse(&row.id).map_err(|err| format!("user id {:?}: {err}", row.id))?;
    let name = UserName::new(row.name).map_err(|err| err.to_string())?;
    Ok(User::new(id, name))
}

/// Decode a stored post row through the validated domain constructors.
pub(crate) fn decode_post(row: PostRow) -> Result<Post, String> {
    let id = PostId::parse(&row.id).map_err(|err| format!("post id {:?}: {err}", row.id))?;
    let user_id =
        UserId::parse(&row.user_id).map_err(|err| format!("post owner {:?}: {err}", row.user_id))?;
    let text = PostText::new(row.text).map_err(|err| err.to_string())?;
    Ok(Post::new(id, user_id, text))
}

/// Decode a stored todo row through the validated domain constructors.
pub(crate) fn decode_todo(row: TodoRow) -> Result<Todo, String> {
    let id = TodoId::parse(&row.id).map_err(|err| format!("todo id {:?}: {err}", row.id))?;
    let text = TodoText::new(row.text).map_err(|err| err.to_string())?;
    let status = TodoStatus::parse(&row.status).map_err(|err| err.to_string())?;
    Ok(Todo::new(id, text, status, row.created_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn decode_user_round_trips_valid_rows() {
        let id = UserId::generate();
        let row = UserRow {
            id: id.to_string(),
            name: "Ada".to_owned(),
        };
        let user = decode_user(row).expect("valid row decodes");
        assert_eq!(user.id(), id);
        assert_eq!(user.name().as_ref(), "Ada");
    }

    #[rstest]
    fn decode_user_rejects_corrupt_ids() {
        let row = UserRow {
            id: "not-a-ulid".to_owned(),
            name: "Ada".to_owned(),
        };
        let err = decode_user(row).expect_err("corrupt id rejected");
        assert!(err.contains("not-a-ulid"));
    }

    #[rstest]
    fn decode_todo_rejects_unknown_status_labels() {
        let row = TodoRow {
            id: TodoId::generate().to_string(),
            text: "stored".to_owned(),
            status: "DONE".to_owned(),
            created_at: Utc::now(),
        };
        let err = decode_todo(row).expect_err("unknown status rejected");
        assert!(err.contains("DONE"));
    }

    #[rstest]
    fn decode_post_round_trips_valid_rows() {
        let row = PostRow {
            id: PostId::generate().to_string(),
            user_id: UserId::generate().to_string(),
            text: "hello".to_owned(),
        };
        let post = decode_post(row).expect("valid row decodes");
        assert_eq!(post.text().as_ref(), "hello");
    }

    #[rstest]
    fn pool_errors_map_to_connection_failures() {
        let mapped = map_pool_error(PoolError::checkout("timed out"), |message| message);
        assert_eq!(mapped, "timed out");
    }
}
