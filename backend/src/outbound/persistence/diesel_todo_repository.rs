//! PostgreSQL-backed `TodoRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TodoChanges, TodoPersistenceError, TodoRepository, TODO_LIST_LIMIT};
use crate::domain::{Todo, TodoId, TodoStatus};

use super::diesel_helpers::{decode_todo, map_diesel_error, map_pool_error};
use super::models::{NewTodoRow, TodoRow, TodoRowChanges};
use super::pool::{DbPool, PoolError};
use super::schema::todos;

/// Diesel-backed implementation of the todo repository port.
#[derive(Clone)]
pub struct DieselTodoRepository {
    pool: DbPool,
}

impl DieselTodoRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> TodoPersistenceError {
    map_pool_error(error, |message| TodoPersistenceError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> TodoPersistenceError {
    map_diesel_error(
        error,
        |message| TodoPersistenceError::query(message),
        |message| TodoPersistenceError::connection(message),
    )
}

#[async_trait]
impl TodoRepository for DieselTodoRepository {
    async fn insert(&self, todo: &Todo) -> Result<(), TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = NewTodoRow {
            id: todo.id().to_string(),
            text: todo.text().as_ref(),
            status: todo.status().as_str(),
            created_at: todo.created_at(),
        };

        diesel::insert_into(todos::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = todos::table
            .find(id.to_string())
            .select(TodoRow::as_select())
            .first::<TodoRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(decode_todo)
            .transpose()
            .map_err(TodoPersistenceError::query)
    }

    async fn list_recent(&self) -> Result<Vec<Todo>, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = todos::table
            .order((todos::created_at.desc(), todos::id.desc()))
            .limit(TODO_LIST_LIMIT)
            .select(TodoRow::as_select())
            .load::<TodoRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter()
            .map(decode_todo)
            .collect::<Result<Vec<_>, _>>()
            .map_err(TodoPersistenceError::query)
    }

    async fn update(
        &self,
        id: TodoId,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, TodoPersistenceError> {
        // Diesel rejects an all-None changeset; an empty update returns
        // the row as stored.
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let text = changes.text;
        let row_changes = TodoRowChanges {
            status: changes.status.map(TodoStatus::as_str),
            text: text.as_ref().map(AsRef::as_ref),
        };

        let row = diesel::update(todos::table.find(id.to_string()))
            .set(&row_changes)
            .returning(TodoRow::as_returning())
            .get_result::<TodoRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(decode_todo)
            .transpose()
            .map_err(TodoPersistenceError::query)
    }
}
