//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! The owning-user foreign key is enforced by the database; violations are
//! surfaced as [`PostPersistenceError::UserMissing`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostPersistenceError, PostRepository, PostWithAuthor};
use crate::domain::{Post, PostId};

use super::diesel_helpers::{decode_post, decode_user, map_diesel_error, map_pool_error};
use super::models::{NewPostRow, PostRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, users};

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> PostPersistenceError {
    map_pool_error(error, |message| PostPersistenceError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> PostPersistenceError {
    map_diesel_error(
        error,
        |message| PostPersistenceError::query(message),
        |message| PostPersistenceError::connection(message),
    )
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = NewPostRow {
            id: post.id().to_string(),
            user_id: post.user_id().to_string(),
            text: post.text().as_ref(),
        };

        match diesel::insert_into(posts::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => Err(
                PostPersistenceError::user_missing(post.user_id().to_string()),
            ),
            Err(other) => Err(map_diesel(other)),
        }
    }

    async fn find_with_author(
        &self,
        id: PostId,
    ) -> Result<Option<PostWithAuthor>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = posts::table
            .inner_join(users::table)
            .filter(posts::id.eq(id.to_string()))
            .select((PostRow::as_select(), UserRow::as_select()))
            .first::<(PostRow, UserRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        let Some((post_row, author_row)) = row else {
            return Ok(None);
        };

        let post = decode_post(post_row).map_err(PostPersistenceError::query)?;
        let author = decode_user(author_row).map_err(PostPersistenceError::query)?;
        Ok(Some(PostWithAuthor { post, author }))
    }
}
