//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    UserPersistenceError, UserRepository, UserWithPosts, RECENT_POSTS_LIMIT,
};
use crate::domain::{User, UserId};

use super::diesel_helpers::{decode_post, decode_user, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, PostRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, users};

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, |message| UserPersistenceError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        |message| UserPersistenceError::query(message),
        |message| UserPersistenceError::connection(message),
    )
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = NewUserRow {
            id: user.id().to_string(),
            name: user.name().as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(())
    }

    async fn find_with_recent_posts(
        &self,
        id: UserId,
    ) -> Result<Option<UserWithPosts>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .find(id.to_string())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let post_rows = posts::table
            .filter(posts::user_id.eq(id.to_string()))
            .order(posts::id.desc())
            .limit(RECENT_POSTS_LIMIT)
            .select(PostRow::as_select())
            .load::<PostRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        let user = decode_user(row).map_err(UserPersistenceError::query)?;
        let recent = post_rows
            .into_iter()
            .map(decode_post)
            .collect::<Result<Vec<_>, _>>()
            .map_err(UserPersistenceError::query)?;

        Ok(Some(UserWithPosts { user, posts: recent }))
    }
}
