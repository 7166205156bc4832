//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Mutations run inside a transaction and use `RETURNING` so the caller gets
//! the committed row back in the same round trip.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{NewUser, StoredCredentials, UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, LoginName, PasswordHash, Role, User, UserChangeset, UserId, UserRecord,
    Username,
};

use super::models::{NewUserRow, UserChangesetRow, UserRow};
use super::pool::DbPool;
use super::schema::users;
use super::user_persistence_error_mapping::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the [`UserRepository`] port.
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

/// Rebuild a domain user from stored columns as the store holds them.
fn row_to_user(row: UserRow) -> User {
    User::new(UserRecord {
        id: UserId::new(row.id),
        username: Username::from_stored(row.username),
        email: EmailAddress::from_stored(row.email),
        role: Role::from_stored(row.role),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_users(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_user))
    }

    async fn find_credentials(
        &self,
        username: &LoginName,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<(UserRow, String)> = users::table
            .filter(users::username.eq(username.as_str()))
            .select((UserRow::as_select(), users::password_hash))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(|(user, hash)| StoredCredentials {
            user: row_to_user(user),
            password_hash: PasswordHash::new(hash),
        }))
    }

    async fn username_or_email_taken(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(
                users::username
                    .eq(username.as_ref())
                    .or(users::email.eq(email.as_ref())),
            ),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            username: user.username.as_ref(),
            email: user.email.as_ref(),
            password_hash: user.password_hash.as_str(),
        };
        let row: UserRow = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(users::table)
                        .values(&new_row)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(row_to_user(row))
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChangeset,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = UserChangesetRow {
            email: changes.email.as_ref().map(AsRef::as_ref),
            password_hash: changes.password_hash.as_ref().map(PasswordHash::as_str),
            role: changes.role.as_ref().map(AsRef::as_ref),
            updated_at: Utc::now(),
        };
        let row: Option<UserRow> = conn
            .transaction(|conn| {
                async move {
                    diesel::update(users::table.find(id.get()))
                        .set(&changeset)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_user))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(users::table.find(id.get()))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
