//! In-memory [`UserRepository`] mirroring the Postgres adapter's contract.
//!
//! Identifiers are issued sequentially from 1, the role defaults to `user`,
//! timestamps come from the injected clock, and username/email uniqueness is
//! enforced as the database constraints would.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{NewUser, StoredCredentials, UserPersistenceError, UserRepository};
use crate::domain::{
    DEFAULT_ROLE, EmailAddress, LoginName, PasswordHash, Role, User, UserChangeset, UserId,
    UserRecord, Username,
};

struct Row {
    record: UserRecord,
    password_hash: PasswordHash,
}

impl Row {
    fn user(&self) -> User {
        User::new(self.record.clone())
    }
}

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, Row>,
}

/// Durable-store stand-in backed by a sorted map.
pub struct InMemoryUserRepository {
    clock: Arc<dyn Clock>,
    table: Mutex<Table>,
    online: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            table: Mutex::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
            online: AtomicBool::new(true),
        }
    }

    /// Simulate losing (`false`) or regaining (`true`) the database.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Stored hash for `username`, for asserting on credential updates.
    pub fn password_hash_of(&self, username: &str) -> Option<PasswordHash> {
        self.lock_table()
            .rows
            .values()
            .find(|row| row.record.username.as_ref() == username)
            .map(|row| row.password_hash.clone())
    }

    fn ensure_online(&self) -> Result<(), UserPersistenceError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(UserPersistenceError::connection(
                "failed to get connection from pool: timed out",
            ))
        }
    }

    fn lock_table(&self) -> MutexGuard<'_, Table> {
        match self.table.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("user table mutex"),
        }
    }
}

fn unique_violation(constraint: &str) -> UserPersistenceError {
    UserPersistenceError::unique_violation(format!(
        "duplicate key value violates unique constraint \"{constraint}\""
    ))
}

fn email_taken(table: &Table, email: &EmailAddress, except: Option<i32>) -> bool {
    table
        .rows
        .iter()
        .any(|(id, row)| Some(*id) != except && &row.record.email == email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_users(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.ensure_online()?;
        Ok(self.lock_table().rows.values().map(Row::user).collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        self.ensure_online()?;
        Ok(self.lock_table().rows.get(&id.get()).map(Row::user))
    }

    async fn find_credentials(
        &self,
        username: &LoginName,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        self.ensure_online()?;
        Ok(self
            .lock_table()
            .rows
            .values()
            .find(|row| row.record.username.as_ref() == username.as_str())
            .map(|row| StoredCredentials {
                user: row.user(),
                password_hash: row.password_hash.clone(),
            }))
    }

    async fn username_or_email_taken(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<bool, UserPersistenceError> {
        self.ensure_online()?;
        let table = self.lock_table();
        Ok(table
            .rows
            .values()
            .any(|row| &row.record.username == username || &row.record.email == email))
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        self.ensure_online()?;
        let now = self.clock.utc();
        let mut table = self.lock_table();
        if table
            .rows
            .values()
            .any(|row| row.record.username == user.username)
        {
            return Err(unique_violation("users_username_key"));
        }
        if email_taken(&table, &user.email, None) {
            return Err(unique_violation("users_email_key"));
        }

        let id = table.next_id;
        table.next_id += 1;
        let row = Row {
            record: UserRecord {
                id: UserId::new(id),
                username: user.username.clone(),
                email: user.email.clone(),
                role: Role::from_stored(DEFAULT_ROLE),
                created_at: now,
                updated_at: now,
            },
            password_hash: user.password_hash.clone(),
        };
        let created = row.user();
        table.rows.insert(id, row);
        Ok(created)
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChangeset,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.ensure_online()?;
        let now = self.clock.utc();
        let mut table = self.lock_table();
        let collides = changes
            .email
            .as_ref()
            .is_some_and(|email| email_taken(&table, email, Some(id.get())));
        if collides {
            return Err(unique_violation("users_email_key"));
        }
        let Some(row) = table.rows.get_mut(&id.get()) else {
            return Ok(None);
        };
        changes.apply(&mut row.record, &mut row.password_hash);
        row.record.updated_at = now;
        Ok(Some(row.user()))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        self.ensure_online()?;
        Ok(self.lock_table().rows.remove(&id.get()).is_some())
    }
}
