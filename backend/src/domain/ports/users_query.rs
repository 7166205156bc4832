//! Driving port for user read use-cases.
//!
//! Inbound adapters call this port to list or fetch users without knowing
//! whether the answer came from the cache tier or the durable store; the
//! provenance is reported back as data.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, User, UserId};

/// Where a user listing was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListSource {
    /// A live snapshot in the cache tier.
    Cache,
    /// The durable store.
    Database,
}

/// All users together with their provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserListing {
    pub users: Vec<User>,
    pub source: ListSource,
}

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user ordered by identifier, tagged with its provenance.
    async fn list_users(&self) -> Result<UserListing, Error>;

    /// A single user; `not_found` when the id is unknown.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}
