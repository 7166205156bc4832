//! Test utilities for the directory crate.
//!
//! This module provides in-memory adapters shared by unit tests (in `src/`)
//! and integration tests (in `tests/`). It is only compiled for tests or with
//! the `test-support` feature.

pub mod clock;
pub mod in_memory_cache;
pub mod in_memory_users;
pub mod plain_hasher;

pub use clock::MutableClock;
pub use in_memory_cache::{InMemoryCacheStore, UnreachableCacheStore};
pub use in_memory_users::InMemoryUserRepository;
pub use plain_hasher::PlainPasswordHasher;
