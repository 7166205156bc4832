//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed user repository using Diesel ORM
//! - **cache**: Redis-backed cache store and the disabled fallback
//! - **security**: bcrypt credential hashing
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod persistence;
pub mod security;
