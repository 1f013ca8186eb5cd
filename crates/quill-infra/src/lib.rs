//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL post storage via SeaORM
//!
//! The in-memory store is always available.

pub mod auth;
pub mod database;

pub use auth::{JwtConfig, JwtTokenService};
pub use database::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresPostRepository};
