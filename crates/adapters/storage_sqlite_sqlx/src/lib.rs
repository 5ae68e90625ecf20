//! # postboard-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `postboard-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Translate constraint violations (unique email, post author) into domain errors
//!
//! ## Dependency rule
//! Depends on `postboard-app` (for port traits) and `postboard-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod decode;
pub mod error;
pub mod pool;
pub mod post_repo;
pub mod user_repo;

pub use pool::{Config, Database};
pub use post_repo::SqlitePostRepository;
pub use user_repo::SqliteUserRepository;
