//! Link repository implementations.
//!
//! - [`PgLinkRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryLinkRepository`] - Mutex-guarded maps for tests and local runs

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
