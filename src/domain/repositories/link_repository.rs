//! Repository trait for short link data access.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage capability for source link ↔ short code mappings.
///
/// Uniqueness of `short_code` and atomicity of visit increments are delegated
/// to the implementation; callers hold no locks.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - in-process maps
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new mapping with `visits = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if `code` is already taken. The
    /// existing row is left untouched.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert_mapping(&self, source_link: &str, code: &str) -> Result<(), AppError>;

    /// Returns the short code stored for `source_link`.
    ///
    /// When several rows share the source link, the earliest one wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row matches.
    async fn lookup_by_source(&self, source_link: &str) -> Result<String, AppError>;

    /// Returns the link stored under `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row matches.
    async fn lookup_by_code(&self, code: &str) -> Result<Link, AppError>;

    /// Atomically increments the visit counter and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row was affected.
    async fn increment_visits(&self, code: &str) -> Result<i64, AppError>;

    /// Checks that the storage backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
