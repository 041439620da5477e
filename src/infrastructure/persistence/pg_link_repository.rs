//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error};

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for the `links` table.
///
/// Code uniqueness is enforced by the `links_short_link_key` constraint and
/// visit increments are evaluated server-side, so no application-level locking
/// is needed.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    src_link: String,
    short_link: String,
    visits: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.src_link, row.short_link, row.visits, row.created_at)
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert_mapping(&self, source_link: &str, code: &str) -> Result<(), AppError> {
        sqlx::query("INSERT INTO links (src_link, short_link) VALUES ($1, $2)")
            .bind(source_link)
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                let err = AppError::from(e);
                match err {
                    AppError::AlreadyExists { .. } => {
                        debug!(short_code = code, "short code already exists");
                        AppError::already_exists(
                            "Short code already exists",
                            json!({ "code": code }),
                        )
                    }
                    other => {
                        error!(short_code = code, error = %other, "failed to insert link");
                        other
                    }
                }
            })?;

        Ok(())
    }

    async fn lookup_by_source(&self, source_link: &str) -> Result<String, AppError> {
        let code = sqlx::query_scalar::<_, String>(
            r#"
            SELECT short_link
            FROM links
            WHERE src_link = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(source_link)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| {
            error!(source_link, error = %e, "failed to look up link by source");
            AppError::from(e)
        })?;

        code.ok_or_else(|| {
            debug!(source_link, "link not found by source");
            AppError::not_found("Link not found", json!({ "source_link": source_link }))
        })
    }

    async fn lookup_by_code(&self, code: &str) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT src_link, short_link, visits, created_at
            FROM links
            WHERE short_link = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| {
            error!(short_code = code, error = %e, "failed to look up link by code");
            AppError::from(e)
        })?;

        row.map(Link::from).ok_or_else(|| {
            debug!(short_code = code, "link not found by code");
            AppError::not_found("Link not found", json!({ "code": code }))
        })
    }

    async fn increment_visits(&self, code: &str) -> Result<i64, AppError> {
        let visits = sqlx::query_scalar::<_, i64>(
            "UPDATE links SET visits = visits + 1 WHERE short_link = $1 RETURNING visits",
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| {
            error!(short_code = code, error = %e, "failed to increment visits");
            AppError::from(e)
        })?;

        visits.ok_or_else(|| {
            debug!(short_code = code, "no link to increment");
            AppError::not_found("Link not found", json!({ "code": code }))
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
