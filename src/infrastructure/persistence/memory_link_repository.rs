//! In-process implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    by_code: HashMap<String, Link>,
    // First code inserted for each source link.
    by_source: HashMap<String, String>,
}

/// Repository keeping links in memory behind a single mutex.
///
/// Honors the same contract as the PostgreSQL repository: unique codes,
/// first-writer-wins source lookups, and atomic increments. Contents are lost
/// when the process exits.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    tables: Mutex<Tables>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.lock().map(|t| t.by_code.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::internal("Link store lock poisoned", json!({})))
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert_mapping(&self, source_link: &str, code: &str) -> Result<(), AppError> {
        let mut tables = self.lock()?;

        if tables.by_code.contains_key(code) {
            return Err(AppError::already_exists(
                "Short code already exists",
                json!({ "code": code }),
            ));
        }

        tables.by_code.insert(
            code.to_string(),
            Link::new(source_link.to_string(), code.to_string(), 0, Utc::now()),
        );
        tables
            .by_source
            .entry(source_link.to_string())
            .or_insert_with(|| code.to_string());

        Ok(())
    }

    async fn lookup_by_source(&self, source_link: &str) -> Result<String, AppError> {
        self.lock()?
            .by_source
            .get(source_link)
            .cloned()
            .ok_or_else(|| {
                AppError::not_found("Link not found", json!({ "source_link": source_link }))
            })
    }

    async fn lookup_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.lock()?
            .by_code
            .get(code)
            .cloned()
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))
    }

    async fn increment_visits(&self, code: &str) -> Result<i64, AppError> {
        let mut tables = self.lock()?;
        let link = tables
            .by_code
            .get_mut(code)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))?;

        link.visits += 1;
        Ok(link.visits)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
