#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use link_reducer::domain::entities::Link;
use link_reducer::domain::repositories::LinkRepository;
use link_reducer::error::AppError;
use link_reducer::infrastructure::persistence::InMemoryLinkRepository;
use link_reducer::routes::app_router;
use link_reducer::state::AppState;
use link_reducer::utils::code_generator::RandomCodeGenerator;
use serde_json::json;
use std::sync::Arc;

pub const TEST_DOMAIN: &str = "http://short.test";

pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let state = AppState::new(
        repo.clone(),
        Arc::new(RandomCodeGenerator::with_seed(2024)),
        TEST_DOMAIN,
    );

    (state, repo)
}

pub fn state_with_repository(repo: Arc<dyn LinkRepository>) -> AppState {
    AppState::new(repo, Arc::new(RandomCodeGenerator::with_seed(2024)), TEST_DOMAIN)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state, 10)).unwrap()
}

/// Extracts the trailing code from an absolute short URL.
pub fn code_of(short_link: &str) -> String {
    short_link.rsplit('/').next().unwrap().to_string()
}

/// Store whose every insert collides.
pub struct CollidingLinkRepository;

#[async_trait]
impl LinkRepository for CollidingLinkRepository {
    async fn insert_mapping(&self, _source_link: &str, code: &str) -> Result<(), AppError> {
        Err(AppError::already_exists(
            "Short code already exists",
            json!({ "code": code }),
        ))
    }

    async fn lookup_by_source(&self, _source_link: &str) -> Result<String, AppError> {
        Err(AppError::not_found("Link not found", json!({})))
    }

    async fn lookup_by_code(&self, _code: &str) -> Result<Link, AppError> {
        Err(AppError::not_found("Link not found", json!({})))
    }

    async fn increment_visits(&self, _code: &str) -> Result<i64, AppError> {
        Err(AppError::not_found("Link not found", json!({})))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store that is unreachable.
pub struct FailingLinkRepository;

fn unavailable() -> AppError {
    AppError::internal("Database error", json!({ "reason": "connection refused" }))
}

#[async_trait]
impl LinkRepository for FailingLinkRepository {
    async fn insert_mapping(&self, _source_link: &str, _code: &str) -> Result<(), AppError> {
        Err(unavailable())
    }

    async fn lookup_by_source(&self, _source_link: &str) -> Result<String, AppError> {
        Err(unavailable())
    }

    async fn lookup_by_code(&self, _code: &str) -> Result<Link, AppError> {
        Err(unavailable())
    }

    async fn increment_visits(&self, _code: &str) -> Result<i64, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}
