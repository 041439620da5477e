//! Shared state handed to every request handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::CodeGenerator;

/// Application state, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    /// Prefix used to build absolute short URLs, e.g. `https://s.example.com`.
    pub domain: String,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        generator: Arc<dyn CodeGenerator>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository, generator)),
            domain: domain.into(),
        }
    }
}
