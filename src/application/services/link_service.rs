//! Short code resolution and visit tracking.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error};

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;

/// Total insert attempts before a collision storm is reported as
/// [`AppError::LinkExists`].
pub const MAX_CODE_ATTEMPTS: usize = 2;

/// Service mapping source links to short codes.
///
/// The lookup-then-insert sequence in [`LinkService::resolve`] is not
/// transactional. Two concurrent requests for the same new source link may
/// both miss the lookup and both insert, yielding two codes for one source.
/// Uniqueness is only guaranteed for codes.
pub struct LinkService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    generator: Arc<dyn CodeGenerator>,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Returns the short code for `source_link`, creating one if needed.
    ///
    /// Idempotent for a given source link: an existing mapping is returned
    /// without touching the store further.
    ///
    /// # Code Generation
    ///
    /// - Draws a random candidate and inserts it
    /// - On a code collision, draws a fresh candidate
    /// - Gives up after [`MAX_CODE_ATTEMPTS`] collisions
    ///
    /// # Errors
    ///
    /// Returns [`AppError::LinkExists`] when every attempt collided.
    /// Any other store error is propagated unchanged.
    pub async fn resolve(&self, source_link: &str) -> Result<String, AppError> {
        match self.repository.lookup_by_source(source_link).await {
            Ok(code) => {
                debug!(source_link, short_code = %code, "link already exists; returning");
                return Ok(code);
            }
            Err(AppError::NotFound { .. }) => {
                debug!(source_link, "link not exists; generating code");
            }
            Err(e) => {
                error!(source_link, error = %e, "failed to look up link by source");
                return Err(e);
            }
        }

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let candidate = self.generator.generate();

            match self
                .repository
                .insert_mapping(source_link, &candidate)
                .await
            {
                Ok(()) => {
                    debug!(source_link, short_code = %candidate, "created new link");
                    return Ok(candidate);
                }
                Err(AppError::AlreadyExists { .. }) => {
                    debug!(
                        short_code = %candidate,
                        attempt,
                        "short code collision; regenerating"
                    );
                }
                Err(e) => {
                    error!(source_link, error = %e, "failed to create short link");
                    return Err(e);
                }
            }
        }

        Err(AppError::link_exists(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.repository.lookup_by_code(code).await
    }

    /// Counts one visit to `code` and returns the new total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code vanished; a missing row is
    /// never treated as success.
    pub async fn record_visit(&self, code: &str) -> Result<i64, AppError> {
        self.repository.increment_visits(code).await
    }

    /// Checks that the store is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Constructs the absolute short URL from a domain prefix and code.
    pub fn get_short_url(&self, domain: &str, code: &str) -> String {
        format!("{}/{}", domain.trim_end_matches('/'), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::persistence::InMemoryLinkRepository;
    use crate::utils::code_generator::{MockCodeGenerator, RandomCodeGenerator, is_valid_code};
    use mockall::Sequence;

    fn not_found() -> AppError {
        AppError::not_found("Link not found", json!({}))
    }

    fn collision() -> AppError {
        AppError::already_exists("Short code already exists", json!({}))
    }

    fn fixed_generator(code: &'static str, times: usize) -> Arc<dyn CodeGenerator> {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .times(times)
            .returning(move || code.to_string());
        Arc::new(generator)
    }

    #[tokio::test]
    async fn test_resolve_creates_new_link() {
        let mut repo = MockLinkRepository::new();

        repo.expect_lookup_by_source()
            .times(1)
            .returning(|_| Err(not_found()));

        repo.expect_insert_mapping()
            .withf(|src, code| src == "https://example.com" && code == "abcde")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = LinkService::new(Arc::new(repo), fixed_generator("abcde", 1));

        let code = service.resolve("https://example.com").await.unwrap();
        assert_eq!(code, "abcde");
    }

    #[tokio::test]
    async fn test_resolve_returns_existing_code() {
        let mut repo = MockLinkRepository::new();

        repo.expect_lookup_by_source()
            .times(1)
            .returning(|_| Ok("exist".to_string()));

        repo.expect_insert_mapping().times(0);

        let service = LinkService::new(Arc::new(repo), fixed_generator("never", 0));

        let code = service.resolve("https://example.com").await.unwrap();
        assert_eq!(code, "exist");
    }

    #[tokio::test]
    async fn test_resolve_retries_after_collision() {
        let mut repo = MockLinkRepository::new();
        let mut generator = MockCodeGenerator::new();
        let mut seq = Sequence::new();

        repo.expect_lookup_by_source()
            .times(1)
            .returning(|_| Err(not_found()));

        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "taken".to_string());
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "fresh".to_string());

        repo.expect_insert_mapping()
            .withf(|_, code| code == "taken")
            .times(1)
            .returning(|_, _| Err(collision()));
        repo.expect_insert_mapping()
            .withf(|_, code| code == "fresh")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = LinkService::new(Arc::new(repo), Arc::new(generator));

        let code = service.resolve("https://example.com").await.unwrap();
        assert_eq!(code, "fresh");
    }

    #[tokio::test]
    async fn test_resolve_gives_up_after_max_attempts() {
        let mut repo = MockLinkRepository::new();

        repo.expect_lookup_by_source()
            .times(1)
            .returning(|_| Err(not_found()));

        repo.expect_insert_mapping()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|_, _| Err(collision()));

        let service = LinkService::new(
            Arc::new(repo),
            fixed_generator("dupli", MAX_CODE_ATTEMPTS),
        );

        let result = service.resolve("https://example.com").await;
        assert!(matches!(result, Err(AppError::LinkExists { .. })));
    }

    #[tokio::test]
    async fn test_resolve_propagates_lookup_failure() {
        let mut repo = MockLinkRepository::new();

        repo.expect_lookup_by_source()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        repo.expect_insert_mapping().times(0);

        let service = LinkService::new(Arc::new(repo), fixed_generator("never", 0));

        let result = service.resolve("https://example.com").await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_resolve_does_not_retry_internal_insert_errors() {
        let mut repo = MockLinkRepository::new();

        repo.expect_lookup_by_source()
            .times(1)
            .returning(|_| Err(not_found()));

        repo.expect_insert_mapping()
            .times(1)
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        let service = LinkService::new(Arc::new(repo), fixed_generator("abcde", 1));

        let result = service.resolve("https://example.com").await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent_against_store() {
        let repo = Arc::new(InMemoryLinkRepository::new());
        let service = LinkService::new(
            repo.clone(),
            Arc::new(RandomCodeGenerator::with_seed(11)),
        );

        let first = service.resolve("https://example.com/page").await.unwrap();
        let second = service.resolve("https://example.com/page").await.unwrap();

        assert_eq!(first, second);
        assert!(is_valid_code(&first));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_record_visit_on_missing_code() {
        let mut repo = MockLinkRepository::new();

        repo.expect_increment_visits()
            .withf(|code| code == "ghost")
            .times(1)
            .returning(|_| Err(not_found()));

        let service = LinkService::new(Arc::new(repo), fixed_generator("never", 0));

        let result = service.record_visit("ghost").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[test]
    fn test_get_short_url_trims_trailing_slash() {
        let service = LinkService::new(
            Arc::new(MockLinkRepository::new()),
            fixed_generator("never", 0),
        );

        assert_eq!(
            service.get_short_url("https://s.example.com/", "abcde"),
            "https://s.example.com/abcde"
        );
        assert_eq!(
            service.get_short_url("https://s.example.com", "abcde"),
            "https://s.example.com/abcde"
        );
    }
}
