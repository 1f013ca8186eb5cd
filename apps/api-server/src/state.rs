//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::{PostRepository, TokenService};
use quill_infra::{InMemoryPostRepository, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Assemble state from an already-built repository and token service.
    pub fn new(repo: Arc<dyn PostRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            posts: Arc::new(PostService::new(repo)),
            tokens,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn from_config(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let repo = Self::post_repository(config).await;

        tracing::info!("Application state initialized");

        Self::new(repo, tokens)
    }

    #[cfg(feature = "postgres")]
    async fn post_repository(config: &AppConfig) -> Arc<dyn PostRepository> {
        use quill_infra::PostgresPostRepository;
        use quill_infra::database::{connect, ensure_schema};

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryPostRepository::new());
        };

        let conn = match connect(db_config).await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return Arc::new(InMemoryPostRepository::new());
            }
        };

        if let Err(e) = ensure_schema(&conn).await {
            tracing::error!("Failed to prepare posts table: {}", e);
        }

        Arc::new(PostgresPostRepository::new(conn))
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_repository(_config: &AppConfig) -> Arc<dyn PostRepository> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Arc::new(InMemoryPostRepository::new())
    }
}
