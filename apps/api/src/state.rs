use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::validation::ArticleValidator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Text generator for article writing. `LlmClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
    /// Pluggable validator. Default: RuleBasedValidator with the stock grading policy.
    pub validator: Arc<dyn ArticleValidator>,
}
