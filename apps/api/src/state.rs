use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only; nothing is carried between submissions.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable text generator. Production: `GeminiClient`.
    pub generator: Arc<dyn TextGenerator>,
}
