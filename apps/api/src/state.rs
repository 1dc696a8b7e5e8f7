use std::sync::Arc;

use crate::analysis::store::AnalysisStore;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable analysis store. Default: `PgAnalysisStore`.
    pub analyses: Arc<dyn AnalysisStore>,
    #[allow(dead_code)]
    pub config: Config,
}
