use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::generation::generator::TestGenerator;
use crate::generation::metadata::MaterialAnalyzer;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one in-memory session. Never locked across a generation call.
    pub session: Arc<Mutex<Session>>,
    /// Pluggable generation backend. Default: LlmTestGenerator.
    pub generator: Arc<dyn TestGenerator>,
    pub analyzer: Arc<dyn MaterialAnalyzer>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        config: Config,
        generator: Arc<dyn TestGenerator>,
        analyzer: Arc<dyn MaterialAnalyzer>,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            generator,
            analyzer,
            config,
        }
    }
}
