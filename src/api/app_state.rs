use crate::observability::ObservabilityState;
use crate::services::engine::GuessService;
use std::sync::Arc;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Guessing engine shared across all game sessions
    pub guess_service: Arc<dyn GuessService>,
    /// Metrics and health checks
    pub observability: Arc<ObservabilityState>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("guess_service", &"Arc<dyn GuessService>")
            .field("observability", &"Arc<ObservabilityState>")
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        guess_service: Arc<dyn GuessService>,
        observability: Arc<ObservabilityState>,
    ) -> Self {
        Self {
            guess_service,
            observability,
        }
    }
}
