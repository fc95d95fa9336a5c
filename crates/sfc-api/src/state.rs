//! Application state.

use sfc_engine::AnalysisConfig;

/// Application state shared across handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppState {
    /// Parameters used when a request omits them.
    pub defaults: AnalysisConfig,
}

impl AppState {
    /// Creates state with the given analysis defaults.
    #[must_use]
    pub fn new(defaults: AnalysisConfig) -> Self {
        Self { defaults }
    }
}
