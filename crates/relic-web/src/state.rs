//! Application state.

use std::sync::Arc;

use relic_core::{ArtifactAnalyzer, Config};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ArtifactAnalyzer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(analyzer: ArtifactAnalyzer, config: Config) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            config: Arc::new(config),
        }
    }

    /// State for a server that should never reach the network.
    pub fn offline(config: Config) -> Self {
        Self::new(ArtifactAnalyzer::heuristic_only(), config)
    }

    /// Snapshot of the cloud configuration for status displays.
    pub fn status(&self) -> CloudStatus {
        let catalog = self.analyzer.catalog();
        CloudStatus {
            cloud_configured: self.analyzer.cloud_enabled(),
            selected_model: catalog.map(|c| c.selected.clone()),
            available_models: catalog.map(|c| c.available.clone()).unwrap_or_default(),
            models_detected: catalog.is_some_and(|c| c.detected),
        }
    }
}

/// Cloud readiness as shown in the sidebar and `/api/status`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CloudStatus {
    pub cloud_configured: bool,
    pub selected_model: Option<String>,
    pub available_models: Vec<String>,
    pub models_detected: bool,
}
