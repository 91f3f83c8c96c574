//! Artifact analysis orchestration.
//!
//! Chooses between the cloud adapter and the offline analyzer. A result is
//! always produced: when the cloud path is missing or fails, the heuristic
//! report is returned together with a notice explaining why.

pub mod model;

use tracing::{info, warn};

use crate::artifact::{ArtifactDescription, ImageSummary};
use crate::cloud::{CloudAdapter, FailureKind, ModelCatalog};
use crate::config::Config;
use crate::heuristic::HeuristicAnalyzer;

pub use model::{AnalysisResult, AnalysisSource, CloudNotice, REPORT_FILE_NAME};

/// Whether the cloud path may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    #[default]
    Auto,
    Offline,
}

/// Entry point for every analysis.
pub struct ArtifactAnalyzer {
    heuristic: HeuristicAnalyzer,
    cloud: Option<CloudAdapter>,
}

impl ArtifactAnalyzer {
    pub fn new(cloud: Option<CloudAdapter>) -> Self {
        Self {
            heuristic: HeuristicAnalyzer::new(),
            cloud,
        }
    }

    /// Offline-only analyzer.
    pub fn heuristic_only() -> Self {
        Self::new(None)
    }

    /// Build from config; the cloud path is enabled only with a credential.
    pub fn from_config(config: &Config) -> Self {
        let cloud = match CloudAdapter::from_config(config) {
            Ok(adapter) => Some(adapter),
            Err(e) => {
                info!(reason = %e, "Cloud analysis disabled");
                None
            }
        };
        Self::new(cloud)
    }

    pub fn cloud_enabled(&self) -> bool {
        self.cloud.is_some()
    }

    /// Run model discovery now so the first request does not pay for it.
    pub async fn warm_up(&self) -> Option<&ModelCatalog> {
        match &self.cloud {
            Some(adapter) => Some(adapter.catalog().await),
            None => None,
        }
    }

    /// The model catalog, if discovery has completed.
    pub fn catalog(&self) -> Option<&ModelCatalog> {
        self.cloud.as_ref().and_then(|adapter| adapter.cached_catalog())
    }

    /// Analyze a description. Never fails.
    pub async fn analyze(&self, description: &ArtifactDescription, mode: AnalysisMode) -> AnalysisResult {
        let image = description.image.as_ref().map(ImageSummary::from);

        let adapter = match (&self.cloud, mode) {
            (_, AnalysisMode::Offline) => {
                return self.fallback(description, CloudNotice::offline_requested(), image);
            }
            (None, AnalysisMode::Auto) => {
                let notice = CloudNotice::from_failure(
                    FailureKind::MissingCredential,
                    "GOOGLE_API_KEY is not set, so the offline heuristic summary is shown.",
                );
                return self.fallback(description, notice, image);
            }
            (Some(adapter), AnalysisMode::Auto) => adapter,
        };

        match adapter.analyze(description).await {
            Ok(report) => AnalysisResult::new(report.text, AnalysisSource::Cloud { model: report.model })
                .with_image(image),
            Err(failure) => {
                warn!(kind = ?failure.kind, error = %failure.error, "Falling back to heuristic analysis");
                let detail = if failure.attempted.is_empty() {
                    failure.error.to_string()
                } else {
                    format!("{} (tried: {})", failure.error, failure.attempted.join(", "))
                };
                self.fallback(description, CloudNotice::from_failure(failure.kind, detail), image)
            }
        }
    }

    fn fallback(
        &self,
        description: &ArtifactDescription,
        notice: CloudNotice,
        image: Option<ImageSummary>,
    ) -> AnalysisResult {
        let report = self.heuristic.analyze(description);
        AnalysisResult::new(report, AnalysisSource::Heuristic)
            .with_notice(notice)
            .with_image(image)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cloud::testing::StubGenerator;

    fn with_stub(stub: StubGenerator) -> (Arc<StubGenerator>, ArtifactAnalyzer) {
        let stub = Arc::new(stub);
        let analyzer = ArtifactAnalyzer::new(Some(CloudAdapter::new(stub.clone(), None)));
        (stub, analyzer)
    }

    #[tokio::test]
    async fn test_no_credential_returns_heuristic() {
        let analyzer = ArtifactAnalyzer::from_config(&Config::default());
        assert!(!analyzer.cloud_enabled());

        let result = analyzer
            .analyze(&ArtifactDescription::from_notes("Bronze spearhead"), AnalysisMode::Auto)
            .await;
        assert_eq!(result.source, AnalysisSource::Heuristic);
        assert!(!result.report.trim().is_empty());
        assert_eq!(result.notice.unwrap().kind, Some(FailureKind::MissingCredential));
    }

    #[tokio::test]
    async fn test_offline_mode_makes_no_cloud_call() {
        let (stub, analyzer) = with_stub(StubGenerator::new(&["gemini-2.5-flash"]).succeed("gemini-2.5-flash", "x"));
        let result = analyzer
            .analyze(&ArtifactDescription::from_notes("Clay lamp"), AnalysisMode::Offline)
            .await;
        assert_eq!(result.source, AnalysisSource::Heuristic);
        assert_eq!(result.notice.unwrap().kind, None);
        assert_eq!(stub.list_count(), 0);
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cloud_success() {
        let (_, analyzer) =
            with_stub(StubGenerator::new(&["gemini-2.5-flash"]).succeed("gemini-2.5-flash", "## Cloud report"));
        let result = analyzer
            .analyze(&ArtifactDescription::from_notes("Clay lamp"), AnalysisMode::Auto)
            .await;
        assert_eq!(result.source, AnalysisSource::Cloud { model: "gemini-2.5-flash".into() });
        assert_eq!(result.report, "## Cloud report");
        assert!(result.notice.is_none());
    }

    #[tokio::test]
    async fn test_cloud_failure_degrades_to_heuristic() {
        let (_, analyzer) = with_stub(
            StubGenerator::new(&["gemini-2.5-flash"]).fail("gemini-2.5-flash", 429, "Resource has been exhausted"),
        );
        let result = analyzer
            .analyze(&ArtifactDescription::from_notes(""), AnalysisMode::Auto)
            .await;
        assert_eq!(result.source, AnalysisSource::Heuristic);
        assert!(!result.report.trim().is_empty());

        let notice = result.notice.unwrap();
        assert_eq!(notice.kind, Some(FailureKind::RateLimited));
        assert!(notice.detail.contains("tried: gemini-2.5-flash"));
        assert!(!notice.hints.is_empty());
    }

    #[tokio::test]
    async fn test_warm_up_populates_catalog() {
        let (_, analyzer) = with_stub(StubGenerator::new(&["gemini-2.0-flash"]));
        assert!(analyzer.catalog().is_none());
        analyzer.warm_up().await;
        assert_eq!(analyzer.catalog().unwrap().selected, "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn test_heuristic_only_has_no_catalog() {
        let analyzer = ArtifactAnalyzer::heuristic_only();
        assert!(analyzer.warm_up().await.is_none());
        assert!(analyzer.catalog().is_none());
    }
}
