//! Analysis result models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::artifact::ImageSummary;
use crate::cloud::FailureKind;

/// File name offered when a report is downloaded.
pub const REPORT_FILE_NAME: &str = "artifact_report.md";

/// Which path produced the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisSource {
    Heuristic,
    Cloud { model: String },
}

impl AnalysisSource {
    pub fn label(&self) -> String {
        match self {
            Self::Heuristic => "Offline heuristic".to_string(),
            Self::Cloud { model } => format!("Gemini ({})", model),
        }
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self, Self::Cloud { .. })
    }
}

/// Explanation shown when the cloud path was not used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudNotice {
    /// `None` when the user asked for an offline analysis.
    pub kind: Option<FailureKind>,
    pub title: String,
    pub detail: String,
    pub hints: Vec<String>,
}

impl CloudNotice {
    pub fn offline_requested() -> Self {
        Self {
            kind: None,
            title: "Offline analysis requested".to_string(),
            detail: "The cloud analysis was skipped at your request.".to_string(),
            hints: Vec::new(),
        }
    }

    pub fn from_failure(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            title: kind.title().to_string(),
            detail: detail.into(),
            hints: kind.hints().iter().map(|h| h.to_string()).collect(),
        }
    }
}

/// The outcome of one analysis. Always carries a non-empty report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub report: String,
    pub source: AnalysisSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<CloudNotice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSummary>,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(report: String, source: AnalysisSource) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            report,
            source,
            notice: None,
            image: None,
            generated_at: Utc::now(),
        }
    }

    pub fn with_notice(mut self, notice: CloudNotice) -> Self {
        self.notice = Some(notice);
        self
    }

    pub fn with_image(mut self, image: Option<ImageSummary>) -> Self {
        self.image = image;
        self
    }

    pub fn download_name(&self) -> &'static str {
        REPORT_FILE_NAME
    }
}
