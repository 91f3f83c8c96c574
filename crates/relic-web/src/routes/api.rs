//! JSON API handlers.

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use relic_core::{AnalysisMode, AnalysisResult, ArtifactDescription};
use serde::{Deserialize, Serialize};

use super::attach_image;
use crate::state::{AppState, CloudStatus};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub notes: String,
    /// Plain base64 or a `data:` URL.
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub offline: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// POST /api/analyze
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    let mut warnings = Vec::new();
    let mut description = ArtifactDescription::from_notes(req.notes);

    if let Some(encoded) = req.image_base64.as_deref().map(strip_data_url).filter(|s| !s.is_empty()) {
        match STANDARD.decode(encoded) {
            Ok(bytes) => description = attach_image(description, bytes, None, &mut warnings),
            Err(e) => warnings.push(format!(
                "image_base64 is not valid base64 ({}). The analysis continues with the notes only.",
                e
            )),
        }
    }

    let mode = if req.offline { AnalysisMode::Offline } else { AnalysisMode::Auto };
    let result = state.analyzer.analyze(&description, mode).await;
    tracing::info!(id = %result.id, source = %result.source.label(), "API analysis complete");

    Json(AnalyzeResponse { result, warnings })
}

/// GET /api/status
pub async fn status(State(state): State<AppState>) -> Json<CloudStatus> {
    Json(state.status())
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

fn strip_data_url(value: &str) -> &str {
    let value = value.trim();
    match value.split_once(',') {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => value,
    }
}
