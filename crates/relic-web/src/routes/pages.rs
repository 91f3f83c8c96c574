//! HTML form and result pages.

use askama::Template;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use relic_core::{AnalysisMode, AnalysisResult, ArtifactDescription, CloudNotice, ImageSummary};

use super::attach_image;
use crate::markdown;
use crate::state::{AppState, CloudStatus};

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    status: CloudStatus,
    max_upload_mb: usize,
}

#[derive(Template)]
#[template(path = "result.html")]
struct ResultTemplate {
    status: CloudStatus,
    source_label: String,
    is_cloud: bool,
    notice: Option<NoticeView>,
    image: Option<ImageSummary>,
    warnings: Vec<String>,
    report_html: String,
    report_markdown: String,
    generated_at: String,
    download_name: &'static str,
}

/// View model for a cloud notice.
struct NoticeView {
    title: String,
    detail: String,
    hints: Vec<String>,
    tone: &'static str,
}

impl NoticeView {
    fn from_notice(notice: &CloudNotice) -> Self {
        Self {
            title: notice.title.clone(),
            detail: notice.detail.clone(),
            hints: notice.hints.clone(),
            tone: if notice.kind.is_some() { "warning" } else { "info" },
        }
    }
}

impl ResultTemplate {
    fn new(status: CloudStatus, result: AnalysisResult, warnings: Vec<String>) -> Self {
        Self {
            status,
            source_label: result.source.label(),
            is_cloud: result.source.is_cloud(),
            notice: result.notice.as_ref().map(NoticeView::from_notice),
            image: result.image.clone(),
            warnings,
            report_html: markdown::to_html(&result.report),
            generated_at: result.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            download_name: result.download_name(),
            report_markdown: result.report,
        }
    }
}

fn render(template: impl Template) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("Template error: {}", e))).into_response(),
    }
}

// ============================================================
// HANDLERS
// ============================================================

/// GET / - Render the submission form.
pub async fn index(State(state): State<AppState>) -> Response {
    render(IndexTemplate {
        status: state.status(),
        max_upload_mb: state.config.max_upload_bytes / (1024 * 1024),
    })
}

/// POST /analyze - Analyze a submitted artifact and render the report.
pub async fn analyze(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut description = ArtifactDescription::default();
    let mut mode = AnalysisMode::Auto;
    let mut warnings = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return (e.status(), format!("Invalid form data: {}", e.body_text())).into_response(),
        };

        let key = field.name().unwrap_or("").to_string();
        match key.as_str() {
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => return (e.status(), format!("Failed to read image: {}", e.body_text())).into_response(),
                };
                description = attach_image(description, bytes.to_vec(), file_name, &mut warnings);
            }
            "notes" => match field.text().await {
                Ok(text) => description.notes = text,
                Err(e) => return (e.status(), format!("Failed to read notes: {}", e.body_text())).into_response(),
            },
            "offline" => mode = AnalysisMode::Offline,
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    let result = state.analyzer.analyze(&description, mode).await;
    tracing::info!(id = %result.id, source = %result.source.label(), "Analysis complete");

    render(ResultTemplate::new(state.status(), result, warnings))
}
