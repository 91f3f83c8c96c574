//! Report download.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use relic_core::REPORT_FILE_NAME;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct DownloadForm {
    #[serde(default)]
    pub report: String,
}

/// POST /report/download - Return the report as a markdown attachment.
pub async fn download(Form(form): Form<DownloadForm>) -> Response {
    if form.report.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Report is empty".to_string()).into_response();
    }

    (
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILE_NAME),
            ),
        ],
        form.report,
    )
        .into_response()
}
