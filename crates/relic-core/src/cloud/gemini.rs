//! Gemini (Generative Language API) client.
//!
//! Lists models and calls `generateContent` with a text prompt and an
//! optional inline image.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerationRequest, ModelInfo, TextGenerator};
use crate::config::Config;
use crate::error::{RelicError, RelicResult};

/// Cap on `models.list` pages followed during discovery.
const MAX_LIST_PAGES: usize = 10;
const LIST_PAGE_SIZE: u32 = 100;

/// Client for the Generative Language REST API.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<RemoteModel>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteModel {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    status: Option<String>,
}

impl GeminiClient {
    /// Create a client against `base_url` (no trailing slash needed).
    pub fn new(api_key: &str, base_url: &str, timeout: std::time::Duration) -> RelicResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build a client from config. Fails when no key is configured.
    pub fn from_config(config: &Config) -> RelicResult<Self> {
        let key = config.api_key.as_deref().ok_or(RelicError::MissingCredential)?;
        Self::new(key, &config.api_base, config.cloud_timeout)
    }

    async fn list_page(&self, page_token: Option<&str>) -> RelicResult<ListModelsResponse> {
        let mut request = self
            .client
            .get(format!("{}/v1beta/models", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .query(&[("pageSize", LIST_PAGE_SIZE.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn list_models(&self) -> RelicResult<Vec<ModelInfo>> {
        let mut models = Vec::new();
        let mut token: Option<String> = None;

        for _ in 0..MAX_LIST_PAGES {
            let page = self.list_page(token.as_deref()).await?;
            models.extend(page.models.into_iter().map(|m| ModelInfo {
                name: strip_model_prefix(&m.name).to_string(),
                supports_generate_content: m
                    .supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent"),
            }));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        debug!(count = models.len(), "Listed Gemini models");
        Ok(models)
    }

    async fn generate(&self, model: &str, request: &GenerationRequest) -> RelicResult<String> {
        let mut parts = vec![Part::Text { text: request.prompt.clone() }];
        if let Some(image) = &request.image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: base64::engine::general_purpose::STANDARD.encode(&image.bytes),
                },
            });
        }

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
        };

        debug!(model, has_image = request.image.is_some(), "Calling Gemini generateContent");
        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url,
                strip_model_prefix(model)
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &text));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(RelicError::EmptyResponse { model: model.to_string() });
        }
        Ok(text)
    }
}

/// `models/gemini-2.5-flash` -> `gemini-2.5-flash`.
pub fn strip_model_prefix(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Build an API error from a status code and the raw response body.
fn api_error(status: u16, body: &str) -> RelicError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{} ({})", envelope.error.message, code),
            None => envelope.error.message,
        },
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    };
    RelicError::Api { status, message }
}
