//! Cloud analysis adapter.
//!
//! Wraps a [`TextGenerator`] (the Gemini client in production) with model
//! discovery, model selection and per-model retries. Every failure is
//! returned as a classified [`CloudFailure`] so the caller can fall back to
//! the offline analyzer.

pub mod catalog;
pub mod failure;
pub mod gemini;
pub mod prompt;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::artifact::ArtifactDescription;
use crate::config::Config;
use crate::error::{RelicError, RelicResult};

pub use catalog::ModelCatalog;
pub use failure::FailureKind;
pub use gemini::GeminiClient;

/// A model exposed by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub name: String,
    pub supports_generate_content: bool,
}

/// Image bytes sent alongside the prompt.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// One generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: Option<InlineImage>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), image: None }
    }

    pub fn for_description(description: &ArtifactDescription) -> Self {
        Self {
            prompt: prompt::build_prompt(description),
            image: description.image.as_ref().map(|image| InlineImage {
                mime_type: image.media_type().to_string(),
                bytes: image.bytes.clone(),
            }),
        }
    }
}

/// External text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// List every model the credential can see.
    async fn list_models(&self) -> RelicResult<Vec<ModelInfo>>;

    /// Generate text with the named model.
    async fn generate(&self, model: &str, request: &GenerationRequest) -> RelicResult<String>;
}

/// Successful cloud analysis.
#[derive(Debug, Clone)]
pub struct CloudReport {
    pub model: String,
    pub text: String,
}

/// Failed cloud analysis, with the models that were tried.
#[derive(Debug)]
pub struct CloudFailure {
    pub kind: FailureKind,
    pub error: RelicError,
    pub attempted: Vec<String>,
}

impl CloudFailure {
    fn new(error: RelicError, attempted: Vec<String>) -> Self {
        Self {
            kind: FailureKind::classify(&error),
            error,
            attempted,
        }
    }
}

/// Model discovery plus fail-soft generation.
pub struct CloudAdapter {
    generator: Arc<dyn TextGenerator>,
    model_override: Option<String>,
    catalog: OnceCell<ModelCatalog>,
    fallback: ModelCatalog,
    discovery_failed: AtomicBool,
}

impl CloudAdapter {
    pub fn new(generator: Arc<dyn TextGenerator>, model_override: Option<String>) -> Self {
        let fallback = ModelCatalog::fallback(model_override.as_deref());
        Self {
            generator,
            model_override,
            catalog: OnceCell::new(),
            fallback,
            discovery_failed: AtomicBool::new(false),
        }
    }

    /// Build the Gemini-backed adapter. Fails when no key is configured.
    pub fn from_config(config: &Config) -> RelicResult<Self> {
        let client = GeminiClient::from_config(config)?;
        Ok(Self::new(Arc::new(client), config.model.clone()))
    }

    /// Discover models. Only a successful listing is cached; after a failed
    /// one the fallback catalog is returned and the next call lists again.
    pub async fn catalog(&self) -> &ModelCatalog {
        let discovered = self
            .catalog
            .get_or_try_init(|| async {
                let models = self.generator.list_models().await?;
                let catalog = ModelCatalog::from_listing(&models, self.model_override.as_deref());
                info!(
                    available = catalog.available.len(),
                    selected = %catalog.selected,
                    "Discovered Gemini models"
                );
                Ok::<_, RelicError>(catalog)
            })
            .await;

        match discovered {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "Model discovery failed, using fallback model list");
                self.discovery_failed.store(true, Ordering::Relaxed);
                &self.fallback
            }
        }
    }

    /// The catalog if discovery has already run.
    pub fn cached_catalog(&self) -> Option<&ModelCatalog> {
        self.catalog
            .get()
            .or_else(|| self.discovery_failed.load(Ordering::Relaxed).then_some(&self.fallback))
    }

    /// Try the selected model, then the rest of the catalog.
    pub async fn analyze(&self, description: &ArtifactDescription) -> Result<CloudReport, CloudFailure> {
        let catalog = self.catalog().await;
        if catalog.is_incompatible() {
            return Err(CloudFailure::new(RelicError::NoCompatibleModel, Vec::new()));
        }

        let request = GenerationRequest::for_description(description);
        let mut attempted = Vec::new();
        let mut last_error = RelicError::NoCompatibleModel;

        for model in catalog.attempt_order() {
            attempted.push(model.clone());
            debug!(model = %model, "Attempting cloud analysis");

            match self.generator.generate(&model, &request).await {
                Ok(text) => {
                    info!(model = %model, chars = text.len(), "Cloud analysis complete");
                    return Ok(CloudReport { model, text });
                }
                Err(e) => {
                    let kind = FailureKind::classify(&e);
                    warn!(model = %model, ?kind, error = %e, "Cloud analysis attempt failed");
                    last_error = e;
                    // Credential, quota and network problems are not model specific.
                    if !matches!(kind, FailureKind::ModelUnavailable | FailureKind::Other) {
                        break;
                    }
                }
            }
        }

        Err(CloudFailure::new(last_error, attempted))
    }
}
