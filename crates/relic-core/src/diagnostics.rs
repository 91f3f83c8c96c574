//! Manual introspection of the models visible to the configured key.

use serde::Serialize;

use crate::cloud::{catalog::select_model, GeminiClient, ModelInfo, TextGenerator};
use crate::config::Config;

/// One listed model.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelEntry {
    pub name: String,
    pub generate_content: bool,
}

/// Outcome of a diagnostic run. Unavailability is a report, not an error.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiagnosticReport {
    Available {
        models: Vec<ModelEntry>,
        selected: String,
    },
    Unavailable {
        message: String,
    },
}

impl DiagnosticReport {
    /// Build a report from a listing, sorted by name.
    pub fn from_models(models: Vec<ModelInfo>, override_model: Option<&str>) -> Self {
        let mut entries: Vec<ModelEntry> = models
            .into_iter()
            .map(|m| ModelEntry {
                name: m.name,
                generate_content: m.supports_generate_content,
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries.dedup_by(|a, b| a.name == b.name);

        let generators: Vec<String> = entries
            .iter()
            .filter(|e| e.generate_content)
            .map(|e| e.name.clone())
            .collect();
        let selected = select_model(&generators, override_model);

        Self::Available { models: entries, selected }
    }
}

/// List models through any generator.
pub async fn diagnose_with(generator: &dyn TextGenerator, override_model: Option<&str>) -> DiagnosticReport {
    match generator.list_models().await {
        Ok(models) => DiagnosticReport::from_models(models, override_model),
        Err(e) => DiagnosticReport::Unavailable {
            message: format!("Could not list models: {}", e),
        },
    }
}

/// List models for the configured key.
pub async fn diagnose(config: &Config) -> DiagnosticReport {
    match GeminiClient::from_config(config) {
        Ok(client) => diagnose_with(&client, config.model.as_deref()).await,
        Err(e) => DiagnosticReport::Unavailable {
            message: format!("{}. Set it in the environment or a .env file to enable cloud analysis.", e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::testing::StubGenerator;

    #[tokio::test]
    async fn test_missing_key_yields_message() {
        match diagnose(&Config::default()).await {
            DiagnosticReport::Unavailable { message } => assert!(message.contains("GOOGLE_API_KEY")),
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_listing_error_yields_message() {
        let stub = StubGenerator::new(&[]).listing_fails(401);
        match diagnose_with(&stub, None).await {
            DiagnosticReport::Unavailable { message } => assert!(message.contains("HTTP 401")),
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_models_are_sorted() {
        let stub = StubGenerator::new(&["gemini-2.5-pro", "gemini-2.0-flash", "aqa"]);
        match diagnose_with(&stub, None).await {
            DiagnosticReport::Available { models, selected } => {
                let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
                assert_eq!(names, vec!["aqa", "gemini-2.0-flash", "gemini-2.5-pro"]);
                assert_eq!(selected, "gemini-2.0-flash");
            }
            other => panic!("expected available, got {other:?}"),
        }
    }
}
