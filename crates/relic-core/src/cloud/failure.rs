//! Classification of cloud failures into user-facing troubleshooting hints.

use serde::{Deserialize, Serialize};

use crate::error::RelicError;

/// Why the cloud path did not produce a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    MissingCredential,
    ModelUnavailable,
    Authentication,
    RateLimited,
    Connectivity,
    Other,
}

impl FailureKind {
    /// Classify an error by status code first, then by message keywords.
    pub fn classify(error: &RelicError) -> Self {
        match error {
            RelicError::MissingCredential => Self::MissingCredential,
            RelicError::NoCompatibleModel => Self::ModelUnavailable,
            RelicError::Transport(_) => Self::Connectivity,
            RelicError::Api { status, message } => match status {
                401 | 403 => Self::Authentication,
                404 => Self::ModelUnavailable,
                429 => Self::RateLimited,
                _ => Self::from_message(message),
            },
            other => Self::from_message(&other.to_string()),
        }
    }

    fn from_message(message: &str) -> Self {
        let msg = message.to_lowercase();
        if msg.contains("not found") || msg.contains("not supported") {
            Self::ModelUnavailable
        } else if msg.contains("401")
            || msg.contains("permission")
            || msg.contains("unauthorized")
            || msg.contains("api key not valid")
            || msg.contains("invalid")
        {
            Self::Authentication
        } else if msg.contains("rate limit") || msg.contains("quota") || msg.contains("resource_exhausted") {
            Self::RateLimited
        } else {
            Self::Other
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingCredential => "Cloud analysis not configured",
            Self::ModelUnavailable => "No compatible Gemini model available",
            Self::Authentication => "Authentication error",
            Self::RateLimited => "Rate limit exceeded",
            Self::Connectivity => "Could not reach the Gemini API",
            Self::Other => "Cloud analysis failed",
        }
    }

    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            Self::MissingCredential => &[
                "Create a free API key at https://aistudio.google.com/app/apikey",
                "Add GOOGLE_API_KEY=<your key> to a .env file in the working directory",
                "Restart relic after updating the key",
            ],
            Self::ModelUnavailable => &[
                "Your API key has no access to a model that supports generateContent",
                "Run `relic diagnose` to list the models your key can use",
                "Set GEMINI_MODEL to one of the listed models",
            ],
            Self::Authentication => &[
                "Generate a new API key at https://aistudio.google.com/app/apikey",
                "Update GOOGLE_API_KEY in your .env file and remove stray spaces",
                "Restart relic after updating the key",
            ],
            Self::RateLimited => &[
                "Wait a few minutes before analyzing another artifact",
                "Upgrade your API plan for higher limits",
                "Check your usage at https://console.cloud.google.com",
            ],
            Self::Connectivity => &[
                "Check your internet connection or proxy settings",
                "Increase RELIC_CLOUD_TIMEOUT_SECS for large images",
            ],
            Self::Other => &[
                "Verify GOOGLE_API_KEY is correct",
                "Try again with a different or smaller image",
                "Ensure the image clearly shows the artifact",
            ],
        }
    }
}
