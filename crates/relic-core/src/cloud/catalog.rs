//! Model discovery results and selection.

use serde::Serialize;

use super::ModelInfo;

/// Preferred models, best first.
pub const PREFERRED_MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.0-flash", "gemini-2.5-pro"];

/// Model used when nothing else can be determined.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Models that support `generateContent`, plus the one selected for use.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelCatalog {
    pub available: Vec<String>,
    pub selected: String,

    /// False when discovery failed and the fallback list is in use.
    pub detected: bool,

    /// True when the selected model came from `GEMINI_MODEL`.
    #[serde(skip)]
    pub pinned: bool,
}

impl ModelCatalog {
    /// Build a catalog from a successful listing.
    pub fn from_listing(models: &[ModelInfo], override_model: Option<&str>) -> Self {
        let available: Vec<String> = models
            .iter()
            .filter(|m| m.supports_generate_content)
            .map(|m| m.name.clone())
            .collect();

        let selected = select_model(&available, override_model);
        Self { available, selected, detected: true, pinned: override_model.is_some() }
    }

    /// Catalog used when model listing is unavailable.
    pub fn fallback(override_model: Option<&str>) -> Self {
        let available: Vec<String> = PREFERRED_MODELS.iter().map(|m| m.to_string()).collect();
        let selected = select_model(&available, override_model);
        Self { available, selected, detected: false, pinned: override_model.is_some() }
    }

    /// Models to try, selected first, then the rest in catalog order.
    pub fn attempt_order(&self) -> Vec<String> {
        let mut order = vec![self.selected.clone()];
        order.extend(self.available.iter().filter(|m| **m != self.selected).cloned());
        order
    }

    /// Discovery succeeded, no model can generate text and none was pinned.
    pub fn is_incompatible(&self) -> bool {
        self.detected && self.available.is_empty() && !self.pinned
    }
}

/// Pick the model to use: explicit override, then the preference order,
/// then the first available model, then the default.
pub fn select_model(available: &[String], override_model: Option<&str>) -> String {
    if let Some(model) = override_model {
        return model.to_string();
    }
    PREFERRED_MODELS
        .iter()
        .find(|preferred| available.iter().any(|m| m == *preferred))
        .map(|m| m.to_string())
        .or_else(|| available.first().cloned())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}
