//! Route handlers.

pub mod api;
pub mod pages;
pub mod report;

use relic_core::{ArtifactDescription, ArtifactImage};

/// Attach uploaded image bytes, turning a rejected image into a warning.
pub(crate) fn attach_image(
    description: ArtifactDescription,
    bytes: Vec<u8>,
    file_name: Option<String>,
    warnings: &mut Vec<String>,
) -> ArtifactDescription {
    if bytes.is_empty() {
        return description;
    }
    match ArtifactImage::from_bytes(bytes, file_name) {
        Ok(image) => description.with_image(image),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring uploaded image");
            warnings.push(format!("The image could not be used ({}). The analysis continues with the notes only.", e));
            description
        }
    }
}
