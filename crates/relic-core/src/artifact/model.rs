//! Artifact input model.

use serde::{Deserialize, Serialize};

use super::image::ImageInfo;
use crate::error::RelicResult;

/// An uploaded photograph of the artifact.
#[derive(Debug, Clone)]
pub struct ArtifactImage {
    pub bytes: Vec<u8>,
    pub info: ImageInfo,
    pub file_name: Option<String>,
}

impl ArtifactImage {
    /// Validate raw bytes and capture the image metadata.
    pub fn from_bytes(bytes: Vec<u8>, file_name: Option<String>) -> RelicResult<Self> {
        let info = ImageInfo::inspect(&bytes)?;
        Ok(Self { bytes, info, file_name })
    }

    pub fn media_type(&self) -> &'static str {
        self.info.format.media_type()
    }
}

/// User-supplied description of a historical artifact.
#[derive(Debug, Clone, Default)]
pub struct ArtifactDescription {
    pub notes: String,
    pub image: Option<ArtifactImage>,
}

impl ArtifactDescription {
    pub fn from_notes(notes: impl Into<String>) -> Self {
        Self {
            notes: notes.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ArtifactImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Notes with surrounding whitespace removed; empty when blank.
    pub fn trimmed_notes(&self) -> &str {
        self.notes.trim()
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed_notes().is_empty() && self.image.is_none()
    }

    pub fn image_info(&self) -> Option<ImageInfo> {
        self.image.as_ref().map(|i| i.info)
    }
}

/// Serializable summary of the image that was analyzed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageSummary {
    pub format: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl From<&ArtifactImage> for ImageSummary {
    fn from(image: &ArtifactImage) -> Self {
        Self {
            format: image.info.format.label().to_string(),
            width: image.info.width,
            height: image.info.height,
            file_name: image.file_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::image::fixtures::png_header;

    #[test]
    fn test_blank_notes_without_image_is_empty() {
        assert!(ArtifactDescription::default().is_empty());
        assert!(ArtifactDescription::from_notes("  \n\t ").is_empty());
        assert!(!ArtifactDescription::from_notes("bronze fibula").is_empty());
    }

    #[test]
    fn test_image_alone_is_not_empty() {
        let image = ArtifactImage::from_bytes(png_header(10, 10), Some("a.png".into())).unwrap();
        let description = ArtifactDescription::default().with_image(image);
        assert!(!description.is_empty());

        let summary = ImageSummary::from(description.image.as_ref().unwrap());
        assert_eq!(summary.format, "PNG");
        assert_eq!(summary.file_name.as_deref(), Some("a.png"));
    }
}
