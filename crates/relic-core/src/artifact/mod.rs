//! Artifact descriptions and uploaded images.

pub mod image;
pub mod model;

pub use image::{ImageFormat, ImageInfo};
pub use model::{ArtifactDescription, ArtifactImage, ImageSummary};
