//! Relic Core Library
//!
//! Historical artifact analysis: an offline heuristic summarizer and an
//! optional Gemini-backed cloud adapter that falls back to it.

pub mod analysis;
pub mod artifact;
pub mod cloud;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod heuristic;

pub use analysis::{
    AnalysisMode, AnalysisResult, AnalysisSource, ArtifactAnalyzer, CloudNotice, REPORT_FILE_NAME,
};
pub use artifact::{ArtifactDescription, ArtifactImage, ImageSummary};
pub use config::Config;
pub use error::{RelicError, RelicResult};
