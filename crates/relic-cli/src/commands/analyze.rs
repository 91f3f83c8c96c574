//! One-off analysis command.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use relic_core::{AnalysisMode, ArtifactAnalyzer, ArtifactDescription, ArtifactImage, Config};
use std::path::PathBuf;
use std::time::Duration;

use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Free-text notes about the artifact
    pub notes: Option<String>,

    /// Photograph of the artifact (JPEG or PNG)
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Skip the cloud request and use the offline heuristic
    #[arg(long)]
    pub offline: bool,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the markdown report to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn execute(args: AnalyzeArgs, config: Config) -> Result<()> {
    let mut description = ArtifactDescription::from_notes(args.notes.unwrap_or_default());

    if let Some(path) = &args.image {
        let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        match ArtifactImage::from_bytes(bytes, file_name) {
            Ok(image) => description = description.with_image(image),
            Err(e) => {
                eprintln!("{} {} ({}); continuing with notes only", "!".yellow(), path.display(), e);
            }
        }
    }

    if description.is_empty() {
        bail!("Nothing to analyze: pass notes and/or a readable --image <PATH>");
    }

    let mode = if args.offline { AnalysisMode::Offline } else { AnalysisMode::Auto };
    let analyzer = ArtifactAnalyzer::from_config(&config);

    let spinner = (!args.json && mode == AnalysisMode::Auto && analyzer.cloud_enabled()).then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Consulting Gemini...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let result = analyzer.analyze(&description, mode).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if let Some(path) = &args.output {
        std::fs::write(path, &result.report).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::print_result(&result);
        if let Some(path) = &args.output {
            println!();
            println!("{} Report written to {}", "✓".green().bold(), path.display());
        }
    }

    Ok(())
}
