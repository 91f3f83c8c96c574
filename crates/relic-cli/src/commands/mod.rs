//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relic_core::Config;
use std::path::PathBuf;

pub mod analyze;
pub mod diagnose;
pub mod serve;

/// Relic - Historical Artifact Analyzer
#[derive(Parser)]
#[command(name = "relic")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding `.env` and `relic.toml` (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web application
    Serve(serve::ServeArgs),

    /// Analyze an artifact from the terminal
    Analyze(analyze::AnalyzeArgs),

    /// List the Gemini models visible to the configured key
    Diagnose(diagnose::DiagnoseArgs),
}

impl Cli {
    pub fn project_dir(&self) -> Result<PathBuf> {
        match &self.project {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("Failed to determine the current directory"),
        }
    }

    pub async fn execute(self) -> Result<()> {
        let project_dir = self.project_dir()?;
        let config = Config::load(&project_dir)
            .with_context(|| format!("Failed to load configuration from {}", project_dir.display()))?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Analyze(args) => analyze::execute(args, config).await,
            Commands::Diagnose(args) => diagnose::execute(args, config).await,
        }
    }
}
