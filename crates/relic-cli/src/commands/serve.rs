//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use relic_core::Config;
use std::path::PathBuf;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (default: RELIC_PORT or 8503)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (default: RELIC_HOST or 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (default: .relic/serve.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    let engine = if config.has_credential() {
        format!("Gemini ({})", config.model.as_deref().unwrap_or("auto-selected")).green()
    } else {
        "offline heuristic only".yellow()
    };

    println!();
    println!("  {} {}", "Relic".cyan().bold(), "Historical Artifact Analyzer".bold());
    println!();
    println!("  {}  http://{}:{}", "Web app".green(), config.host, config.port);
    println!("  {}      http://{}:{}/api", "API".green(), config.host, config.port);
    println!("  {}   {}", "Engine".green(), engine);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    relic_web::run_server(config).await?;

    Ok(())
}
