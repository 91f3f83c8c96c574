//! Relic CLI - Historical Artifact Analyzer
//!
//! Serves the analysis web app and runs one-off analyses from the terminal.

use std::ffi::OsStr;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

mod commands;
mod output;

use commands::{Cli, Commands};

/// Initialize tracing with optional file logging.
///
/// Only `serve` logs to stdout; other commands log to stderr so their
/// stdout stays clean for reports and JSON. The returned guard must be held
/// until exit for file output to be flushed.
fn init_tracing(log_file: Option<&Path>, to_stdout: bool) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "relic=info,relic_web=debug,relic_core=info".into());

    let console = if to_stdout {
        tracing_subscriber::fmt::layer().boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stderr).boxed()
    };

    match log_file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let _ = std::fs::create_dir_all(dir);
            let file_name = path.file_name().unwrap_or(OsStr::new("serve.log"));

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            // Log to both the console and the file when --log is used
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(env_filter).with(console).init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log => {
            let project_dir = cli.project_dir()?;
            Some(
                args.log_file
                    .clone()
                    .unwrap_or_else(|| project_dir.join(".relic/serve.log")),
            )
        }
        _ => None,
    };

    let serving = matches!(&cli.command, Commands::Serve(_));
    let _guard = init_tracing(log_file.as_deref(), serving);

    cli.execute().await
}
