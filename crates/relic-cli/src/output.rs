//! Terminal output formatting.

use colored::Colorize;
use relic_core::diagnostics::DiagnosticReport;
use relic_core::{AnalysisResult, CloudNotice};

/// Print an analysis result: header, notice, then the markdown report.
pub fn print_result(result: &AnalysisResult) {
    let source = if result.source.is_cloud() {
        result.source.label().green()
    } else {
        result.source.label().yellow()
    };

    println!("{} {}", "Source".bold(), source);
    if let Some(image) = &result.image {
        println!(
            "{} {} {}×{}{}",
            "Image".bold(),
            image.format,
            image.width,
            image.height,
            image
                .file_name
                .as_deref()
                .map(|n| format!(" ({})", n))
                .unwrap_or_default()
                .dimmed()
        );
    }
    println!("{}", result.generated_at.format("%Y-%m-%d %H:%M UTC").to_string().dimmed());

    if let Some(notice) = &result.notice {
        println!();
        print_notice(notice);
    }

    println!();
    println!("{}", "─".repeat(60).dimmed());
    println!();
    println!("{}", result.report);
}

/// Print why the cloud path was not used.
pub fn print_notice(notice: &CloudNotice) {
    let marker = if notice.kind.is_some() { "!".yellow().bold() } else { "ℹ".blue().bold() };
    println!("{} {}", marker, notice.title.bold());
    println!("  {}", notice.detail);
    for hint in &notice.hints {
        println!("  {} {}", "→".dimmed(), hint);
    }
}

/// Print a model diagnostic report.
pub fn print_diagnostic(report: &DiagnosticReport) {
    match report {
        DiagnosticReport::Available { models, selected } => {
            if models.is_empty() {
                println!("{}", "No models are visible to this key.".dimmed());
                return;
            }

            println!("{}", "Available models".bold());
            println!("{}", "─".repeat(60));
            for model in models {
                if model.generate_content {
                    let marker = if &model.name == selected { "★".yellow().bold() } else { "✓".green().bold() };
                    println!("  {} {}", marker, model.name);
                } else {
                    println!("  {} {}", " ".normal(), model.name.dimmed());
                }
            }
            println!();
            println!("{} generateContent supported   {} selected", "✓".green().bold(), "★".yellow().bold());
            println!("{}: {}", "Selected model".bold(), selected.cyan());
        }
        DiagnosticReport::Unavailable { message } => {
            println!("{} {}", "!".yellow(), message);
        }
    }
}
