//! CLI output formatting

use crate::export::{ExportEvent, ExportSummary, UcConversion};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");
pub static TRASH: Emoji<'_, '_> = Emoji("🗑️  ", "- ");

/// Create a progress bar; its length grows as listings come in
pub fn create_progress_bar() -> ProgressBar {
    let progress = ProgressBar::new(0);
    let bar_style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    progress.set_style(bar_style);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Format an export event for display
pub fn format_export_event(event: &ExportEvent) -> String {
    match event {
        ExportEvent::RunStarted { run_id } => format!(
            "{} Starting export ({})",
            ROCKET,
            style(&run_id.to_string()[..8]).dim()
        ),
        ExportEvent::DirectoryCleared { path, removed } => format!(
            "{} Cleared {} files from {}",
            TRASH,
            style(removed).cyan(),
            style(path.display()).dim()
        ),
        ExportEvent::PipelinesListed { count } => {
            format!("{} Found {} pipelines", INFO, style(count).cyan())
        }
        ExportEvent::PipelineExported {
            name,
            key,
            conversion,
            ..
        } => {
            let note = match conversion {
                UcConversion::Converted { catalog } => format!(" (catalog {})", style(catalog).dim()),
                UcConversion::Unmatched { .. } => {
                    format!(" {}", style("(no catalog mapping)").yellow())
                }
                UcConversion::NotRequested | UcConversion::NoStorage => String::new(),
            };
            format!(
                "{} {} → {}{}",
                CHECK,
                style(name).bold(),
                style(key).green(),
                note
            )
        }
        ExportEvent::JobsListed { count } => {
            format!("{} Found {} jobs", INFO, style(count).cyan())
        }
        ExportEvent::JobExported {
            name,
            key,
            references_rewritten,
            ..
        } => {
            let note = if *references_rewritten > 0 {
                format!(" ({} pipeline references)", style(references_rewritten).dim())
            } else {
                String::new()
            };
            format!(
                "{} {} → {}{}",
                CHECK,
                style(name).bold(),
                style(key).green(),
                note
            )
        }
        ExportEvent::RunCompleted { run_id } => format!(
            "{} Export ({}) {}",
            INFO,
            style(&run_id.to_string()[..8]).dim(),
            style("completed").green()
        ),
    }
}

/// Format the final export summary for display
pub fn format_summary(summary: &ExportSummary) -> String {
    let mut text = format!(
        "{} Exported {} pipelines and {} jobs ({} pipeline references rewritten)",
        CHECK,
        style(summary.pipelines_exported).cyan(),
        style(summary.jobs_exported).cyan(),
        style(summary.references_rewritten).cyan()
    );
    if !summary.unmatched_storage.is_empty() {
        text.push_str(&format!(
            "\n{} No catalog mapping for: {}",
            WARN,
            style(summary.unmatched_storage.join(", ")).yellow()
        ));
    }
    text
}

/// Format the result of a deletion by suffix
pub fn format_deleted(kind: &str, names: &[String], dry_run: bool) -> String {
    if names.is_empty() {
        return format!("{} No {} matched", INFO, kind);
    }

    let verb = if dry_run { "Would delete" } else { "Deleted" };
    let mut text = format!("{} {} {} {}:", TRASH, verb, style(names.len()).cyan(), kind);
    for name in names {
        text.push_str(&format!("\n  {}", style(name).bold()));
    }
    text
}
