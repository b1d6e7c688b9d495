mod cli;
mod core;
mod export;
mod maintenance;
mod workspace;

use anyhow::{Context, Result};
use cli::commands::{CleanDemoCommand, DeleteCommand, ExportCommand};
use cli::output::{
    create_progress_bar, format_deleted, format_export_event, format_summary, style, CHECK, CROSS, INFO,
};
use cli::{Cli, Command};
use crate::core::config::{ExporterConfig, DEFAULT_CONFIG_FILE};
use export::{ExportEvent, Exporter};
use std::path::Path;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;
use workspace::{CredentialOverrides, RestWorkspaceClient, WorkspaceClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let config = load_config(&cli)?;

    let result = match &cli.command {
        Command::Export(cmd) => run_export(cmd, &cli, config).await,
        Command::DeleteJobs(cmd) => delete_jobs(cmd, &cli, &config).await,
        Command::DeletePipelines(cmd) => delete_pipelines(cmd, &cli, &config).await,
        Command::CleanDemo(cmd) => clean_demo(cmd, &config),
    };

    if let Err(e) = result {
        println!("{} {}", CROSS, style("failed").red());
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Load the configuration file named on the command line, or the default
/// one if it exists
fn load_config(cli: &Cli) -> Result<ExporterConfig> {
    match &cli.config {
        Some(path) => ExporterConfig::from_file(path)
            .with_context(|| format!("Failed to load exporter config {}", path)),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => ExporterConfig::from_file(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("Failed to load exporter config {}", DEFAULT_CONFIG_FILE)),
        None => Ok(ExporterConfig::default()),
    }
}

fn connect(cli: &Cli, config: &ExporterConfig) -> Result<RestWorkspaceClient> {
    let overrides = CredentialOverrides {
        host: cli.host.clone(),
        token: cli.token.clone(),
        profile: cli.profile.clone(),
    };
    let client_config = WorkspaceClientConfig::resolve(&config.workspace, &overrides)?;
    println!("{} Workspace: {}", INFO, style(&client_config.host).bold());

    RestWorkspaceClient::new(&client_config).context("Failed to create workspace client")
}

async fn run_export(cmd: &ExportCommand, cli: &Cli, mut config: ExporterConfig) -> Result<()> {
    if cmd.full_resync {
        config.output.full_resync = true;
    }
    let workspace = connect(cli, &config)?;
    let mut exporter = Exporter::new(workspace, config);

    // Progress bar for console output
    let progress = if cmd.json { None } else { Some(create_progress_bar()) };
    if let Some(progress) = progress.clone() {
        exporter.add_event_handler(move |event| {
            match &event {
                ExportEvent::PipelinesListed { count } | ExportEvent::JobsListed { count } => {
                    progress.inc_length(*count as u64)
                }
                ExportEvent::PipelineExported { .. } | ExportEvent::JobExported { .. } => progress.inc(1),
                _ => {}
            }
            progress.println(format_export_event(&event));
        });
    }

    let result = exporter.export(cmd.scope()).await;
    if let Some(progress) = &progress {
        progress.finish_and_clear();
    }
    let summary = result.context("Export failed")?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", format_summary(&summary));
    }

    Ok(())
}

async fn delete_jobs(cmd: &DeleteCommand, cli: &Cli, config: &ExporterConfig) -> Result<()> {
    let workspace = connect(cli, config)?;
    let suffix = cmd.suffix.as_deref().unwrap_or(&config.suffix);

    let deleted = maintenance::delete_jobs(&workspace, suffix, cmd.dry_run)
        .await
        .context("Failed to delete jobs")?;
    println!("{}", format_deleted("jobs", &deleted, cmd.dry_run));
    Ok(())
}

async fn delete_pipelines(cmd: &DeleteCommand, cli: &Cli, config: &ExporterConfig) -> Result<()> {
    let workspace = connect(cli, config)?;
    let suffix = cmd.suffix.as_deref().unwrap_or(&config.suffix);

    let deleted = maintenance::delete_pipelines(&workspace, suffix, cmd.dry_run)
        .await
        .context("Failed to delete pipelines")?;
    println!("{}", format_deleted("pipelines", &deleted, cmd.dry_run));
    Ok(())
}

fn clean_demo(cmd: &CleanDemoCommand, config: &ExporterConfig) -> Result<()> {
    let cleanup = maintenance::clean_demo(&config.output, &cmd.keep_pipeline, &cmd.keep_job)
        .context("Demo cleanup failed")?;
    println!(
        "{} Removed {} pipeline files and {} job files",
        CHECK,
        style(cleanup.pipeline_files.len()).cyan(),
        style(cleanup.job_files.len()).cyan()
    );
    Ok(())
}
