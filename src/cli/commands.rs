//! CLI command definitions

use crate::export::ExportScope;
use crate::maintenance::{DEMO_JOB_FILE, DEMO_PIPELINE_FILE};
use clap::builder::NonEmptyStringValueParser;
use clap::Args;

/// Export pipelines and jobs
#[derive(Debug, Args, Clone)]
pub struct ExportCommand {
    /// Only export pipelines
    #[arg(long, conflicts_with = "jobs_only")]
    pub pipelines_only: bool,

    /// Only export jobs (pipeline ids are not rewritten)
    #[arg(long)]
    pub jobs_only: bool,

    /// Clear the output directories before exporting
    #[arg(long)]
    pub full_resync: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExportCommand {
    pub fn scope(&self) -> ExportScope {
        if self.pipelines_only {
            ExportScope::PipelinesOnly
        } else if self.jobs_only {
            ExportScope::JobsOnly
        } else {
            ExportScope::All
        }
    }
}

/// Delete workspace objects by name suffix
#[derive(Debug, Args, Clone)]
pub struct DeleteCommand {
    /// Name suffix to match (defaults to the configured export suffix)
    #[arg(
        long,
        allow_hyphen_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub suffix: Option<String>,

    /// Only list what would be deleted
    #[arg(long)]
    pub dry_run: bool,
}

/// Demo cleanup of the export directories
#[derive(Debug, Args, Clone)]
pub struct CleanDemoCommand {
    /// Pipeline file to keep
    #[arg(long, default_value = DEMO_PIPELINE_FILE)]
    pub keep_pipeline: String,

    /// Job file to keep
    #[arg(long, default_value = DEMO_JOB_FILE)]
    pub keep_job: String,
}
