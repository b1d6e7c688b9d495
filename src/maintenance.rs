//! Cleanup between export runs
//!
//! Deletion by name suffix removes objects created from earlier exports
//! from the workspace. It is irreversible and asks for no confirmation.

use crate::core::config::OutputConfig;
use crate::export::{BundleDir, ExportError};
use crate::workspace::{WorkspaceApi, WorkspaceError};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Pipeline file kept by the demo cleanup
pub const DEMO_PIPELINE_FILE: &str = "DLT-DLT-Gold-DWHSales-UC.yml";

/// Job file kept by the demo cleanup
pub const DEMO_JOB_FILE: &str = "JOB-SQLDay2024-Gold-Demo-UC.yml";

/// Errors from suffix deletion
#[derive(Debug, Error)]
pub enum DeleteError {
    /// An empty suffix would match every name in the workspace
    #[error("Refusing to delete with an empty name suffix")]
    EmptySuffix,

    #[error(transparent)]
    Remote(#[from] WorkspaceError),
}

fn check_suffix(suffix: &str) -> Result<(), DeleteError> {
    if suffix.is_empty() {
        return Err(DeleteError::EmptySuffix);
    }
    Ok(())
}

/// Delete every job whose name ends with `suffix`
///
/// Returns the names of the deleted jobs. With `dry_run` nothing is
/// deleted and the names of the matching jobs are returned.
pub async fn delete_jobs<W: WorkspaceApi + ?Sized>(
    workspace: &W,
    suffix: &str,
    dry_run: bool,
) -> Result<Vec<String>, DeleteError> {
    check_suffix(suffix)?;
    let mut deleted = Vec::new();
    for job in workspace.list_jobs().await? {
        let name = job.name();
        if !name.ends_with(suffix) {
            continue;
        }
        if dry_run {
            info!("Would delete job: {}", name);
        } else {
            info!("Deleting job: {}", name);
            workspace.delete_job(job.job_id).await?;
        }
        deleted.push(name.to_string());
    }
    Ok(deleted)
}

/// Delete every pipeline whose name ends with `suffix`
///
/// Returns the names of the deleted pipelines. With `dry_run` nothing is
/// deleted and the names of the matching pipelines are returned.
pub async fn delete_pipelines<W: WorkspaceApi + ?Sized>(
    workspace: &W,
    suffix: &str,
    dry_run: bool,
) -> Result<Vec<String>, DeleteError> {
    check_suffix(suffix)?;
    let mut deleted = Vec::new();
    for pipeline in workspace.list_pipelines().await? {
        if !pipeline.name.ends_with(suffix) {
            continue;
        }
        if dry_run {
            info!("Would delete pipeline: {}", pipeline.name);
        } else {
            info!("Deleting pipeline: {}", pipeline.name);
            workspace.delete_pipeline(&pipeline.pipeline_id).await?;
        }
        deleted.push(pipeline.name);
    }
    Ok(deleted)
}

/// Files removed by [`clean_demo`]
#[derive(Debug, Clone, Default)]
pub struct DemoCleanup {
    pub pipeline_files: Vec<PathBuf>,
    pub job_files: Vec<PathBuf>,
}

/// Empty both export directories except for one file each
pub fn clean_demo(
    output: &OutputConfig,
    keep_pipeline: &str,
    keep_job: &str,
) -> Result<DemoCleanup, ExportError> {
    let pipeline_files = BundleDir::new(&output.pipelines_dir).prune_except(keep_pipeline)?;
    let job_files = BundleDir::new(&output.jobs_dir).prune_except(keep_job)?;
    info!(
        "Demo cleanup removed {} pipeline files and {} job files",
        pipeline_files.len(),
        job_files.len()
    );

    Ok(DemoCleanup {
        pipeline_files,
        job_files,
    })
}
