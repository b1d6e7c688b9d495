//! Job export with pipeline reference rewriting

use crate::core::naming::{job_key, renamed};
use crate::core::remap::IdRemapper;
use crate::core::resource::{BundleDocument, JobDetails, JobId, JobSettings, ResourceKind};
use crate::export::{ExportError, ExportEvent, Exporter};
use crate::workspace::WorkspaceApi;
use std::path::PathBuf;
use tracing::{debug, info};

/// A job ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedJob {
    pub job_id: JobId,
    pub original_name: String,
    pub key: String,
    pub settings: JobSettings,
    pub references_rewritten: usize,
}

/// Result of the job export
#[derive(Debug, Clone, Default)]
pub struct JobExport {
    pub files: Vec<PathBuf>,
    pub references_rewritten: usize,
}

/// Point pipeline tasks at the bundle resources of exported pipelines
///
/// Ids the remapper does not know are left as they are. Null tasks and
/// tasks without a pipeline are skipped. Returns how many references
/// were rewritten.
pub fn rewrite_pipeline_references(settings: &mut JobSettings, remapper: &IdRemapper) -> usize {
    let Some(tasks) = settings.tasks.as_mut() else {
        return 0;
    };

    let mut rewritten = 0;
    for task in tasks.iter_mut().flatten() {
        let Some(pipeline_task) = task.pipeline_task.as_mut() else {
            continue;
        };
        if let Some(reference) = remapper.reference_expression(&pipeline_task.pipeline_id) {
            debug!("Task pipeline {} -> {}", pipeline_task.pipeline_id, reference);
            pipeline_task.pipeline_id = reference;
            rewritten += 1;
        }
    }
    rewritten
}

/// Rewrite references, rename a fetched job and derive its key
pub fn transform_job(details: JobDetails, suffix: &str, remapper: &IdRemapper) -> ExportedJob {
    let JobDetails {
        job_id,
        mut settings,
    } = details;

    let references_rewritten = rewrite_pipeline_references(&mut settings, remapper);
    let original_name = settings.name.clone();
    settings.name = renamed(&original_name, suffix);
    let key = job_key(&settings.name);

    ExportedJob {
        job_id,
        original_name,
        key,
        settings,
        references_rewritten,
    }
}

impl<W: WorkspaceApi> Exporter<W> {
    /// Export every job, resolving pipeline ids through `remapper`
    pub async fn export_jobs(&self, remapper: &IdRemapper) -> Result<JobExport, ExportError> {
        info!("Exporting jobs...");
        let dir = self.jobs_dir();
        self.resync(&dir)?;

        let summaries = self.workspace().list_jobs().await?;
        self.emit_event(ExportEvent::JobsListed {
            count: summaries.len(),
        });

        let mut export = JobExport::default();

        for summary in summaries {
            let details = self.workspace().get_job(summary.job_id).await?;
            let exported = transform_job(details, &self.config().suffix, remapper);

            let document = BundleDocument::new(ResourceKind::Jobs, &exported.key, &exported.settings)?;
            let path = dir.write(&exported.key, &document.to_yaml()?)?;
            info!("Exported job {} as {}", exported.original_name, exported.key);

            export.references_rewritten += exported.references_rewritten;
            self.emit_event(ExportEvent::JobExported {
                name: exported.original_name,
                key: exported.key,
                path: path.clone(),
                references_rewritten: exported.references_rewritten,
            });
            export.files.push(path);
        }

        Ok(export)
    }
}
