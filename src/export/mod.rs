//! Bundle export - turns workspace pipelines and jobs into resource files
//!
//! Pipelines are exported first: each one is renamed, optionally moved to
//! Unity Catalog, and registered in an [`IdRemapper`]. The job export then
//! takes that remapper and rewrites pipeline ids in job tasks into bundle
//! references. [`Exporter::export_all`] runs both in that order.

pub mod bundle_dir;
pub mod jobs;
pub mod pipelines;

pub use bundle_dir::BundleDir;
pub use jobs::{rewrite_pipeline_references, transform_job, ExportedJob, JobExport};
pub use pipelines::{
    convert_to_unity_catalog, transform_pipeline, ExportedPipeline, PipelineExport, UcConversion,
};

use crate::core::config::ExporterConfig;
use crate::core::remap::IdRemapper;
use crate::workspace::{WorkspaceApi, WorkspaceError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Errors that abort an export run
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Workspace request failed: {0}")]
    Remote(#[from] WorkspaceError),

    #[error("Malformed remote definition: {0}")]
    MalformedRemote(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to encode definition: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ExportError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Events that can occur during an export run
#[derive(Debug, Clone)]
pub enum ExportEvent {
    RunStarted {
        run_id: Uuid,
    },
    DirectoryCleared {
        path: PathBuf,
        removed: usize,
    },
    PipelinesListed {
        count: usize,
    },
    PipelineExported {
        name: String,
        key: String,
        path: PathBuf,
        conversion: UcConversion,
    },
    JobsListed {
        count: usize,
    },
    JobExported {
        name: String,
        key: String,
        path: PathBuf,
        references_rewritten: usize,
    },
    RunCompleted {
        run_id: Uuid,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ExportEvent) + Send + Sync>;

/// Which resource types an export run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    All,
    PipelinesOnly,
    /// Jobs without a preceding pipeline export; pipeline ids stay as they are
    JobsOnly,
}

/// Outcome of an export run
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub pipelines_exported: usize,
    pub jobs_exported: usize,
    pub references_rewritten: usize,
    /// Pipelines whose storage matched no catalog mapping
    pub unmatched_storage: Vec<String>,
    pub files: Vec<PathBuf>,
}

impl ExportSummary {
    fn start(run_id: Uuid) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            completed_at: None,
            pipelines_exported: 0,
            jobs_exported: 0,
            references_rewritten: 0,
            unmatched_storage: Vec::new(),
            files: Vec::new(),
        }
    }

    fn record_pipelines(&mut self, export: PipelineExport) {
        self.pipelines_exported = export.files.len();
        self.unmatched_storage = export.unmatched_storage;
        self.files.extend(export.files);
    }

    fn record_jobs(&mut self, export: JobExport) {
        self.jobs_exported = export.files.len();
        self.references_rewritten = export.references_rewritten;
        self.files.extend(export.files);
    }
}

/// Exports workspace resources into bundle files
pub struct Exporter<W> {
    workspace: W,
    config: ExporterConfig,
    event_handlers: Vec<EventHandler>,
}

impl<W: WorkspaceApi> Exporter<W> {
    pub fn new(workspace: W, config: ExporterConfig) -> Self {
        Self {
            workspace,
            config,
            event_handlers: Vec::new(),
        }
    }

    pub fn workspace(&self) -> &W {
        &self.workspace
    }

    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(ExportEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit_event(&self, event: ExportEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Output directory for pipeline resources
    pub fn pipelines_dir(&self) -> BundleDir {
        BundleDir::new(&self.config.output.pipelines_dir)
    }

    /// Output directory for job resources
    pub fn jobs_dir(&self) -> BundleDir {
        BundleDir::new(&self.config.output.jobs_dir)
    }

    /// Clear an output directory when a full resync is configured
    fn resync(&self, dir: &BundleDir) -> Result<(), ExportError> {
        if !self.config.output.full_resync {
            return Ok(());
        }

        let removed = dir.clear()?;
        info!("Cleared {} files from {}", removed, dir.path().display());
        self.emit_event(ExportEvent::DirectoryCleared {
            path: dir.path().to_path_buf(),
            removed,
        });
        Ok(())
    }

    /// Export pipelines, then jobs with their pipeline references rewritten
    pub async fn export_all(&self) -> Result<ExportSummary, ExportError> {
        self.export(ExportScope::All).await
    }

    /// Run an export over the given scope
    pub async fn export(&self, scope: ExportScope) -> Result<ExportSummary, ExportError> {
        let run_id = Uuid::new_v4();
        let mut summary = ExportSummary::start(run_id);

        info!("Starting export run {} ({:?})", run_id, scope);
        self.emit_event(ExportEvent::RunStarted { run_id });

        let remapper = match scope {
            ExportScope::All | ExportScope::PipelinesOnly => {
                let export = self.export_pipelines().await?;
                let remapper = export.remapper.clone();
                summary.record_pipelines(export);
                remapper
            }
            ExportScope::JobsOnly => {
                warn!("Exporting jobs without pipelines: pipeline references are left unchanged");
                IdRemapper::new()
            }
        };

        if scope != ExportScope::PipelinesOnly {
            let export = self.export_jobs(&remapper).await?;
            summary.record_jobs(export);
        }

        summary.completed_at = Some(Utc::now());
        info!(
            "Export run {} finished: {} pipelines, {} jobs",
            run_id, summary.pipelines_exported, summary.jobs_exported
        );
        self.emit_event(ExportEvent::RunCompleted { run_id });

        Ok(summary)
    }
}
