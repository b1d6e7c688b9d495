//! Pipeline export and Unity Catalog conversion

use crate::core::config::{PreviewChannelPolicy, UnityCatalogConfig};
use crate::core::naming::{pipeline_key, renamed, target_catalog};
use crate::core::remap::IdRemapper;
use crate::core::resource::{BundleDocument, PipelineDetails, PipelineSpec, ResourceKind};
use crate::export::{ExportError, ExportEvent, Exporter};
use crate::workspace::WorkspaceApi;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Channel converted pipelines run on
pub const PREVIEW_CHANNEL: &str = "PREVIEW";

/// Spark setting pointing the legacy metastore at converted pipelines
pub const INITIAL_CATALOG_KEY: &str = "spark.databricks.sql.initial.catalog.name";

/// Value of [`INITIAL_CATALOG_KEY`] for converted pipelines
pub const HIVE_METASTORE: &str = "hive_metastore";

/// What the Unity Catalog conversion did to a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UcConversion {
    /// No catalog mapping configured
    NotRequested,
    /// The pipeline has no storage location
    NoStorage,
    /// Storage replaced by the given catalog
    Converted { catalog: String },
    /// No configured prefix matched the storage location
    Unmatched { storage: String },
}

/// A pipeline ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedPipeline {
    pub original_id: String,
    pub original_name: String,
    pub key: String,
    pub spec: PipelineSpec,
    pub conversion: UcConversion,
}

/// Result of the pipeline export
#[derive(Debug, Clone, Default)]
pub struct PipelineExport {
    /// Original pipeline ids to the keys they were exported under
    pub remapper: IdRemapper,
    pub files: Vec<PathBuf>,
    /// Names of pipelines whose storage matched no prefix
    pub unmatched_storage: Vec<String>,
}

/// Replace a pipeline's storage location with a Unity Catalog reference
pub fn convert_to_unity_catalog(spec: &mut PipelineSpec, uc: &UnityCatalogConfig) -> UcConversion {
    let Some(storage) = spec.storage.clone() else {
        return UcConversion::NoStorage;
    };

    match uc.catalog_by_storage.match_storage(&storage) {
        Some(mapping) => {
            let catalog = target_catalog(&mapping.catalog);
            spec.channel = Some(PREVIEW_CHANNEL.to_string());
            spec.catalog = Some(catalog.clone());
            spec.storage = None;
            spec.configuration
                .get_or_insert_with(BTreeMap::new)
                .insert(INITIAL_CATALOG_KEY.to_string(), HIVE_METASTORE.to_string());
            UcConversion::Converted { catalog }
        }
        None => {
            spec.storage = None;
            if uc.preview_channel == PreviewChannelPolicy::All {
                spec.channel = Some(PREVIEW_CHANNEL.to_string());
            }
            UcConversion::Unmatched { storage }
        }
    }
}

/// Rename a fetched pipeline, convert it if requested and derive its key
pub fn transform_pipeline(
    details: PipelineDetails,
    suffix: &str,
    uc: Option<&UnityCatalogConfig>,
) -> Result<ExportedPipeline, ExportError> {
    let PipelineDetails {
        pipeline_id, spec, ..
    } = details;
    let mut spec = spec.ok_or_else(|| {
        ExportError::MalformedRemote(format!("pipeline {} has no spec", pipeline_id))
    })?;

    let conversion = match uc {
        Some(uc) => convert_to_unity_catalog(&mut spec, uc),
        None => UcConversion::NotRequested,
    };

    let original_id = spec.id.take().unwrap_or(pipeline_id);
    let original_name = spec.name.clone();
    spec.name = renamed(&original_name, suffix);
    let key = pipeline_key(&spec.name);

    Ok(ExportedPipeline {
        original_id,
        original_name,
        key,
        spec,
        conversion,
    })
}

impl<W: WorkspaceApi> Exporter<W> {
    /// Export every pipeline and return the id remapping built along the way
    pub async fn export_pipelines(&self) -> Result<PipelineExport, ExportError> {
        info!("Exporting pipelines...");
        let dir = self.pipelines_dir();
        self.resync(&dir)?;

        let summaries = self.workspace().list_pipelines().await?;
        self.emit_event(ExportEvent::PipelinesListed {
            count: summaries.len(),
        });

        let config = self.config();
        let mut export = PipelineExport::default();

        for summary in summaries {
            let details = self.workspace().get_pipeline(&summary.pipeline_id).await?;
            let exported =
                transform_pipeline(details, &config.suffix, config.unity_catalog.as_ref())?;

            match &exported.conversion {
                UcConversion::Converted { catalog } => {
                    debug!("Pipeline {} moved to catalog {}", exported.original_name, catalog)
                }
                UcConversion::Unmatched { storage } => {
                    warn!(
                        "No catalog mapping for pipeline {} (storage {})",
                        exported.original_name, storage
                    );
                    export.unmatched_storage.push(exported.original_name.clone());
                }
                UcConversion::NotRequested | UcConversion::NoStorage => {}
            }

            export
                .remapper
                .register(exported.original_id.as_str(), exported.key.as_str());

            let document = BundleDocument::new(ResourceKind::Pipelines, &exported.key, &exported.spec)?;
            let path = dir.write(&exported.key, &document.to_yaml()?)?;
            info!("Exported pipeline {} as {}", exported.original_name, exported.key);

            self.emit_event(ExportEvent::PipelineExported {
                name: exported.original_name,
                key: exported.key,
                path: path.clone(),
                conversion: exported.conversion,
            });
            export.files.push(path);
        }

        Ok(export)
    }
}
