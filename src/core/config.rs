//! Exporter configuration from YAML

use crate::core::naming::DEFAULT_SUFFIX;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "bundle-export.yml";

/// Top-level exporter configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Workspace connection settings
    #[serde(default)]
    pub workspace: WorkspaceSettings,

    /// Suffix appended to every exported object name
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Unity Catalog conversion; absent means pipelines are exported as-is
    #[serde(default)]
    pub unity_catalog: Option<UnityCatalogConfig>,

    /// Where the bundle files go
    #[serde(default)]
    pub output: OutputConfig,
}

/// Workspace connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    /// Workspace URL
    #[serde(default)]
    pub host: Option<String>,

    /// Personal access token
    #[serde(default)]
    pub token: Option<String>,

    /// Profile name in `~/.databrickscfg`
    #[serde(default)]
    pub profile: Option<String>,

    /// Timeout for each request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Storage-to-catalog conversion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnityCatalogConfig {
    /// Which pipelines get their channel forced to `PREVIEW`
    #[serde(default)]
    pub preview_channel: PreviewChannelPolicy,

    /// Storage prefix -> catalog, checked in order
    pub catalog_by_storage: CatalogByStorage,
}

impl UnityCatalogConfig {
    pub fn new(catalog_by_storage: CatalogByStorage) -> Self {
        Self {
            preview_channel: PreviewChannelPolicy::default(),
            catalog_by_storage,
        }
    }
}

/// Which pipelines are moved to the preview channel during conversion
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PreviewChannelPolicy {
    /// Every pipeline with a storage location, matched or not
    #[default]
    All,
    /// Only pipelines whose storage matched a prefix
    Converted,
}

/// Ordered storage-prefix to catalog table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Mapping", into = "Mapping")]
pub struct CatalogByStorage {
    entries: Vec<StorageMapping>,
}

/// A single storage prefix and the catalog it maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageMapping {
    pub storage_prefix: String,
    pub catalog: String,
}

impl CatalogByStorage {
    /// First mapping whose prefix case-insensitively starts the storage value
    pub fn match_storage(&self, storage: &str) -> Option<&StorageMapping> {
        let storage = storage.to_lowercase();
        self.entries
            .iter()
            .find(|m| storage.starts_with(&m.storage_prefix.to_lowercase()))
    }

    pub fn entries(&self) -> &[StorageMapping] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CatalogByStorage {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(prefix, catalog)| StorageMapping {
                    storage_prefix: prefix.into(),
                    catalog: catalog.into(),
                })
                .collect(),
        }
    }
}

impl TryFrom<Mapping> for CatalogByStorage {
    type Error = String;

    fn try_from(mapping: Mapping) -> Result<Self, Self::Error> {
        let mut entries = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let storage_prefix = match key {
                Value::String(s) => s,
                other => return Err(format!("storage prefix must be a string, got {:?}", other)),
            };
            let catalog = match value {
                Value::String(s) => s,
                other => {
                    return Err(format!(
                        "catalog for '{}' must be a string, got {:?}",
                        storage_prefix, other
                    ))
                }
            };
            entries.push(StorageMapping {
                storage_prefix,
                catalog,
            });
        }
        Ok(Self { entries })
    }
}

impl From<CatalogByStorage> for Mapping {
    fn from(table: CatalogByStorage) -> Self {
        table
            .entries
            .into_iter()
            .map(|m| (Value::String(m.storage_prefix), Value::String(m.catalog)))
            .collect()
    }
}

/// Output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for job resource files
    #[serde(default = "default_jobs_dir")]
    pub jobs_dir: PathBuf,

    /// Directory for pipeline resource files
    #[serde(default = "default_pipelines_dir")]
    pub pipelines_dir: PathBuf,

    /// Clear each output directory before exporting into it
    #[serde(default)]
    pub full_resync: bool,
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_jobs_dir() -> PathBuf {
    PathBuf::from("resources/Jobs")
}

fn default_pipelines_dir() -> PathBuf {
    PathBuf::from("resources/DLT")
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            host: None,
            token: None,
            profile: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jobs_dir: default_jobs_dir(),
            pipelines_dir: default_pipelines_dir(),
            full_resync: false,
        }
    }
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            workspace: WorkspaceSettings::default(),
            suffix: default_suffix(),
            unity_catalog: None,
            output: OutputConfig::default(),
        }
    }
}

impl ExporterConfig {
    /// Load exporter configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse exporter configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ExporterConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the exporter configuration
    pub fn validate(&self) -> Result<()> {
        if self.suffix.is_empty() {
            anyhow::bail!("suffix must not be empty");
        }

        if self.output.jobs_dir.as_os_str().is_empty() {
            anyhow::bail!("output.jobs_dir must not be empty");
        }
        if self.output.pipelines_dir.as_os_str().is_empty() {
            anyhow::bail!("output.pipelines_dir must not be empty");
        }
        // A shared directory would let one export's resync wipe the other's files
        if self.output.jobs_dir == self.output.pipelines_dir {
            anyhow::bail!(
                "output.jobs_dir and output.pipelines_dir must differ (both are '{}')",
                self.output.jobs_dir.display()
            );
        }

        if let Some(uc) = &self.unity_catalog {
            for mapping in uc.catalog_by_storage.entries() {
                if mapping.storage_prefix.is_empty() {
                    anyhow::bail!("unity_catalog.catalog_by_storage has an empty storage prefix");
                }
                if mapping.catalog.is_empty() {
                    anyhow::bail!(
                        "unity_catalog.catalog_by_storage maps '{}' to an empty catalog",
                        mapping.storage_prefix
                    );
                }
            }
        }

        Ok(())
    }
}
