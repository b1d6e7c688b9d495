//! bundle-export - export Databricks jobs and DLT pipelines as asset bundle resources

pub mod cli;
pub mod core;
pub mod export;
pub mod maintenance;
pub mod workspace;

// Re-export commonly used types
pub use crate::core::config::{CatalogByStorage, ExporterConfig, PreviewChannelPolicy, UnityCatalogConfig};
pub use crate::core::remap::IdRemapper;
pub use export::{ExportError, ExportEvent, ExportScope, ExportSummary, Exporter};
pub use workspace::{RestWorkspaceClient, WorkspaceApi, WorkspaceClientConfig, WorkspaceError};
