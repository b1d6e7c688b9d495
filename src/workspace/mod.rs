//! Databricks workspace access

pub mod client;
pub mod error;
pub mod profile;
pub mod rest_client;

use crate::core::resource::{JobDetails, JobId, JobSummary, PipelineDetails, PipelineSummary};
use async_trait::async_trait;
pub use client::{CredentialOverrides, WorkspaceClientConfig};
pub use error::WorkspaceError;
pub use rest_client::RestWorkspaceClient;

/// Operations the exporter needs from a workspace - allows for different implementations
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    /// List every pipeline in the workspace
    async fn list_pipelines(&self) -> Result<Vec<PipelineSummary>, WorkspaceError>;

    /// Fetch the full description of one pipeline
    async fn get_pipeline(&self, pipeline_id: &str) -> Result<PipelineDetails, WorkspaceError>;

    /// Delete a pipeline
    async fn delete_pipeline(&self, pipeline_id: &str) -> Result<(), WorkspaceError>;

    /// List every job in the workspace
    async fn list_jobs(&self) -> Result<Vec<JobSummary>, WorkspaceError>;

    /// Fetch the full description of one job
    async fn get_job(&self, job_id: JobId) -> Result<JobDetails, WorkspaceError>;

    /// Delete a job
    async fn delete_job(&self, job_id: JobId) -> Result<(), WorkspaceError>;
}
