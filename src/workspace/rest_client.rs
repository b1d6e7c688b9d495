//! REST client for the Databricks Pipelines and Jobs APIs

use crate::core::resource::{JobDetails, JobId, JobSummary, PipelineDetails, PipelineSummary};
use crate::workspace::{WorkspaceApi, WorkspaceClientConfig, WorkspaceError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const PIPELINES_PATH: &str = "/api/2.0/pipelines";
const JOBS_LIST_PATH: &str = "/api/2.1/jobs/list";
const JOBS_GET_PATH: &str = "/api/2.1/jobs/get";
const JOBS_DELETE_PATH: &str = "/api/2.1/jobs/delete";

const PIPELINES_PAGE_SIZE: u32 = 100;
const JOBS_PAGE_SIZE: u32 = 100;

/// Workspace client speaking the Databricks REST API
#[derive(Clone)]
pub struct RestWorkspaceClient {
    /// Workspace URL without trailing slash
    host: String,
    token: String,
    client: Client,
}

impl std::fmt::Debug for RestWorkspaceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestWorkspaceClient")
            .field("host", &self.host)
            .field("token", &"***")
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ListPipelinesPage {
    #[serde(default)]
    statuses: Vec<PipelineSummary>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListJobsPage {
    #[serde(default)]
    jobs: Vec<JobSummary>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl RestWorkspaceClient {
    /// Create a client from resolved connection settings
    pub fn new(config: &WorkspaceClientConfig) -> Result<Self, WorkspaceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a client around a preconfigured reqwest client
    pub fn with_client(config: &WorkspaceClientConfig, client: Client) -> Self {
        Self {
            host: config.host.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            client,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, WorkspaceError> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(WorkspaceError::api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| WorkspaceError::Parse(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code of a response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), WorkspaceError> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(WorkspaceError::api(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[async_trait]
impl WorkspaceApi for RestWorkspaceClient {
    async fn list_pipelines(&self) -> Result<Vec<PipelineSummary>, WorkspaceError> {
        let mut pipelines = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .authorized(self.client.get(self.url(PIPELINES_PATH)))
                .query(&[("max_results", PIPELINES_PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("page_token", token)]);
            }

            let page: ListPipelinesPage = self.handle_response(request.send().await?).await?;
            debug!("Listed {} pipelines", page.statuses.len());
            pipelines.extend(page.statuses);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(pipelines)
    }

    async fn get_pipeline(&self, pipeline_id: &str) -> Result<PipelineDetails, WorkspaceError> {
        debug!("Fetching pipeline {}", pipeline_id);
        let url = self.url(&format!("{}/{}", PIPELINES_PATH, pipeline_id));
        let response = self.authorized(self.client.get(url)).send().await?;
        self.handle_response(response).await
    }

    async fn delete_pipeline(&self, pipeline_id: &str) -> Result<(), WorkspaceError> {
        debug!("Deleting pipeline {}", pipeline_id);
        let url = self.url(&format!("{}/{}", PIPELINES_PATH, pipeline_id));
        let response = self.authorized(self.client.delete(url)).send().await?;
        self.handle_empty_response(response).await
    }

    async fn list_jobs(&self) -> Result<Vec<JobSummary>, WorkspaceError> {
        let mut jobs = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .authorized(self.client.get(self.url(JOBS_LIST_PATH)))
                .query(&[("limit", JOBS_PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("page_token", token)]);
            }

            let page: ListJobsPage = self.handle_response(request.send().await?).await?;
            debug!("Listed {} jobs", page.jobs.len());
            jobs.extend(page.jobs);

            match page.next_page_token {
                Some(token) if page.has_more && !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(jobs)
    }

    async fn get_job(&self, job_id: JobId) -> Result<JobDetails, WorkspaceError> {
        debug!("Fetching job {}", job_id);
        let response = self
            .authorized(self.client.get(self.url(JOBS_GET_PATH)))
            .query(&[("job_id", job_id)])
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn delete_job(&self, job_id: JobId) -> Result<(), WorkspaceError> {
        debug!("Deleting job {}", job_id);
        let response = self
            .authorized(self.client.post(self.url(JOBS_DELETE_PATH)))
            .json(&serde_json::json!({ "job_id": job_id }))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
