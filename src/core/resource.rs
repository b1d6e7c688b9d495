//! Remote pipeline and job definitions, and the bundle documents they
//! are exported as
//!
//! Only the fields the exporter reads or rewrites are modelled explicitly.
//! Everything else the workspace returns is carried through untouched in
//! the flattened `extra` maps, so the exported file keeps the full
//! definition.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Numeric job identifier used by the Jobs API
pub type JobId = i64;

/// Entry of the pipeline listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub pipeline_id: String,

    #[serde(default)]
    pub name: String,
}

/// Full pipeline description as returned by a per-pipeline fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDetails {
    pub pipeline_id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// The deployable definition; this is what gets exported
    #[serde(default)]
    pub spec: Option<PipelineSpec>,
}

/// Deployable pipeline definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    /// Storage location of a non-Unity-Catalog pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    /// Release channel (`CURRENT` or `PREVIEW`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    /// Spark configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<BTreeMap<String, String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PipelineSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            storage: None,
            catalog: None,
            channel: None,
            configuration: None,
            extra: Map::new(),
        }
    }
}

/// Entry of the job listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub job_id: JobId,

    #[serde(default)]
    pub settings: Option<JobSummarySettings>,
}

impl JobSummary {
    /// Job name, empty when the listing carried no settings
    pub fn name(&self) -> &str {
        self.settings.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }
}

/// The part of job settings included in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummarySettings {
    #[serde(default)]
    pub name: String,
}

/// Full job description as returned by a per-job fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    pub job_id: JobId,

    /// The deployable definition; this is what gets exported
    pub settings: JobSettings,
}

/// Deployable job definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSettings {
    pub name: String,

    /// Ordered task list; entries may be null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Option<Task>>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: None,
            extra: Map::new(),
        }
    }
}

/// A single job task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_task: Option<PipelineTask>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// A task that triggers the given pipeline
    pub fn pipeline(task_key: &str, pipeline_id: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("task_key".to_string(), Value::String(task_key.to_string()));
        Self {
            pipeline_task: Some(PipelineTask {
                pipeline_id: pipeline_id.into(),
                extra: Map::new(),
            }),
            extra,
        }
    }
}

/// Task that triggers a pipeline update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineTask {
    pub pipeline_id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resource section of a bundle document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Pipelines,
    Jobs,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Pipelines => "pipelines",
            ResourceKind::Jobs => "jobs",
        }
    }
}

/// A single-resource bundle document: `resources.<kind>.<key> = body`
#[derive(Debug, Clone, PartialEq)]
pub struct BundleDocument {
    pub kind: ResourceKind,
    pub key: String,
    pub body: Value,
}

impl BundleDocument {
    pub fn new<T: Serialize>(
        kind: ResourceKind,
        key: impl Into<String>,
        definition: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            kind,
            key: key.into(),
            body: serde_json::to_value(definition)?,
        })
    }

    /// Render as YAML. Mapping keys come out sorted.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        let mut resource = Map::new();
        resource.insert(self.key.clone(), self.body.clone());

        let mut section = Map::new();
        section.insert(self.kind.as_str().to_string(), Value::Object(resource));

        let mut document = Map::new();
        document.insert("resources".to_string(), Value::Object(section));

        serde_yaml::to_string(&Value::Object(document))
    }
}
