//! Naming conventions for exported resources
//!
//! Exported objects get a renaming suffix appended to their name, and each
//! one is filed under a symbolic key in the bundle (`DLT-...` / `JOB-...`).
//! Other resources refer to a pipeline through its symbolic key.

use regex::Regex;
use std::sync::LazyLock;

/// Suffix appended to exported object names unless configured otherwise
pub const DEFAULT_SUFFIX: &str = "-[UC]";

/// Prefix of pipeline symbolic keys
pub const PIPELINE_KEY_PREFIX: &str = "DLT-";

/// Prefix of job symbolic keys
pub const JOB_KEY_PREFIX: &str = "JOB-";

static BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\]]").expect("bracket pattern is valid"));

/// Append the renaming suffix to an object name
pub fn renamed(name: &str, suffix: &str) -> String {
    format!("{}{}", name, suffix)
}

/// Symbolic key for a renamed pipeline: brackets stripped, `DLT-` prefix
pub fn pipeline_key(new_name: &str) -> String {
    format!("{}{}", PIPELINE_KEY_PREFIX, BRACKETS.replace_all(new_name, ""))
}

/// Symbolic key for a renamed job: brackets stripped, spaces become
/// underscores, `JOB-` prefix
pub fn job_key(new_name: &str) -> String {
    let stripped = BRACKETS.replace_all(new_name, "");
    format!("{}{}", JOB_KEY_PREFIX, stripped.replace(' ', "_"))
}

/// Bundle expression resolving to the deployed id of a pipeline resource
pub fn pipeline_reference(key: &str) -> String {
    format!("${{resources.pipelines.{}.id}}", key)
}

/// Target-qualified catalog name, resolved by the bundle at deploy time
pub fn target_catalog(catalog: &str) -> String {
    format!("${{bundle.target}}_{}", catalog)
}
