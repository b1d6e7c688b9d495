//! Pipeline identifier remapping
//!
//! While pipelines are exported, each original pipeline id is associated
//! with the symbolic key it was filed under. The job export then uses the
//! table to turn hard-coded pipeline ids into bundle references.

use crate::core::naming::pipeline_reference;
use std::collections::HashMap;

/// Original pipeline id -> symbolic key, built during one export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdRemapper {
    keys: HashMap<String, String>,
}

impl IdRemapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the symbolic key for a pipeline id. Last write wins.
    pub fn register(&mut self, original_id: impl Into<String>, symbolic_key: impl Into<String>) {
        self.keys.insert(original_id.into(), symbolic_key.into());
    }

    /// Look up the symbolic key of a pipeline id
    pub fn resolve(&self, original_id: &str) -> Option<&str> {
        self.keys.get(original_id).map(String::as_str)
    }

    /// The `${resources.pipelines.<key>.id}` expression for a pipeline id,
    /// if that pipeline was registered
    pub fn reference_expression(&self, original_id: &str) -> Option<String> {
        self.resolve(original_id).map(pipeline_reference)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
