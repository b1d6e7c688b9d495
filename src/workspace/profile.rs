//! Connection profiles from `~/.databrickscfg`

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Profile used when none is named
pub const DEFAULT_PROFILE: &str = "DEFAULT";

/// Host and token of one profile section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabricksProfile {
    pub host: Option<String>,
    pub token: Option<String>,
}

/// Location of the CLI configuration file in the home directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".databrickscfg"))
}

/// Parse an INI-style `.databrickscfg` into profiles by name
///
/// Keys before the first section header belong to `DEFAULT`. Comments
/// (`#`, `;`) and unknown keys are ignored.
pub fn parse_profiles(content: &str) -> HashMap<String, DatabricksProfile> {
    let mut profiles: HashMap<String, DatabricksProfile> = HashMap::new();
    let mut current = DEFAULT_PROFILE.to_string();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            current = trimmed[1..trimmed.len() - 1].trim().to_string();
            profiles.entry(current.clone()).or_default();
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let value = value.trim().to_string();
        let profile = profiles.entry(current.clone()).or_default();
        match key.trim() {
            "host" => profile.host = Some(value),
            "token" => profile.token = Some(value),
            _ => {}
        }
    }

    profiles
}

/// Read one named profile from a configuration file
///
/// A missing file yields `Ok(None)`, as does a file without that profile.
pub fn load_profile(path: &Path, name: &str) -> Result<Option<DatabricksProfile>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(parse_profiles(&content).remove(name))
}
