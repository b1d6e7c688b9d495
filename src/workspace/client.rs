//! Workspace client configuration

use crate::core::config::WorkspaceSettings;
use crate::workspace::profile::{self, DatabricksProfile, DEFAULT_PROFILE};
use anyhow::Result;
use std::path::Path;

/// Connection settings for a workspace client
#[derive(Clone)]
pub struct WorkspaceClientConfig {
    /// Workspace URL, e.g. `https://adb-123.azuredatabricks.net`
    pub host: String,

    /// Personal access token
    pub token: String,

    /// Timeout for requests in seconds
    pub timeout_secs: u64,
}

// The token stays out of logs
impl std::fmt::Debug for WorkspaceClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceClientConfig")
            .field("host", &self.host)
            .field("token", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    pub host: Option<String>,
    pub token: Option<String>,
    pub profile: Option<String>,
}

impl WorkspaceClientConfig {
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
            timeout_secs: 60,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Resolve credentials from overrides, the config file and
    /// `~/.databrickscfg`, in that order of precedence
    pub fn resolve(settings: &WorkspaceSettings, overrides: &CredentialOverrides) -> Result<Self> {
        let path = profile::default_config_path();
        Self::resolve_with_profiles(settings, overrides, path.as_deref())
    }

    /// Same as [`resolve`](Self::resolve) with an explicit profile file
    pub fn resolve_with_profiles(
        settings: &WorkspaceSettings,
        overrides: &CredentialOverrides,
        profiles_path: Option<&Path>,
    ) -> Result<Self> {
        let mut host = overrides.host.clone().or_else(|| settings.host.clone());
        let mut token = overrides.token.clone().or_else(|| settings.token.clone());

        if host.is_none() || token.is_none() {
            let named = overrides.profile.as_deref().or(settings.profile.as_deref());
            let fallback = match profiles_path {
                Some(path) => profile::load_profile(path, named.unwrap_or(DEFAULT_PROFILE))?,
                None => None,
            };

            if fallback.is_none() {
                if let Some(name) = named {
                    anyhow::bail!("Profile '{}' not found in .databrickscfg", name);
                }
            }

            let DatabricksProfile {
                host: profile_host,
                token: profile_token,
            } = fallback.unwrap_or_default();
            host = host.or(profile_host);
            token = token.or(profile_token);
        }

        let Some(host) = host.filter(|h| !h.trim().is_empty()) else {
            anyhow::bail!(
                "No workspace host configured (use --host, DATABRICKS_HOST, workspace.host or a profile)"
            );
        };
        let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
            anyhow::bail!(
                "No access token configured (use --token, DATABRICKS_TOKEN, workspace.token or a profile)"
            );
        };

        Ok(Self::new(host, token).with_timeout(settings.timeout_secs))
    }
}
