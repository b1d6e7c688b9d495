//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{CleanDemoCommand, DeleteCommand, ExportCommand};
use std::ffi::OsString;

/// Export Databricks jobs and DLT pipelines as asset bundle resources
#[derive(Debug, Parser, Clone)]
#[command(name = "bundle-export")]
#[command(author = "Bundle Export Contributors")]
#[command(version)]
#[command(about = "Export Databricks jobs and DLT pipelines as asset bundle resources", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to exporter configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Workspace URL
    #[arg(long, global = true, env = "DATABRICKS_HOST")]
    pub host: Option<String>,

    /// Personal access token
    #[arg(long, global = true, env = "DATABRICKS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Profile in ~/.databrickscfg
    #[arg(long, global = true, env = "DATABRICKS_CONFIG_PROFILE")]
    pub profile: Option<String>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Export pipelines and jobs into bundle resource files
    Export(ExportCommand),

    /// Delete workspace jobs whose name ends with the suffix
    DeleteJobs(DeleteCommand),

    /// Delete workspace pipelines whose name ends with the suffix
    DeletePipelines(DeleteCommand),

    /// Empty the export directories except for the demo resources
    CleanDemo(CleanDemoCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
