//! Test: Unity Catalog conversion of storage-based pipelines

use crate::helpers::*;
use bundle_export::{Exporter, PreviewChannelPolicy};

/// The documented example: a matched storage prefix becomes a catalog
#[tokio::test]
async fn test_matched_storage_becomes_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config_with_mapping(tmp.path(), &[("s3://sales", "Sales")]);
    let workspace = MockWorkspace::new().with_pipeline("p1", "Gold-DWH", Some("s3://sales-bucket/x"));

    let exporter = Exporter::new(workspace, config.clone());
    let export = exporter.export_pipelines().await.unwrap();

    assert_eq!(export.files.len(), 1);
    assert_eq!(
        dir_listing(&config.output.pipelines_dir),
        vec!["DLT-Gold-DWH-UC.yml".to_string()]
    );

    let body = pipeline_resource(&config, "DLT-Gold-DWH-UC");
    assert_eq!(body["name"].as_str(), Some("Gold-DWH-[UC]"));
    assert_eq!(body["catalog"].as_str(), Some("${bundle.target}_Sales"));
    assert_eq!(body["channel"].as_str(), Some("PREVIEW"));
    assert!(body.get("storage").is_none());
    assert!(body.get("id").is_none());
    assert_eq!(
        body["configuration"]["spark.databricks.sql.initial.catalog.name"].as_str(),
        Some("hive_metastore")
    );
    // Fields the exporter does not model survive
    assert_eq!(body["development"].as_bool(), Some(true));

    assert_eq!(export.remapper.resolve("p1"), Some("DLT-Gold-DWH-UC"));
}

/// Prefix matching ignores case on both sides
#[tokio::test]
async fn test_prefix_match_is_case_insensitive() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config_with_mapping(tmp.path(), &[("ABFSS://Finance@Lake", "Finance")]);
    let workspace =
        MockWorkspace::new().with_pipeline("p2", "Ledger", Some("abfss://finance@lake.dfs.core.windows.net/dlt"));

    let exporter = Exporter::new(workspace, config.clone());
    exporter.export_pipelines().await.unwrap();

    let body = pipeline_resource(&config, "DLT-Ledger-UC");
    assert_eq!(body["catalog"].as_str(), Some("${bundle.target}_Finance"));
    assert!(body.get("storage").is_none());
}

/// An unmatched pipeline keeps its storage and gets no catalog
#[tokio::test]
async fn test_unmatched_storage_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config_with_mapping(tmp.path(), &[("s3://sales", "Sales")]);
    let workspace = MockWorkspace::new()
        .with_pipeline("p1", "Gold-DWH", Some("s3://sales-bucket/x"))
        .with_pipeline("p3", "HR-Raw", Some("s3://hr/raw"));

    let exporter = Exporter::new(workspace, config.clone());
    let summary = exporter.export_all().await.unwrap();

    assert_eq!(summary.pipelines_exported, 2);
    assert_eq!(summary.unmatched_storage, vec!["HR-Raw".to_string()]);
    // One listing, then one detail fetch per pipeline
    assert_eq!(exporter.workspace().get_calls(), 2);

    let body = pipeline_resource(&config, "DLT-HR-Raw-UC");
    assert!(body.get("storage").is_none());
    assert!(body.get("catalog").is_none());
    assert!(body.get("configuration").is_none());
    assert_eq!(body["channel"].as_str(), Some("PREVIEW"));
}

/// With the `converted` policy, unmatched pipelines keep their channel
#[tokio::test]
async fn test_converted_policy_leaves_unmatched_channel() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = test_config_with_mapping(tmp.path(), &[("s3://sales", "Sales")]);
    if let Some(uc) = config.unity_catalog.as_mut() {
        uc.preview_channel = PreviewChannelPolicy::Converted;
    }
    let workspace = MockWorkspace::new().with_pipeline("p3", "HR-Raw", Some("s3://hr/raw"));

    let exporter = Exporter::new(workspace, config.clone());
    exporter.export_pipelines().await.unwrap();

    let body = pipeline_resource(&config, "DLT-HR-Raw-UC");
    assert_eq!(body["channel"].as_str(), Some("CURRENT"));
}

/// Without a mapping table pipelines are only renamed
#[tokio::test]
async fn test_no_mapping_only_renames() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let workspace = MockWorkspace::new().with_pipeline("p1", "Gold-DWH", Some("s3://sales-bucket/x"));

    let exporter = Exporter::new(workspace, config.clone());
    exporter.export_pipelines().await.unwrap();

    let body = pipeline_resource(&config, "DLT-Gold-DWH-UC");
    assert_eq!(body["name"].as_str(), Some("Gold-DWH-[UC]"));
    assert_eq!(body["storage"].as_str(), Some("s3://sales-bucket/x"));
    assert_eq!(body["channel"].as_str(), Some("CURRENT"));
    assert!(body.get("catalog").is_none());
}
