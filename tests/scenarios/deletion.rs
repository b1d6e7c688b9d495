//! Test: Deleting workspace objects by name suffix

use crate::helpers::*;
use bundle_export::core::naming::DEFAULT_SUFFIX;
use bundle_export::maintenance::{delete_jobs, delete_pipelines, DeleteError};

/// Only jobs carrying the suffix are deleted
#[tokio::test]
async fn test_delete_jobs_with_default_suffix() {
    let workspace = MockWorkspace::new()
        .with_job(1, "A-[UC]", vec![])
        .with_job(2, "B", vec![]);

    let deleted = delete_jobs(&workspace, DEFAULT_SUFFIX, false).await.unwrap();

    assert_eq!(deleted, vec!["A-[UC]".to_string()]);
    assert_eq!(workspace.deleted_jobs(), vec![1]);
}

#[tokio::test]
async fn test_delete_pipelines_with_custom_suffix() {
    let workspace = MockWorkspace::new()
        .with_pipeline("p1", "Gold-DWH-[UC]", None)
        .with_pipeline("p2", "Gold-DWH-v2", None)
        .with_pipeline("p3", "Silver-v2", None);

    let deleted = delete_pipelines(&workspace, "-v2", false).await.unwrap();

    assert_eq!(deleted, vec!["Gold-DWH-v2".to_string(), "Silver-v2".to_string()]);
    assert_eq!(workspace.deleted_pipelines(), vec!["p2".to_string(), "p3".to_string()]);
}

/// A dry run reports matches without deleting
#[tokio::test]
async fn test_dry_run_deletes_nothing() {
    let workspace = MockWorkspace::new()
        .with_job(1, "A-[UC]", vec![])
        .with_pipeline("p1", "Gold-DWH-[UC]", None);

    let jobs = delete_jobs(&workspace, DEFAULT_SUFFIX, true).await.unwrap();
    let pipelines = delete_pipelines(&workspace, DEFAULT_SUFFIX, true).await.unwrap();

    assert_eq!(jobs, vec!["A-[UC]".to_string()]);
    assert_eq!(pipelines, vec!["Gold-DWH-[UC]".to_string()]);
    assert!(workspace.deleted_jobs().is_empty());
    assert!(workspace.deleted_pipelines().is_empty());
}

/// An empty suffix matches everything and is refused before listing
#[tokio::test]
async fn test_empty_suffix_is_rejected() {
    let workspace = MockWorkspace::new()
        .with_job(1, "A-[UC]", vec![])
        .with_job(2, "Prod ETL", vec![])
        .with_pipeline("p1", "Gold-DWH", None);

    let jobs = delete_jobs(&workspace, "", false).await.unwrap_err();
    let pipelines = delete_pipelines(&workspace, "", false).await.unwrap_err();

    assert!(matches!(jobs, DeleteError::EmptySuffix));
    assert!(matches!(pipelines, DeleteError::EmptySuffix));
    assert!(workspace.deleted_jobs().is_empty());
    assert!(workspace.deleted_pipelines().is_empty());
}
