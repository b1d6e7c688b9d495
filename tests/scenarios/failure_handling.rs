//! Test: Failure handling - the first error aborts the run

use crate::helpers::*;
use bundle_export::core::resource::{PipelineDetails, Task};
use bundle_export::{ExportError, Exporter, WorkspaceError};

/// A failing remote fetch stops the export before jobs are touched
#[tokio::test]
async fn test_remote_failure_aborts_export() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let workspace = MockWorkspace::new()
        .with_pipeline("p1", "Gold-DWH", None)
        .with_pipeline("p2", "Broken", None)
        .with_job(11, "Nightly", vec![Some(Task::pipeline("refresh", "p1"))])
        .failing_pipeline("p2");

    let exporter = Exporter::new(workspace, config.clone());
    let err = exporter.export_all().await.unwrap_err();

    match err {
        ExportError::Remote(WorkspaceError::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("Expected remote API error, got {:?}", other),
    }

    // Files written before the failure are not rolled back
    assert_eq!(
        dir_listing(&config.output.pipelines_dir),
        vec!["DLT-Gold-DWH-UC.yml".to_string()]
    );
    assert!(!config.output.jobs_dir.exists());
}

/// A pipeline without a definition is malformed remote data
#[tokio::test]
async fn test_pipeline_without_spec_is_malformed() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let workspace = MockWorkspace::new().with_pipeline_details(PipelineDetails {
        pipeline_id: "p9".to_string(),
        name: Some("Ghost".to_string()),
        spec: None,
    });

    let exporter = Exporter::new(workspace, config);
    let err = exporter.export_pipelines().await.unwrap_err();

    assert!(matches!(err, ExportError::MalformedRemote(_)));
    assert!(err.to_string().contains("p9"));
}

/// An unwritable output location is reported as an I/O error
#[tokio::test]
async fn test_unwritable_output_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = test_config(tmp.path());
    // A regular file where the directory should be
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    config.output.pipelines_dir = blocker.join("DLT");

    let workspace = MockWorkspace::new().with_pipeline("p1", "Gold-DWH", None);
    let exporter = Exporter::new(workspace, config);
    let err = exporter.export_pipelines().await.unwrap_err();

    assert!(matches!(err, ExportError::Io { .. }));
}
