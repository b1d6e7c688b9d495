//! Test: Full resync of the output directories

use crate::helpers::*;
use bundle_export::core::resource::Task;
use bundle_export::Exporter;

fn workspace() -> MockWorkspace {
    MockWorkspace::new()
        .with_pipeline("p1", "Gold-DWH", Some("s3://sales-bucket/x"))
        .with_pipeline("p2", "Silver", None)
        .with_job(11, "Nightly", vec![Some(Task::pipeline("refresh", "p1"))])
}

/// Exporting twice gives the same files as exporting once
#[tokio::test]
async fn test_export_twice_is_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = test_config_with_mapping(tmp.path(), &[("s3://sales", "Sales")]);
    config.output.full_resync = true;

    let exporter = Exporter::new(workspace(), config.clone());

    exporter.export_all().await.unwrap();
    let first_pipelines = dir_snapshot(&config.output.pipelines_dir);
    let first_jobs = dir_snapshot(&config.output.jobs_dir);

    exporter.export_all().await.unwrap();
    assert_eq!(dir_snapshot(&config.output.pipelines_dir), first_pipelines);
    assert_eq!(dir_snapshot(&config.output.jobs_dir), first_jobs);
    assert_eq!(first_pipelines.len(), 2);
    assert_eq!(first_jobs.len(), 1);
}

/// Files of objects that no longer exist are removed on resync
#[tokio::test]
async fn test_resync_removes_stale_files() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = test_config(tmp.path());
    config.output.full_resync = true;

    std::fs::create_dir_all(&config.output.pipelines_dir).unwrap();
    std::fs::create_dir_all(&config.output.jobs_dir).unwrap();
    std::fs::write(config.output.pipelines_dir.join("DLT-Retired-UC.yml"), "stale").unwrap();
    std::fs::write(config.output.jobs_dir.join("JOB-Retired-UC.yml"), "stale").unwrap();

    let exporter = Exporter::new(workspace(), config.clone());
    exporter.export_all().await.unwrap();

    assert_eq!(
        dir_listing(&config.output.pipelines_dir),
        vec!["DLT-Gold-DWH-UC.yml".to_string(), "DLT-Silver-UC.yml".to_string()]
    );
    assert_eq!(
        dir_listing(&config.output.jobs_dir),
        vec!["JOB-Nightly-UC.yml".to_string()]
    );
}

/// Without resync, unrelated files stay
#[tokio::test]
async fn test_without_resync_existing_files_stay() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());

    std::fs::create_dir_all(&config.output.jobs_dir).unwrap();
    std::fs::write(config.output.jobs_dir.join("JOB-Handwritten.yml"), "kept").unwrap();

    let exporter = Exporter::new(workspace(), config.clone());
    exporter.export_all().await.unwrap();

    assert_eq!(
        dir_listing(&config.output.jobs_dir),
        vec!["JOB-Handwritten.yml".to_string(), "JOB-Nightly-UC.yml".to_string()]
    );
}
