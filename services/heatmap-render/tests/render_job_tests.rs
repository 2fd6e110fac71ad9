//! Tests for resolving and running heatmap render jobs.

use anyhow::Context;
use heatmap_common::HeatmapError;
use heatmap_render::{is_input_failure, load_points, RenderJob};
use renderer::HeatmapConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_run_writes_png() {
    let dir = TempDir::new().unwrap();
    let points = write(
        dir.path(),
        "points.json",
        r#"[[5.0, 5.0], {"x": 2.5, "y": 7.5}, [50.0, 50.0]]"#,
    );
    let output = dir.path().join("out.png");

    let job = RenderJob::resolve(
        None,
        Some("0,0,10,10"),
        Some("100,80"),
        points,
        output.clone(),
        HeatmapConfig::default(),
    )
    .unwrap();
    let summary = job.run().unwrap();

    assert_eq!(summary.points_read, 3);
    assert_eq!(summary.points_rendered, 2);

    let png = fs::read(&output).unwrap();
    assert_eq!(png.len(), summary.bytes_written);
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
}

#[test]
fn test_resolve_from_request_file() {
    let dir = TempDir::new().unwrap();
    let request = write(
        dir.path(),
        "request.json",
        r#"{"bbox": "-10,-10,10,10", "size": "64,32", "f": "image"}"#,
    );

    let job = RenderJob::resolve(
        Some(&request),
        None,
        None,
        dir.path().join("points.json"),
        dir.path().join("out.png"),
        HeatmapConfig::default(),
    )
    .unwrap();
    assert_eq!(job.size.width, 64);
    assert_eq!(job.size.height, 32);
    assert_eq!(job.extent.min_x, -10.0);
}

#[test]
fn test_explicit_size_overrides_request() {
    let dir = TempDir::new().unwrap();
    let request = write(dir.path(), "request.json", r#"{"bbox": "0,0,1,1", "size": "64,32"}"#);

    let job = RenderJob::resolve(
        Some(&request),
        None,
        Some("10,10"),
        dir.path().join("points.json"),
        dir.path().join("out.png"),
        HeatmapConfig::default(),
    )
    .unwrap();
    assert_eq!((job.size.width, job.size.height), (10, 10));
}

#[test]
fn test_missing_extent_is_error() {
    let result = RenderJob::resolve(
        None,
        None,
        Some("10,10"),
        PathBuf::from("points.json"),
        PathBuf::from("out.png"),
        HeatmapConfig::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_degenerate_extent_is_error() {
    let result = RenderJob::resolve(
        None,
        Some("3,0,3,10"),
        Some("10,10"),
        PathBuf::from("points.json"),
        PathBuf::from("out.png"),
        HeatmapConfig::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_bad_points_file_is_error() {
    let dir = TempDir::new().unwrap();
    let points = write(dir.path(), "points.json", r#"{"not": "an array"}"#);
    assert!(load_points(&points).is_err());
    assert!(load_points(&dir.path().join("missing.json")).is_err());
}

// ============================================================================
// Failure classification
// ============================================================================

#[test]
fn test_missing_and_degenerate_extent_are_input_failures() {
    for bbox in [None, Some("3,0,3,10"), Some("0,0,abc,1")] {
        let err = RenderJob::resolve(
            None,
            bbox,
            Some("10,10"),
            PathBuf::from("points.json"),
            PathBuf::from("out.png"),
            HeatmapConfig::default(),
        )
        .unwrap_err();
        assert!(is_input_failure(&err), "bbox {:?}: {:#}", bbox, err);
    }
}

#[test]
fn test_bad_opacity_is_input_failure() {
    let err = RenderJob::resolve(
        None,
        Some("0,0,1,1"),
        Some("10,10"),
        PathBuf::from("points.json"),
        PathBuf::from("out.png"),
        HeatmapConfig { opacity: 1.5 },
    )
    .unwrap_err();
    assert!(is_input_failure(&err));
}

#[test]
fn test_malformed_points_is_input_failure() {
    let dir = TempDir::new().unwrap();
    let points = write(dir.path(), "points.json", r#"[[1.0]]"#);
    let job = RenderJob::resolve(
        None,
        Some("0,0,10,10"),
        Some("10,10"),
        points,
        dir.path().join("out.png"),
        HeatmapConfig::default(),
    )
    .unwrap();
    assert!(is_input_failure(&job.run().unwrap_err()));
}

#[test]
fn test_io_and_render_failures_are_not_input_failures() {
    let dir = TempDir::new().unwrap();
    let missing = load_points(&dir.path().join("missing.json")).unwrap_err();
    assert!(!is_input_failure(&missing));

    let render = anyhow::Error::from(HeatmapError::RenderFailure("canvas".into()));
    assert!(!is_input_failure(&render));

    let wrapped: anyhow::Result<()> =
        Err(HeatmapError::ResourceUnavailable("dot".into())).context("rendering heatmap");
    assert!(!is_input_failure(&wrapped.unwrap_err()));
}
