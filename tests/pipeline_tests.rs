//! Integration tests for the shellac pipeline
//!
//! These tests run the full photo-to-label pipeline against synthetic
//! record photos and verify the exported artifacts.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use shellac::config::{RecordSource, Settings};
use shellac::pipeline;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Paint a bright disc on a dark background and save it as a PNG.
///
/// This mimics a typical shelf photo of a 78: dark surroundings with
/// the record face as the one strong circular feature.
fn generate_record_photo(path: &Path, width: u32, height: u32, cx: i32, cy: i32, radius: i32) {
    let mut photo = RgbaImage::from_pixel(width, height, Rgba([18, 18, 18, 255]));
    draw_filled_circle_mut(&mut photo, (cx, cy), radius, Rgba([232, 214, 182, 255]));
    photo.save(path).expect("Failed to write test photo");
}

/// Create test settings pointed at a local photo
fn create_test_settings(photo: &Path, title: Option<&str>, output: &Path) -> Settings {
    Settings {
        source: RecordSource::File {
            path: photo.to_path_buf(),
            title: title.map(str::to_string),
        },
        output: output.to_path_buf(),
        ..Settings::default()
    }
}

fn read_report(output_dir: &Path) -> serde_json::Value {
    let json_content =
        fs::read_to_string(output_dir.join("report.json")).expect("Failed to read report");
    serde_json::from_str(&json_content).expect("Report should be valid JSON")
}

#[test]
fn test_pipeline_detects_label_and_writes_artifacts() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");

    // 800x800 photo, disc centered at (400, 400) with radius 250.
    // Normalization scales this by 0.8, landing the circle well inside
    // the detector's radius band.
    let photo = input_dir.path().join("record.png");
    generate_record_photo(&photo, 800, 800, 400, 400, 250);

    let settings = create_test_settings(&photo, Some("Victor - My Blue Heaven"), output_dir.path());
    let result = pipeline::run(&settings).expect("Pipeline should succeed");

    assert!(result.label_detected, "Disc photo should yield a detection");
    assert_eq!(result.title, "Victor - My Blue Heaven");

    // All three artifacts exist
    let label_path = output_dir.path().join("label.png");
    let overlay_path = output_dir.path().join("overlay.png");
    assert!(label_path.exists(), "label.png should exist");
    assert!(overlay_path.exists(), "overlay.png should exist");
    assert!(result.report_path.exists(), "report.json should exist");

    // Label is the fixed output square
    let label = image::open(&label_path).expect("label.png should decode");
    assert_eq!(label.width(), 600, "Label should be 600 wide");
    assert_eq!(label.height(), 600, "Label should be 600 tall");

    // Overlay keeps the source photo dimensions
    let overlay = image::open(&overlay_path).expect("overlay.png should decode");
    assert_eq!(overlay.width(), 800);
    assert_eq!(overlay.height(), 800);
}

#[test]
fn test_report_structure_for_detected_label() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");

    let photo = input_dir.path().join("record.png");
    generate_record_photo(&photo, 800, 800, 400, 400, 250);

    let settings = create_test_settings(&photo, Some("Okeh - Heebie Jeebies"), output_dir.path());
    pipeline::run(&settings).expect("Pipeline should succeed");

    let report = read_report(output_dir.path());
    assert!(report.is_object(), "Root should be an object");
    assert!(report.get("version").is_some(), "Should have version field");
    assert!(
        report.get("generator_version").is_some(),
        "Should have generator_version field"
    );
    assert!(
        report.get("analyzed_at").is_some(),
        "Should have analyzed_at field"
    );
    assert_eq!(report["title"], "Okeh - Heebie Jeebies");
    assert_eq!(report["label_detected"], true);

    // Circle is reported in source coordinates, near the painted center
    let circle = report.get("circle").expect("Should have circle field");
    let x = circle["x"].as_f64().unwrap();
    let y = circle["y"].as_f64().unwrap();
    let radius = circle["radius"].as_f64().unwrap();
    assert!((x - 400.0).abs() < 25.0, "Circle x {} should be near 400", x);
    assert!((y - 400.0).abs() < 25.0, "Circle y {} should be near 400", y);
    assert!(
        (radius - 250.0).abs() < 40.0,
        "Circle radius {} should be near 250",
        radius
    );

    // A cream-colored label against black gets black foreground text
    let colors = report.get("colors").expect("Should have colors field");
    assert_eq!(colors["foreground"], serde_json::json!([0, 0, 0]));

    // Flip-book frame listing, zero-padded
    let frames = report["platter_frames"]
        .as_array()
        .expect("platter_frames should be an array");
    assert_eq!(frames.len(), 30, "Should list 30 platter frames");
    assert_eq!(frames[0], "platter000.png");
    assert_eq!(frames[29], "platter029.png");
}

#[test]
fn test_featureless_photo_falls_back_to_placeholder() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");

    // Flat image: no edges, no circles
    let photo = input_dir.path().join("flat.png");
    let flat = RgbaImage::from_pixel(500, 500, Rgba([90, 90, 90, 255]));
    flat.save(&photo).expect("Failed to write test photo");

    let settings = create_test_settings(&photo, Some("Unknown Label - Test Side"), output_dir.path());
    let result = pipeline::run(&settings).expect("Pipeline should succeed");

    assert!(!result.label_detected, "Flat photo should not yield a detection");

    // Placeholder label is still exported, but no overlay
    assert!(output_dir.path().join("label.png").exists());
    assert!(
        !output_dir.path().join("overlay.png").exists(),
        "overlay.png should not exist without a detection"
    );

    let report = read_report(output_dir.path());
    assert_eq!(report["label_detected"], false);
    assert!(report.get("circle").is_none(), "No circle without a detection");

    // Placeholder colors are the fixed green-and-white pairing
    let colors = report.get("colors").expect("Should have colors field");
    assert_eq!(colors["background"], serde_json::json!([0x1a, 0x47, 0x31]));
    assert_eq!(colors["foreground"], serde_json::json!([255, 255, 255]));
}

#[test]
fn test_title_falls_back_to_file_stem() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");

    let photo = input_dir.path().join("brunswick_3912.png");
    let flat = RgbaImage::from_pixel(300, 300, Rgba([90, 90, 90, 255]));
    flat.save(&photo).expect("Failed to write test photo");

    let settings = create_test_settings(&photo, None, output_dir.path());
    let result = pipeline::run(&settings).expect("Pipeline should succeed");

    assert_eq!(result.title, "brunswick_3912");
}

#[test]
fn test_handles_corrupt_image_file() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");

    let bogus = input_dir.path().join("not_an_image.png");
    fs::write(&bogus, b"This is not a PNG file at all!!").expect("Failed to write file");

    let settings = create_test_settings(&bogus, None, output_dir.path());
    let result = pipeline::run(&settings);

    assert!(result.is_err(), "Corrupt image should be a hard error");
}

#[test]
fn test_handles_nonexistent_photo_gracefully() {
    let output_dir = TempDir::new().expect("Failed to create output temp dir");

    let settings = create_test_settings(
        Path::new("/nonexistent/path/record.png"),
        None,
        output_dir.path(),
    );
    let result = pipeline::run(&settings);

    assert!(
        result.is_err(),
        "Pipeline should return error for nonexistent photo"
    );
}

#[test]
fn test_output_directory_is_created() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_root = TempDir::new().expect("Failed to create output temp dir");

    let photo = input_dir.path().join("flat.png");
    let flat = RgbaImage::from_pixel(200, 200, Rgba([60, 60, 60, 255]));
    flat.save(&photo).expect("Failed to write test photo");

    // Nested directory that does not exist yet
    let nested = output_root.path().join("runs").join("latest");
    let settings = create_test_settings(&photo, Some("Test"), &nested);
    pipeline::run(&settings).expect("Pipeline should succeed");

    assert!(nested.join("report.json").exists(), "Output dir should be created");
}
