//! Pipeline orchestration
//!
//! Coordinates record resolution, the label-isolation pipeline, color
//! derivation, export, and the optional headless animation run. Detection
//! and extraction failures degrade to the generated placeholder label;
//! fetch and decode failures abort the record load.

use crate::animation::AnimationSession;
use crate::archive::{normalize_identifier, HttpFetcher, RecordFetcher};
use crate::config::{RecordSource, Settings};
use crate::error::{Result, ShellacError};
use crate::export;
use crate::types::{largest_circle, Circle, PageColors, RecordInfo};
use crate::vision::color::{self, HistogramSampler};
use crate::vision::placeholder::{
    placeholder_label, PLACEHOLDER_BACKGROUND, PLACEHOLDER_FOREGROUND,
};
use crate::vision::{extract, normalize, CircleDetector, ColorSampler, GradientHoughDetector};
use image::RgbaImage;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Everything the display needs for one analyzed record.
#[derive(Debug, Clone)]
pub struct AnalyzedRecord {
    /// Resolved metadata (absent for local files without an identifier)
    pub info: Option<RecordInfo>,
    /// Record title driving the placeholder label
    pub title: String,
    /// The square label image (extracted circle or placeholder)
    pub label: RgbaImage,
    /// Whether a circular label was detected in the photo
    pub label_detected: bool,
    /// Detected circle in source-image coordinates
    pub circle_source: Option<Circle>,
    /// Copy of the source photo with the detection stroked on it
    pub overlay: Option<RgbaImage>,
    /// Page colors derived from the label (None when sampling failed)
    pub colors: Option<PageColors>,
}

/// Pipeline result summary
#[derive(Debug)]
pub struct PipelineResult {
    pub title: String,
    pub label_detected: bool,
    pub report_path: std::path::PathBuf,
}

/// Run the full pipeline for the configured record source.
pub fn run(settings: &Settings) -> Result<PipelineResult> {
    let started = Instant::now();

    // Phase 1: resolve the record photo
    let (info, title, source_image) = load_record(settings)?;

    // Phase 2: label isolation + colors
    let analysis_start = Instant::now();
    let record = analyze(&source_image, info, &title, settings)?;
    info!(
        detected = record.label_detected,
        "analysis completed in {:.2}s",
        analysis_start.elapsed().as_secs_f64()
    );

    // Phase 3: export
    let paths = export::write_outputs(&record, settings)?;

    // Phase 4: optional headless animation
    if let Some(duration) = settings.simulate {
        simulate_animation(duration, settings);
    }

    info!(
        "total pipeline time: {:.2}s",
        started.elapsed().as_secs_f64()
    );

    Ok(PipelineResult {
        title: record.title,
        label_detected: record.label_detected,
        report_path: paths.report,
    })
}

/// Resolve the configured source into (metadata, title, photo).
fn load_record(settings: &Settings) -> Result<(Option<RecordInfo>, String, RgbaImage)> {
    match &settings.source {
        RecordSource::Identifier(raw) => {
            let identifier = normalize_identifier(raw)?;
            let fetcher = HttpFetcher::new();
            let info = fetcher.fetch_record(&identifier)?;
            let image = fetcher.fetch_image(&info.image_url)?;
            let title = info.title.clone();
            Ok((Some(info), title, image))
        }
        RecordSource::File { path, title } => {
            let image = image::open(path)
                .map_err(|e| ShellacError::InvalidImage {
                    reason: format!("could not open '{}': {e}", path.display()),
                })?
                .to_rgba8();
            let title = title.clone().unwrap_or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Unknown Record".to_string())
            });
            Ok((None, title, image))
        }
    }
}

/// Run the label-isolation pipeline over one record photo.
///
/// Internal detection/extraction failures select the placeholder path
/// instead of propagating; only a malformed source image is an error.
pub fn analyze(
    source: &RgbaImage,
    info: Option<RecordInfo>,
    title: &str,
    settings: &Settings,
) -> Result<AnalyzedRecord> {
    let frame = normalize::normalize(source, settings.processing_size)?;
    debug!(
        scale_factor = frame.scale_factor,
        width = frame.scaled_width,
        height = frame.scaled_height,
        "normalized photo"
    );

    let detector = GradientHoughDetector::new(settings.hough);
    let circles = detector.detect(&frame);

    let extracted = largest_circle(&circles).and_then(|circle| {
        match extract::extract_label(&frame, circle, settings.output_size) {
            Ok(label) => Some((circle, label)),
            Err(e) => {
                // Treated the same as an empty detection
                warn!("label extraction failed, using placeholder: {e}");
                None
            }
        }
    });

    let record = match extracted {
        Some((circle, label)) => {
            let circle_source = circle.to_source(frame.scale_factor);
            info!(
                x = circle_source.x.round() as f64,
                y = circle_source.y.round() as f64,
                radius = circle_source.radius.round() as f64,
                "label detected"
            );
            let overlay = extract::source_overlay(source, circle_source);
            let colors = match color::derive_page_colors(&HistogramSampler, &label) {
                Ok(colors) => Some(colors),
                Err(e) => {
                    warn!("{} sampler failed: {e}", HistogramSampler.name());
                    None
                }
            };
            AnalyzedRecord {
                info,
                title: title.to_string(),
                label,
                label_detected: true,
                circle_source: Some(circle_source),
                overlay: Some(overlay),
                colors,
            }
        }
        None => {
            info!("no circles detected, generating placeholder label");
            let label = placeholder_label(title, settings.output_size);
            AnalyzedRecord {
                info,
                title: title.to_string(),
                label,
                label_detected: false,
                circle_source: None,
                overlay: None,
                // The generated label's colors are known without sampling
                colors: Some(PageColors {
                    background: PLACEHOLDER_BACKGROUND,
                    foreground: PLACEHOLDER_FOREGROUND,
                }),
            }
        }
    };

    Ok(record)
}

/// Drive one animation session headlessly for the requested duration.
fn simulate_animation(duration: Duration, settings: &Settings) {
    let mut session = AnimationSession::new(settings.animation);
    info!(
        "simulating playback for {:.1}s at {:.2} deg/tick",
        duration.as_secs_f64(),
        settings.animation.rotation_step_degrees
    );

    session.on_play();
    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        thread::sleep(Duration::from_millis(250).min(duration));
        let state = session.state();
        debug!(
            "platter state: {:.1} deg, frame {}",
            state.rotation_degrees,
            session.sequence().frame_name(state.frame_index)
        );
    }
    session.on_ended();

    let state = session.state();
    info!(
        "simulated {:.1} degrees of rotation ({:.2} revolutions)",
        state.rotation_degrees,
        state.rotation_degrees / 360.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use imageproc::drawing::draw_filled_circle_mut;

    fn test_settings() -> Settings {
        Settings::default()
    }

    fn disc_photo() -> RgbaImage {
        let mut photo = RgbaImage::from_pixel(800, 800, Rgba([22, 18, 16, 255]));
        draw_filled_circle_mut(&mut photo, (400, 400), 200, Rgba([226, 218, 200, 255]));
        photo
    }

    #[test]
    fn disc_photo_takes_the_extraction_path() {
        let record = analyze(&disc_photo(), None, "Test Record", &test_settings()).unwrap();
        assert!(record.label_detected);
        assert!(record.circle_source.is_some());
        assert!(record.overlay.is_some());
        assert_eq!(record.label.dimensions(), (600, 600));

        let circle = record.circle_source.unwrap();
        assert!((circle.x - 400.0).abs() < 20.0);
        assert!((circle.radius - 200.0).abs() < 20.0);
    }

    #[test]
    fn featureless_photo_takes_the_placeholder_path() {
        let photo = RgbaImage::from_pixel(800, 600, Rgba([40, 40, 40, 255]));
        let record = analyze(&photo, None, "Artist - Song", &test_settings()).unwrap();
        assert!(!record.label_detected);
        assert!(record.circle_source.is_none());
        assert!(record.overlay.is_none());
        assert_eq!(
            record.colors,
            Some(PageColors {
                background: PLACEHOLDER_BACKGROUND,
                foreground: PLACEHOLDER_FOREGROUND,
            })
        );
    }

    #[test]
    fn zero_sized_photo_is_a_hard_error() {
        let photo = RgbaImage::new(0, 0);
        assert!(analyze(&photo, None, "x", &test_settings()).is_err());
    }
}
