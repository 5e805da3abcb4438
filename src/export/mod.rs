//! Export of analysis artifacts
//!
//! Writes the label PNG, the detection overlay PNG, and a JSON report.
//! All writes go through a temp-file-then-rename pattern so an interrupted
//! run never leaves a truncated artifact behind.

use crate::config::Settings;
use crate::error::{Result, ShellacError};
use crate::pipeline::AnalyzedRecord;
use crate::types::{Circle, PageColors, RecordInfo};
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// JSON report schema version
const SCHEMA_VERSION: &str = "1.0";

/// Paths of the written artifacts
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub label: PathBuf,
    pub overlay: Option<PathBuf>,
    pub report: PathBuf,
}

/// Top-level JSON report structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportJson {
    /// Schema version for forward compatibility
    pub version: String,
    /// shellac version that generated this report
    pub generator_version: String,
    /// Timestamp of the analysis
    pub analyzed_at: String,
    /// Resolved record metadata, when the record came from the archive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordInfo>,
    pub title: String,
    pub label_detected: bool,
    /// Detected circle in source-image coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circle: Option<Circle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<PageColors>,
    /// Platter frame assets for the flip-book cycle
    pub platter_frames: Vec<String>,
}

/// Write all artifacts for an analyzed record into the output directory.
pub fn write_outputs(record: &AnalyzedRecord, settings: &Settings) -> Result<ExportPaths> {
    std::fs::create_dir_all(&settings.output).map_err(|e| ShellacError::Output {
        path: settings.output.clone(),
        reason: e.to_string(),
    })?;

    let label_path = settings.output.join("label.png");
    write_png(&record.label, &label_path)?;

    let overlay_path = match &record.overlay {
        Some(overlay) => {
            let path = settings.output.join("overlay.png");
            write_png(overlay, &path)?;
            Some(path)
        }
        None => None,
    };

    let report_path = settings.output.join("report.json");
    write_report(record, settings, &report_path)?;

    info!(
        "wrote {} artifact(s) to {}",
        2 + overlay_path.is_some() as usize,
        settings.output.display()
    );

    Ok(ExportPaths {
        label: label_path,
        overlay: overlay_path,
        report: report_path,
    })
}

/// Atomic PNG write: encode to a temp file, then rename into place.
fn write_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    let temp_path = output_path.with_extension("png.tmp");

    let cleanup_and_error = |reason: String| -> ShellacError {
        let _ = std::fs::remove_file(&temp_path);
        ShellacError::Output {
            path: output_path.to_path_buf(),
            reason,
        }
    };

    let file = File::create(&temp_path).map_err(|e| ShellacError::Output {
        path: output_path.to_path_buf(),
        reason: format!("failed to create temp file: {e}"),
    })?;
    let mut writer = BufWriter::new(file);
    image
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|e| cleanup_and_error(format!("PNG encode error: {e}")))?;
    drop(writer);

    std::fs::rename(&temp_path, output_path)
        .map_err(|e| cleanup_and_error(format!("failed to finalize file: {e}")))?;
    Ok(())
}

/// Atomic JSON report write.
fn write_report(record: &AnalyzedRecord, settings: &Settings, output_path: &Path) -> Result<()> {
    let temp_path = output_path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| ShellacError::Output {
        path: output_path.to_path_buf(),
        reason: format!("failed to create temp file: {e}"),
    })?;
    let writer = BufWriter::new(file);

    let sequence = crate::animation::PlatterSequence::new(settings.animation.platter_frames);
    let report = ReportJson {
        version: SCHEMA_VERSION.to_string(),
        generator_version: env!("CARGO_PKG_VERSION").to_string(),
        analyzed_at: chrono::Utc::now().to_rfc3339(),
        record: record.info.clone(),
        title: record.title.clone(),
        label_detected: record.label_detected,
        circle: record.circle_source,
        colors: record.colors,
        platter_frames: sequence.frame_names(),
    };

    serde_json::to_writer_pretty(writer, &report).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        ShellacError::Output {
            path: output_path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    std::fs::rename(&temp_path, output_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        ShellacError::Output {
            path: output_path.to_path_buf(),
            reason: format!("failed to finalize file: {e}"),
        }
    })?;

    info!("wrote report to {}", output_path.display());
    Ok(())
}
