//! Core data types for shellac
//!
//! These types represent the domain model and flow through the pipeline.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

// =============================================================================
// Geometry
// =============================================================================

/// A detected circle in processing-frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center x (pixels)
    pub x: f32,
    /// Center y (pixels)
    pub y: f32,
    /// Radius (pixels)
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    /// Map this circle back to source-image coordinates by undoing the
    /// normalization scale factor.
    pub fn to_source(self, scale_factor: f64) -> Circle {
        Circle {
            x: (self.x as f64 / scale_factor) as f32,
            y: (self.y as f64 / scale_factor) as f32,
            radius: (self.radius as f64 / scale_factor) as f32,
        }
    }
}

/// Select the circle with the strictly largest radius.
///
/// Ties keep the first candidate in scan order, so repeated runs over the
/// same detection output always pick the same circle.
pub fn largest_circle(circles: &[Circle]) -> Option<Circle> {
    let mut best: Option<Circle> = None;
    for &circle in circles {
        match best {
            Some(b) if circle.radius <= b.radius => {}
            _ => best = Some(circle),
        }
    }
    best
}

// =============================================================================
// Processing frame
// =============================================================================

/// The fixed-size working buffer produced by the geometric normalizer.
///
/// The source image is drawn scaled into the top-left corner; the rest of
/// the square canvas stays transparent. `scale_factor` maps detection
/// geometry back to source-image coordinates.
#[derive(Debug, Clone)]
pub struct ProcessingFrame {
    /// Square RGBA working buffer (`size` x `size`)
    pub frame: RgbaImage,
    /// Ratio of processing size to the larger source dimension (> 0)
    pub scale_factor: f64,
    /// Width of the scaled source content within the frame
    pub scaled_width: u32,
    /// Height of the scaled source content within the frame
    pub scaled_height: u32,
}

impl ProcessingFrame {
    /// Side length of the square working buffer
    pub fn size(&self) -> u32 {
        self.frame.width()
    }
}

// =============================================================================
// Colors
// =============================================================================

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    /// CSS `rgb(r, g, b)` string for display surfaces
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}

/// Background/foreground pair derived from a label image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageColors {
    /// Dominant color sampled from the label
    pub background: Rgb,
    /// High-contrast text color (pure white or pure black)
    pub foreground: Rgb,
}

// =============================================================================
// Record metadata
// =============================================================================

/// Resolved record metadata, shaped like the `/api/record/:identifier`
/// payload: `{identifier, title, imageUrl, mp3Url}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInfo {
    pub identifier: String,
    pub title: String,
    pub image_url: String,
    pub mp3_url: String,
}
