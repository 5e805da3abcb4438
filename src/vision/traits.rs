//! Vision trait abstractions
//!
//! These traits define the seams for swappable detection and color
//! sampling backends without changing pipeline code.

use crate::error::Result;
use crate::types::{Circle, ProcessingFrame, Rgb};
use image::RgbaImage;

/// Circle detection backend
pub trait CircleDetector: Send + Sync {
    /// Detect candidate circles in a processing frame.
    ///
    /// An empty result means "no label found" and is not an error.
    fn detect(&self, frame: &ProcessingFrame) -> Vec<Circle>;

    /// Get the name of this detector (for logging)
    fn name(&self) -> &'static str;
}

/// Dominant-color sampling backend
pub trait ColorSampler: Send + Sync {
    /// Return the single most representative RGB color of a bitmap.
    fn dominant(&self, image: &RgbaImage) -> Result<Rgb>;

    /// Get the name of this sampler (for logging)
    fn name(&self) -> &'static str;
}
