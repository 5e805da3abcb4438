//! Geometric normalization of arbitrarily-sized record photos
//!
//! Detection runs over a fixed-size square buffer so the Hough parameters
//! stay meaningful across wildly different scan resolutions. The photo is
//! scaled uniformly so its larger dimension lands exactly on the
//! processing size, drawn into the top-left of the square canvas, and the
//! scale factor is recorded so detected geometry can be mapped back to
//! source coordinates.

use crate::error::{Result, ShellacError};
use crate::types::ProcessingFrame;
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Normalize a source image into a square processing frame.
///
/// The larger axis lands exactly on `processing_size`; the remaining area
/// of the canvas is left transparent (top-left placement, not letterboxed).
pub fn normalize(source: &RgbaImage, processing_size: u32) -> Result<ProcessingFrame> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(ShellacError::InvalidImage {
            reason: format!("zero-sized source image ({width}x{height})"),
        });
    }

    let (scale_factor, scaled_width, scaled_height) = if width > height {
        let scale = processing_size as f64 / width as f64;
        (
            scale,
            processing_size,
            (height as f64 * scale).round() as u32,
        )
    } else {
        let scale = processing_size as f64 / height as f64;
        (scale, (width as f64 * scale).round() as u32, processing_size)
    };

    let scaled = imageops::resize(source, scaled_width, scaled_height, FilterType::Triangle);

    let mut frame = RgbaImage::new(processing_size, processing_size);
    imageops::replace(&mut frame, &scaled, 0, 0);

    Ok(ProcessingFrame {
        frame,
        scale_factor,
        scaled_width,
        scaled_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_scales_width_to_processing_size() {
        let source = RgbaImage::new(800, 600);
        let frame = normalize(&source, 640).unwrap();
        assert_eq!(frame.scale_factor, 0.8);
        assert_eq!(frame.scaled_width, 640);
        assert_eq!(frame.scaled_height, 480);
        assert!(frame.scaled_height <= frame.scaled_width);
        assert_eq!(frame.frame.dimensions(), (640, 640));
    }

    #[test]
    fn portrait_scales_height_to_processing_size() {
        let source = RgbaImage::new(600, 800);
        let frame = normalize(&source, 640).unwrap();
        assert_eq!(frame.scale_factor, 0.8);
        assert_eq!(frame.scaled_width, 480);
        assert_eq!(frame.scaled_height, 640);
    }

    #[test]
    fn square_source_fills_both_axes() {
        let source = RgbaImage::new(1000, 1000);
        let frame = normalize(&source, 640).unwrap();
        assert_eq!(frame.scaled_width, 640);
        assert_eq!(frame.scaled_height, 640);
    }

    #[test]
    fn content_lands_top_left_rest_stays_transparent() {
        let source = RgbaImage::from_pixel(800, 600, image::Rgba([200, 10, 10, 255]));
        let frame = normalize(&source, 640).unwrap();
        assert_eq!(frame.frame.get_pixel(0, 0).0[3], 255);
        // Below the scaled content the canvas is untouched
        assert_eq!(frame.frame.get_pixel(0, 500).0[3], 0);
    }

    #[test]
    fn zero_dimension_source_is_rejected() {
        let source = RgbaImage::new(0, 100);
        assert!(normalize(&source, 640).is_err());
    }
}
