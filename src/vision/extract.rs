//! Label extraction: mask, crop and re-center the detected circle
//!
//! Everything outside the circle becomes transparent, a bounding square of
//! side `2r` (clamped to the frame) is cropped, and the crop is resized
//! into a fixed-size transparent output canvas. The clamping near frame
//! edges deliberately changes the effective aspect ratio of the crop; that
//! is the established policy for labels photographed near the disc edge.

use crate::error::{Result, ShellacError};
use crate::types::{Circle, ProcessingFrame};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};
use tracing::debug;

/// Stroke width of the detection overlay drawn on the source image
const OVERLAY_STROKE: i32 = 10;
const OVERLAY_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// Cut the circular label out of the processing frame.
///
/// The resized crop lands at the origin of the transparent output canvas,
/// matching the established output layout.
pub fn extract_label(
    frame: &ProcessingFrame,
    circle: Circle,
    output_size: u32,
) -> Result<RgbaImage> {
    let (frame_width, frame_height) = frame.frame.dimensions();
    if circle.radius <= 0.0 {
        return Err(ShellacError::InvalidImage {
            reason: "cannot extract a zero-radius circle".to_string(),
        });
    }

    // Binary mask: white inside the circle, black elsewhere
    let mut mask = GrayImage::new(frame_width, frame_height);
    draw_filled_circle_mut(
        &mut mask,
        (circle.x.round() as i32, circle.y.round() as i32),
        circle.radius.round() as i32,
        Luma([255u8]),
    );

    // Copy frame pixels through the mask; outside pixels become transparent
    let mut masked = RgbaImage::new(frame_width, frame_height);
    for (x, y, pixel) in frame.frame.enumerate_pixels() {
        if mask.get_pixel(x, y).0[0] > 0 {
            masked.put_pixel(x, y, *pixel);
        }
    }

    let region = crop_region(circle, frame_width, frame_height);
    debug!(
        x = region.0,
        y = region.1,
        width = region.2,
        height = region.3,
        "cropping label region"
    );
    let crop = imageops::crop_imm(&masked, region.0, region.1, region.2, region.3).to_image();

    // Area averaging when shrinking; bilinear when the crop is smaller
    // than the output
    let resized = if region.2 >= output_size && region.3 >= output_size {
        imageops::thumbnail(&crop, output_size, output_size)
    } else {
        imageops::resize(&crop, output_size, output_size, FilterType::Triangle)
    };

    let mut label = RgbaImage::new(output_size, output_size);
    imageops::replace(&mut label, &resized, 0, 0);
    Ok(label)
}

/// Bounding square of side `2r` around the circle, clamped so it never
/// reads outside the frame.
pub fn crop_region(circle: Circle, frame_width: u32, frame_height: u32) -> (u32, u32, u32, u32) {
    let diameter = (circle.radius * 2.0).round() as i64;
    let left = (circle.x - circle.radius).round() as i64;
    let top = (circle.y - circle.radius).round() as i64;

    let x = left.max(0);
    let y = top.max(0);
    let width = (frame_width as i64 - x).min(diameter).max(1);
    let height = (frame_height as i64 - y).min(diameter).max(1);

    (x as u32, y as u32, width as u32, height as u32)
}

/// Draw the detected circle, mapped back to source coordinates, on a copy
/// of the original photo.
pub fn source_overlay(source: &RgbaImage, circle_source: Circle) -> RgbaImage {
    let mut overlay = source.clone();
    let center = (
        circle_source.x.round() as i32,
        circle_source.y.round() as i32,
    );
    let radius = circle_source.radius.round() as i32;
    // Fixed-width stroke regardless of photo resolution
    for offset in -(OVERLAY_STROKE / 2)..=(OVERLAY_STROKE / 2) {
        let r = radius + offset;
        if r > 0 {
            draw_hollow_circle_mut(&mut overlay, center, r, OVERLAY_COLOR);
        }
    }
    overlay
}
