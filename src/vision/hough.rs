//! Circular Hough detection over the processing frame
//!
//! Gradient-style Hough transform: Canny edge pixels vote along their
//! Sobel gradient direction into a 2-D center accumulator, peaks above
//! the accumulator threshold become candidate centers (nearby centers
//! suppressed by `min_dist`), and each surviving center picks the radius
//! with the strongest edge support. Analysis is read-only over the frame.

use crate::types::{Circle, ProcessingFrame};
use crate::vision::traits::CircleDetector;
use image::imageops;
use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::median_filter;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Median blur aperture applied before edge detection (NxN window)
const MEDIAN_APERTURE: u32 = 5;

/// Circle detection parameters.
///
/// Fixed for the current display scope, exposed as named options so the
/// detector stays tunable from configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HoughParams {
    /// Inverse accumulator resolution (1 = full frame resolution)
    pub dp: u32,
    /// Minimum distance between accepted circle centers (pixels)
    pub min_dist: f32,
    /// Canny high threshold; the low threshold is half of this
    pub param1: f32,
    /// Accumulator vote threshold for a candidate center
    pub param2: u32,
    /// Minimum accepted radius (pixels)
    pub min_radius: u32,
    /// Maximum accepted radius (pixels)
    pub max_radius: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            dp: 1,
            min_dist: 200.0,
            param1: 150.0,
            param2: 50,
            min_radius: 100,
            max_radius: 350,
        }
    }
}

/// Gradient-voting circle detector.
#[derive(Debug, Clone, Default)]
pub struct GradientHoughDetector {
    params: HoughParams,
}

impl GradientHoughDetector {
    pub fn new(params: HoughParams) -> Self {
        Self { params }
    }
}

impl CircleDetector for GradientHoughDetector {
    fn detect(&self, frame: &ProcessingFrame) -> Vec<Circle> {
        let blurred = median_filter(&frame.frame, MEDIAN_APERTURE / 2, MEDIAN_APERTURE / 2);
        let gray = imageops::grayscale(&blurred);
        let circles = hough_circles(&gray, &self.params);
        debug!(candidates = circles.len(), "circle detection complete");
        circles
    }

    fn name(&self) -> &'static str {
        "gradient-hough"
    }
}

/// Run the Hough circle transform on a grayscale image.
///
/// Returns candidate circles ordered by accumulator score (highest first).
/// An empty result is a valid "no label found" outcome.
pub fn hough_circles(gray: &GrayImage, params: &HoughParams) -> Vec<Circle> {
    let (width, height) = gray.dimensions();
    if width < 4 || height < 4 || params.min_radius > params.max_radius {
        return Vec::new();
    }

    let edges = canny(gray, params.param1 / 2.0, params.param1);
    let gx = horizontal_sobel(gray);
    let gy = vertical_sobel(gray);

    let dp = params.dp.max(1);
    let acc_width = (width / dp).max(1) as usize;
    let acc_height = (height / dp).max(1) as usize;
    let mut accum = vec![0u32; acc_width * acc_height];

    // Edge pixels vote for potential centers along the gradient line in
    // both directions, one vote per radius step.
    let mut edge_points: Vec<(u32, u32)> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if edges.get_pixel(x, y).0[0] == 0 {
                continue;
            }
            let dx = gx.get_pixel(x, y).0[0] as f32;
            let dy = gy.get_pixel(x, y).0[0] as f32;
            let magnitude = (dx * dx + dy * dy).sqrt();
            if magnitude < 1e-3 {
                continue;
            }
            edge_points.push((x, y));

            let (ux, uy) = (dx / magnitude, dy / magnitude);
            for sign in [-1.0f32, 1.0] {
                let mut radius = params.min_radius as f32;
                while radius <= params.max_radius as f32 {
                    let cx = x as f32 + sign * ux * radius;
                    let cy = y as f32 + sign * uy * radius;
                    if cx >= 0.0 && cy >= 0.0 && cx < width as f32 && cy < height as f32 {
                        // `dp` may not divide the frame size; votes in the
                        // remainder strip fold into the last accumulator cell
                        let ax = (cx as usize / dp as usize).min(acc_width - 1);
                        let ay = (cy as usize / dp as usize).min(acc_height - 1);
                        accum[ay * acc_width + ax] += 1;
                    }
                    radius += 1.0;
                }
            }
        }
    }

    // Local-maximum peaks above the vote threshold, best first
    let mut peaks: Vec<(u32, usize, usize)> = Vec::new();
    for ay in 1..acc_height.saturating_sub(1) {
        for ax in 1..acc_width.saturating_sub(1) {
            let votes = accum[ay * acc_width + ax];
            if votes < params.param2 {
                continue;
            }
            let is_peak = (-1i32..=1)
                .flat_map(|oy| (-1i32..=1).map(move |ox| (ox, oy)))
                .filter(|&(ox, oy)| (ox, oy) != (0, 0))
                .all(|(ox, oy)| {
                    let nx = (ax as i32 + ox) as usize;
                    let ny = (ay as i32 + oy) as usize;
                    accum[ny * acc_width + nx] <= votes
                });
            if is_peak {
                peaks.push((votes, ax, ay));
            }
        }
    }
    peaks.sort_by(|a, b| b.0.cmp(&a.0));

    // Greedy min-dist suppression, then radius estimation per center
    let mut circles: Vec<Circle> = Vec::new();
    for (_votes, ax, ay) in peaks {
        let cx = (ax as u32 * dp) as f32 + dp as f32 / 2.0;
        let cy = (ay as u32 * dp) as f32 + dp as f32 / 2.0;
        let too_close = circles
            .iter()
            .any(|c| ((c.x - cx).powi(2) + (c.y - cy).powi(2)).sqrt() < params.min_dist);
        if too_close {
            continue;
        }
        if let Some(radius) = estimate_radius(&edge_points, cx, cy, params) {
            circles.push(Circle::new(cx, cy, radius));
        }
    }

    circles
}

/// Pick the radius with the strongest edge support around a center.
fn estimate_radius(edge_points: &[(u32, u32)], cx: f32, cy: f32, params: &HoughParams) -> Option<f32> {
    let bins = (params.max_radius - params.min_radius) as usize + 1;
    let mut histogram = vec![0u32; bins];
    for &(x, y) in edge_points {
        let distance = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
        let bin = distance.round() as i64 - params.min_radius as i64;
        if bin >= 0 && (bin as usize) < bins {
            histogram[bin as usize] += 1;
        }
    }

    let (best_bin, &support) = histogram
        .iter()
        .enumerate()
        .max_by_key(|&(_, &count)| count)?;
    if support == 0 {
        return None;
    }
    Some((params.min_radius as usize + best_bin) as f32)
}
