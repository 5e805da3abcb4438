//! Dominant color sampling and contrast selection
//!
//! The dominant color comes from a coarse palette quantization over the
//! opaque pixels of the label. The foreground color is whichever of pure
//! white or pure black has the higher WCAG contrast ratio against it.

use crate::error::{Result, ShellacError};
use crate::types::{PageColors, Rgb};
use crate::vision::traits::ColorSampler;
use image::RgbaImage;

/// Pixels with alpha below this are ignored during sampling
const OPAQUE_THRESHOLD: u8 = 128;
/// Bits kept per channel when bucketing colors
const QUANT_BITS: u32 = 4;

/// Palette-quantization dominant color sampler.
///
/// Buckets opaque pixels into a 4-bit-per-channel histogram and averages
/// the pixels of the fullest bucket. Deterministic: bucket ties keep the
/// lowest bucket index.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramSampler;

impl ColorSampler for HistogramSampler {
    fn dominant(&self, image: &RgbaImage) -> Result<Rgb> {
        let shift = 8 - QUANT_BITS;
        let buckets = 1usize << (3 * QUANT_BITS);
        let mut counts = vec![0u32; buckets];
        let mut sums = vec![[0u64; 3]; buckets];

        for pixel in image.pixels() {
            let [r, g, b, a] = pixel.0;
            if a < OPAQUE_THRESHOLD {
                continue;
            }
            let key = (((r >> shift) as usize) << (2 * QUANT_BITS))
                | (((g >> shift) as usize) << QUANT_BITS)
                | ((b >> shift) as usize);
            counts[key] += 1;
            sums[key][0] += r as u64;
            sums[key][1] += g as u64;
            sums[key][2] += b as u64;
        }

        let (best, &count) = counts
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .ok_or_else(|| ShellacError::ColorExtraction {
                reason: "empty histogram".to_string(),
            })?;
        if count == 0 {
            return Err(ShellacError::ColorExtraction {
                reason: "no opaque pixels to sample".to_string(),
            });
        }

        let sum = sums[best];
        let n = count as u64;
        Ok(Rgb([
            (sum[0] / n) as u8,
            (sum[1] / n) as u8,
            (sum[2] / n) as u8,
        ]))
    }

    fn name(&self) -> &'static str {
        "histogram-quantization"
    }
}

/// WCAG relative luminance of an sRGB color.
pub fn relative_luminance(color: Rgb) -> f64 {
    let linearize = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linearize(color.0[0]) + 0.7152 * linearize(color.0[1]) + 0.0722 * linearize(color.0[2])
}

/// WCAG contrast ratio between two luminances.
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + 0.05) / (darker + 0.05)
}

/// Pick pure white or pure black, whichever contrasts more with the
/// background color.
pub fn contrast_color(background: Rgb) -> Rgb {
    let bg = relative_luminance(background);
    let white = contrast_ratio(relative_luminance(Rgb::WHITE), bg);
    let black = contrast_ratio(relative_luminance(Rgb::BLACK), bg);
    if white > black {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}

/// Derive the page color pair for a label image.
pub fn derive_page_colors(sampler: &dyn ColorSampler, label: &RgbaImage) -> Result<PageColors> {
    let background = sampler.dominant(label)?;
    Ok(PageColors {
        background,
        foreground: contrast_color(background),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn white_background_gets_black_text() {
        assert_eq!(contrast_color(Rgb::WHITE), Rgb::BLACK);
    }

    #[test]
    fn black_background_gets_white_text() {
        assert_eq!(contrast_color(Rgb::BLACK), Rgb::WHITE);
    }

    #[test]
    fn dark_green_disc_gets_white_text() {
        assert_eq!(contrast_color(Rgb([0x1a, 0x47, 0x31])), Rgb::WHITE);
    }

    #[test]
    fn luminance_matches_reference_points() {
        assert!((relative_luminance(Rgb::WHITE) - 1.0).abs() < 1e-9);
        assert!(relative_luminance(Rgb::BLACK).abs() < 1e-9);
    }

    #[test]
    fn dominant_color_of_a_flat_image() {
        let image = RgbaImage::from_pixel(64, 64, Rgba([200, 40, 30, 255]));
        let color = HistogramSampler.dominant(&image).unwrap();
        assert_eq!(color, Rgb([200, 40, 30]));
    }

    #[test]
    fn transparent_pixels_are_ignored() {
        let mut image = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 0]));
        for x in 0..10 {
            image.put_pixel(x, 0, Rgba([10, 20, 30, 255]));
        }
        let color = HistogramSampler.dominant(&image).unwrap();
        assert_eq!(color, Rgb([10, 20, 30]));
    }

    #[test]
    fn fully_transparent_image_is_a_recoverable_error() {
        let image = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 0]));
        let err = HistogramSampler.dominant(&image).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn mixed_image_picks_the_majority_color() {
        let mut image = RgbaImage::from_pixel(20, 20, Rgba([240, 240, 240, 255]));
        for x in 0..20 {
            for y in 0..5 {
                image.put_pixel(x, y, Rgba([20, 20, 20, 255]));
            }
        }
        let color = HistogramSampler.dominant(&image).unwrap();
        assert_eq!(color, Rgb([240, 240, 240]));
    }
}
