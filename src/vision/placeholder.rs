//! Generated placeholder label for records with no detectable circle
//!
//! Draws a dark filled disc and renders the record title onto it with
//! bitmap glyphs: the title splits on the first " - " into a top and a
//! bottom half, each upper-cased, greedily word-wrapped to 80% of the
//! canvas width and vertically centered on its anchor line.

use crate::types::Rgb;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;

/// Fill color of the generated disc (dark green, #1a4731)
pub const PLACEHOLDER_BACKGROUND: Rgb = Rgb([0x1a, 0x47, 0x31]);
/// Text color on the generated disc
pub const PLACEHOLDER_FOREGROUND: Rgb = Rgb::WHITE;

/// Integer upscale of the 8x8 base glyph (32 px tall lines)
const GLYPH_SCALE: u32 = 4;
const GLYPH_SIZE: u32 = 8 * GLYPH_SCALE;
/// Vertical advance between wrapped lines
const LINE_HEIGHT: f32 = GLYPH_SIZE as f32 * 1.2;
/// Fraction of the canvas width a wrapped line may occupy
const MAX_WIDTH_FRAC: f32 = 0.8;
/// Vertical anchors for the two title halves
const TOP_ANCHOR: f32 = 0.35;
const BOTTOM_ANCHOR: f32 = 0.75;

/// Synthesize a circular label image from the record title.
///
/// Always succeeds, including for empty titles.
pub fn placeholder_label(title: &str, output_size: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(output_size, output_size);
    let center = (output_size / 2) as i32;
    let bg = PLACEHOLDER_BACKGROUND.0;
    draw_filled_circle_mut(
        &mut canvas,
        (center, center),
        center,
        Rgba([bg[0], bg[1], bg[2], 255]),
    );

    let (top, bottom) = split_title(title);
    let max_width = (output_size as f32 * MAX_WIDTH_FRAC) as u32;

    if !top.is_empty() {
        draw_text_block(
            &mut canvas,
            &top.to_uppercase(),
            output_size as f32 * TOP_ANCHOR,
            max_width,
        );
    }
    if !bottom.is_empty() {
        draw_text_block(
            &mut canvas,
            &bottom.to_uppercase(),
            output_size as f32 * BOTTOM_ANCHOR,
            max_width,
        );
    }

    canvas
}

/// Split a title on the first " - " delimiter.
///
/// Without a delimiter the whole title is the top half and the bottom half
/// is empty.
pub fn split_title(title: &str) -> (&str, &str) {
    match title.split_once(" - ") {
        Some((top, bottom)) => (top, bottom),
        None => (title, ""),
    }
}

/// Measured pixel width of a line of glyphs
fn measure(text: &str) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE
}

/// Greedy word wrap: words accumulate while the measured line width stays
/// under the limit. Matches the display layout: the accumulated width is
/// the sum of word widths, spaces excluded from the measurement.
pub fn wrap_lines(text: &str, max_width: u32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0u32;

    for word in text.split_whitespace() {
        let word_width = measure(word);
        if current.is_empty() {
            current = word.to_string();
            current_width = word_width;
        } else if current_width + word_width < max_width {
            current.push(' ');
            current.push_str(word);
            current_width += word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
            current_width = word_width;
        }
    }
    lines.push(current);
    lines
}

/// Draw a wrapped block of text horizontally centered, vertically centered
/// on `anchor_y`.
fn draw_text_block(canvas: &mut RgbaImage, text: &str, anchor_y: f32, max_width: u32) {
    let lines = wrap_lines(text, max_width);
    let total_height = lines.len() as f32 * LINE_HEIGHT;
    let start_y = anchor_y - total_height / 2.0;

    for (i, line) in lines.iter().enumerate() {
        let line_center_y = start_y + i as f32 * LINE_HEIGHT;
        let x = (canvas.width() as i32 - measure(line) as i32) / 2;
        let y = (line_center_y - GLYPH_SIZE as f32 / 2.0) as i32;
        draw_glyph_line(canvas, line, x, y);
    }
}

/// Render one line of scaled 8x8 glyphs at (x, y), top-left anchored.
fn draw_glyph_line(canvas: &mut RgbaImage, text: &str, x: i32, y: i32) {
    let fg = PLACEHOLDER_FOREGROUND.0;
    let color = Rgba([fg[0], fg[1], fg[2], 255]);
    let scale = GLYPH_SCALE as i32;
    let mut cursor_x = x;

    for ch in text.chars() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            cursor_x += GLYPH_SIZE as i32;
            continue;
        };
        for (row_idx, row) in glyph.iter().enumerate() {
            let row_bits = *row;
            for col_idx in 0..8i32 {
                if (row_bits >> col_idx) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col_idx * scale;
                let py = y + row_idx as i32 * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        let tx = px + sx;
                        let ty = py + sy;
                        if tx >= 0
                            && ty >= 0
                            && (tx as u32) < canvas.width()
                            && (ty as u32) < canvas.height()
                        {
                            canvas.put_pixel(tx as u32, ty as u32, color);
                        }
                    }
                }
            }
        }
        cursor_x += GLYPH_SIZE as i32;
    }
}
