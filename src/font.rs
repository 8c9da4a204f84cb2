//! Caption fonts for the exported sheet.
//!
//! Prefers a TrueType face found at a well-known system path; when none is
//! available, falls back to a built-in 5×7 bitmap glyph set that covers the
//! characters a hex caption needs (`#`, `0-9`, `a-f`).

use std::fs;

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

/// Caption size in pixels when drawn with a system font.
const FONT_SIZE: f32 = 16.0;

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const GLYPH_WIDTH: u32 = 5;
const GLYPH_SCALE: u32 = 2;
const GLYPH_ADVANCE: i32 = (GLYPH_WIDTH * GLYPH_SCALE + 2) as i32;

pub enum CaptionFont {
    System(FontVec),
    Bitmap,
}

impl CaptionFont {
    /// Probe the system font paths, falling back to the bitmap glyphs.
    pub fn load() -> Self {
        for path in SYSTEM_FONTS {
            if let Ok(bytes) = fs::read(path) {
                if let Ok(font) = FontVec::try_from_vec(bytes) {
                    log::debug!("caption font: {path}");
                    return CaptionFont::System(font);
                }
            }
        }
        log::debug!("no system font found, using built-in bitmap glyphs");
        CaptionFont::Bitmap
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        match self {
            CaptionFont::System(font) => {
                draw_text_mut(canvas, color, x, y, PxScale::from(FONT_SIZE), font, text);
            }
            CaptionFont::Bitmap => draw_bitmap_text(canvas, color, x, y, text),
        }
    }
}

fn draw_bitmap_text(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
    let mut cursor = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().copied().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1u8 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    for dy in 0..GLYPH_SCALE {
                        for dx in 0..GLYPH_SCALE {
                            let px = cursor + (col * GLYPH_SCALE + dx) as i32;
                            let py = y + (row as u32 * GLYPH_SCALE + dy) as i32;
                            if px >= 0
                                && py >= 0
                                && (px as u32) < canvas.width()
                                && (py as u32) < canvas.height()
                            {
                                canvas.put_pixel(px as u32, py as u32, color);
                            }
                        }
                    }
                }
            }
        }
        cursor += GLYPH_ADVANCE;
    }
}

/// 5×7 glyphs, one bit per pixel, MSB-first in the low five bits of each row.
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'a' => [0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'b' => [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b11110],
        'c' => [0b00000, 0b00000, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110],
        'd' => [0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10001, 0b01111],
        'e' => [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        'f' => [0b00110, 0b01001, 0b01000, 0b11100, 0b01000, 0b01000, 0b01000],
        _ => return None,
    };
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_glyphs_cover_hex_captions() {
        for c in "#0123456789abcdef".chars() {
            assert!(glyph(c).is_some(), "missing glyph for {c:?}");
        }
        assert!(glyph('g').is_none());
    }

    #[test]
    fn bitmap_text_marks_pixels_and_clips_at_edges() {
        let mut canvas = RgbImage::from_pixel(40, 20, Rgb([255, 255, 255]));
        draw_bitmap_text(&mut canvas, Rgb([0, 0, 0]), 0, 0, "#f");
        assert!(canvas.pixels().any(|p| *p == Rgb([0, 0, 0])));

        // Off-canvas coordinates must not panic.
        draw_bitmap_text(&mut canvas, Rgb([0, 0, 0]), -6, 15, "#000000");
    }
}
