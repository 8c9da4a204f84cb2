//! Render an ordered color sequence as a swatch sheet and export it as PNG.
//!
//! The sheet is a fixed 10-column grid on a white canvas: each cell is a
//! 76×40 filled rectangle with the color's hex code captioned beneath it.

use std::fs;
use std::path::Path;

use image::{codecs::png::PngEncoder, Rgb, RgbImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

use crate::error::{Error, Result};
use crate::font::CaptionFont;
use crate::palette::Swatch;

/// Width of one color block in pixels.
pub const BLOCK_WIDTH: u32 = 76;
/// Height of one color block in pixels.
pub const BLOCK_HEIGHT: u32 = 40;
/// Horizontal and vertical padding between blocks.
pub const PADDING: u32 = 10;
/// Vertical space reserved beneath each block for the hex caption.
pub const CAPTION_HEIGHT: u32 = 20;
/// Number of grid columns.
pub const COLUMNS: u32 = 10;

const CELL_WIDTH: u32 = BLOCK_WIDTH + PADDING;
const CELL_HEIGHT: u32 = BLOCK_HEIGHT + PADDING + CAPTION_HEIGHT;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Canvas dimensions for a sheet of `count` colors.
///
/// The width is fixed at ten columns; the height grows one row per ten
/// colors, rounded up.
pub fn sheet_dimensions(count: usize) -> (u32, u32) {
    let rows = (count as u32).div_ceil(COLUMNS);
    (COLUMNS * CELL_WIDTH, rows * CELL_HEIGHT)
}

/// Draw the sheet for `swatches`, in the order given.
///
/// Fails with [`Error::EmptySheet`] when there is nothing to draw.
pub fn render(swatches: &[Swatch]) -> Result<RgbImage> {
    if swatches.is_empty() {
        return Err(Error::EmptySheet);
    }

    let (width, height) = sheet_dimensions(swatches.len());
    let mut canvas = RgbImage::from_pixel(width, height, WHITE);
    let font = CaptionFont::load();

    for (i, swatch) in swatches.iter().enumerate() {
        let x = (i as u32 % COLUMNS) * CELL_WIDTH;
        let y = (i as u32 / COLUMNS) * CELL_HEIGHT;
        draw_filled_rect_mut(
            &mut canvas,
            Rect::at(x as i32, y as i32).of_size(BLOCK_WIDTH, BLOCK_HEIGHT),
            swatch.color,
        );
        font.draw(
            &mut canvas,
            BLACK,
            x as i32 + 5,
            (y + BLOCK_HEIGHT) as i32 + 5,
            &swatch.hex(),
        );
    }

    Ok(canvas)
}

/// Render `swatches` and write the sheet to `path` as a PNG.
///
/// The image is encoded to memory first and written in one shot; if the
/// write fails, any partial file is removed so a failure never leaves a
/// file behind.
pub fn save(swatches: &[Swatch], path: &Path) -> Result<()> {
    let canvas = render(swatches)?;

    let mut buffer = Vec::new();
    canvas.write_with_encoder(PngEncoder::new(&mut buffer))?;

    if let Err(err) = fs::write(path, &buffer) {
        let _ = fs::remove_file(path);
        return Err(err.into());
    }

    log::info!("saved {} swatches to {}", swatches.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swatch(r: u8, g: u8, b: u8) -> Swatch {
        Swatch {
            color: Rgb([r, g, b]),
            population: 1,
        }
    }

    #[test]
    fn dimensions_round_rows_up() {
        assert_eq!(sheet_dimensions(1), (860, 70));
        assert_eq!(sheet_dimensions(10), (860, 70));
        assert_eq!(sheet_dimensions(11), (860, 140));
        assert_eq!(sheet_dimensions(23), (860, 210));
    }

    #[test]
    fn render_rejects_empty_input() {
        assert!(matches!(render(&[]), Err(Error::EmptySheet)));
    }

    #[test]
    fn render_fills_blocks_and_leaves_padding_white() {
        let sheet = render(&[swatch(200, 10, 10)]).unwrap();
        assert_eq!((sheet.width(), sheet.height()), (860, 70));
        assert_eq!(*sheet.get_pixel(0, 0), Rgb([200, 10, 10]));
        assert_eq!(*sheet.get_pixel(75, 39), Rgb([200, 10, 10]));
        // First pixel past the block, and the far corner, stay white.
        assert_eq!(*sheet.get_pixel(76, 0), WHITE);
        assert_eq!(*sheet.get_pixel(859, 69), WHITE);
    }

    #[test]
    fn second_row_starts_after_one_full_cell() {
        let swatches: Vec<Swatch> = (0..11).map(|i| swatch(i as u8 * 20, 0, 0)).collect();
        let sheet = render(&swatches).unwrap();
        assert_eq!(*sheet.get_pixel(0, CELL_HEIGHT), swatches[10].color);
    }

    #[test]
    fn save_writes_a_decodable_png() {
        let path = std::env::temp_dir().join("swatchsheet-save-test.png");
        save(&[swatch(1, 2, 3), swatch(4, 5, 6)], &path).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (860, 70));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn save_with_no_colors_writes_no_file() {
        let path = std::env::temp_dir().join("swatchsheet-empty-test.png");
        assert!(matches!(save(&[], &path), Err(Error::EmptySheet)));
        assert!(!path.exists());
    }
}
