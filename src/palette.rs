//! Dominant-color extraction via adaptive palette quantization.

use std::fmt;

use color_quant::NeuQuant;
use image::{imageops::FilterType, DynamicImage, Rgb};
use itertools::Itertools;

use crate::error::{Error, Result};

/// Side length the source image is downsampled to before quantization.
///
/// Bounds the quantization cost independent of the source resolution, at the
/// cost of losing colors confined to small regions.
pub const WORKING_SIZE: u32 = 80;

/// Largest palette NeuQuant can produce.
pub const MAX_COLORS: usize = 256;

/// NeuQuant sample quality, 1 (slowest) to 30 (fastest). 10 is a good default.
const QUALITY: i32 = 10;

/// One dominant color together with its pixel population in the downsampled
/// image.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub struct Swatch {
    /// The palette color.
    pub color: Rgb<u8>,
    /// Number of downsampled pixels that quantize to this palette entry.
    pub population: usize,
}

impl Swatch {
    /// Hex representation, `#rrggbb` with lowercase zero-padded digits.
    pub fn hex(&self) -> String {
        let Rgb([r, g, b]) = self.color;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, {} pixels", self.hex(), self.population)
    }
}

/// Parse the color count as entered in the UI field.
///
/// A malformed field is reported as a recoverable [`Error::ColorCount`] like
/// any other input error.
pub fn parse_color_count(field: &str) -> Result<usize> {
    field
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|count| (1..=MAX_COLORS).contains(count))
        .ok_or_else(|| Error::ColorCount {
            value: field.trim().to_string(),
        })
}

/// Extract the `count` most dominant colors of `image`.
///
/// The image is downsampled to [`WORKING_SIZE`]² and quantized to an adaptive
/// palette of exactly `count` entries. Every downsampled pixel participates.
/// The returned swatches are ordered by descending population (palette order
/// breaks ties, so the result is deterministic for a given image and count)
/// and always have length `count`; entries no pixel maps to come back with a
/// population of zero, and distinct entries may resolve to the same RGB value.
pub fn dominant_colors(image: &DynamicImage, count: usize) -> Result<Vec<Swatch>> {
    if !(1..=MAX_COLORS).contains(&count) {
        return Err(Error::ColorCount {
            value: count.to_string(),
        });
    }

    let small = image
        .resize_exact(WORKING_SIZE, WORKING_SIZE, FilterType::Triangle)
        .to_rgba8();

    let quantizer = NeuQuant::new(QUALITY, count, small.as_raw());

    let populations = small
        .pixels()
        .map(|pixel| quantizer.index_of(&pixel.0))
        .counts();

    let mut swatches: Vec<Swatch> = quantizer
        .color_map_rgb()
        .chunks_exact(3)
        .take(count)
        .enumerate()
        .map(|(index, rgb)| Swatch {
            color: Rgb([rgb[0], rgb[1], rgb[2]]),
            population: populations.get(&index).copied().unwrap_or(0),
        })
        .collect();

    // Stable sort: equal populations keep their palette order.
    swatches.sort_by(|a, b| b.population.cmp(&a.population));

    debug_assert_eq!(swatches.len(), count);
    Ok(swatches)
}

/// Reorder swatches ascending by their (R, G, B) tuple, the display order.
pub fn sort_by_rgb(swatches: &mut [Swatch]) {
    swatches.sort_by_key(|swatch| (swatch.color[0], swatch.color[1], swatch.color[2]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn striped_image() -> DynamicImage {
        let stripes = [
            Rgb([255, 0, 0]),
            Rgb([0, 255, 0]),
            Rgb([0, 0, 255]),
            Rgb([255, 255, 0]),
        ];
        DynamicImage::ImageRgb8(RgbImage::from_fn(160, 160, |x, _| {
            stripes[(x / 40) as usize]
        }))
    }

    #[test]
    fn returns_exactly_the_requested_count() {
        let image = striped_image();
        for count in [1, 4, 16, 32] {
            let swatches = dominant_colors(&image, count).unwrap();
            assert_eq!(swatches.len(), count);
        }
    }

    #[test]
    fn orders_by_descending_population() {
        let swatches = dominant_colors(&striped_image(), 16).unwrap();
        assert!(swatches
            .windows(2)
            .all(|pair| pair[0].population >= pair[1].population));
    }

    #[test]
    fn extraction_is_deterministic() {
        let image = striped_image();
        let first = dominant_colors(&image, 12).unwrap();
        let second = dominant_colors(&image, 12).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_out_of_range_counts() {
        let image = striped_image();
        assert!(matches!(
            dominant_colors(&image, 0),
            Err(Error::ColorCount { .. })
        ));
        assert!(matches!(
            dominant_colors(&image, 257),
            Err(Error::ColorCount { .. })
        ));
    }

    #[test]
    fn sort_by_rgb_is_lexicographic() {
        let mut swatches = dominant_colors(&striped_image(), 16).unwrap();
        sort_by_rgb(&mut swatches);
        assert!(swatches.windows(2).all(|pair| {
            let a = pair[0].color;
            let b = pair[1].color;
            (a[0], a[1], a[2]) <= (b[0], b[1], b[2])
        }));
    }

    #[test]
    fn hex_is_lowercase_and_zero_padded() {
        let swatch = Swatch {
            color: Rgb([255, 0, 16]),
            population: 0,
        };
        assert_eq!(swatch.hex(), "#ff0010");
    }

    #[test]
    fn parse_color_count_accepts_integers_in_range() {
        assert_eq!(parse_color_count("10").unwrap(), 10);
        assert_eq!(parse_color_count(" 7 ").unwrap(), 7);
        assert_eq!(parse_color_count("256").unwrap(), 256);
    }

    #[test]
    fn parse_color_count_rejects_bad_input() {
        for field in ["", "abc", "0", "-3", "257", "4.5"] {
            assert!(matches!(
                parse_color_count(field),
                Err(Error::ColorCount { .. })
            ));
        }
    }
}
