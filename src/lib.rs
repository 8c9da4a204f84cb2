//! Extract dominant colors from images and lay them out as labeled swatch sheets.
//!
//! The quantization itself is delegated to [color_quant]: the source image is
//! downsampled to a small working resolution, reduced to an adaptive palette of
//! the requested size, and the palette entries are ranked by how many pixels
//! map to each of them.
//!
//! [color_quant]: https://github.com/image-rs/color_quant

#![deny(missing_docs)]

pub use error::{Error, Result};
pub use palette::{dominant_colors, parse_color_count, sort_by_rgb, Swatch};

pub mod error;
mod font;
pub mod palette;
pub mod sheet;
