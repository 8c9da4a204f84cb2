//! Error types shared by extraction and sheet rendering.

use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while extracting colors or exporting a sheet.
#[derive(Error, Debug)]
pub enum Error {
    /// The image could not be decoded (or re-encoded for export).
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The requested color count is not an integer in `1..=256`.
    #[error("invalid color count {value:?}: expected an integer between 1 and 256")]
    ColorCount {
        /// The offending input, verbatim.
        value: String,
    },

    /// A sheet export was requested with no colors to draw.
    #[error("no colors to render")]
    EmptySheet,

    /// Writing the exported sheet to disk failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
