//! Image dimension and channel probing.
//!
//! Export always reads the image back from disk: the copy held by a GUI may be
//! stale or missing entirely.

use std::path::Path;

use image::{ImageDecoder, ImageReader};

use crate::error::LabelFileError;

/// Dimensions and channel depth of a source image, as written to VOC `<size>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageShape {
    pub height: u32,
    pub width: u32,
    /// 1 for grayscale images, 3 for everything else.
    pub depth: u8,
}

impl ImageShape {
    pub fn new(width: u32, height: u32, depth: u8) -> Self {
        Self {
            height,
            width,
            depth,
        }
    }

    pub fn is_grayscale(&self) -> bool {
        self.depth == 1
    }
}

/// Reads width, height and grayscale-ness from the image file at `path`.
///
/// Only the header is decoded; pixel data is never loaded.
pub fn probe_image(path: &Path) -> Result<ImageShape, LabelFileError> {
    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|source| LabelFileError::ImageOpen {
            path: path.to_path_buf(),
            source,
        })?;

    let decoder = reader
        .into_decoder()
        .map_err(|source| LabelFileError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;

    let (width, height) = decoder.dimensions();
    let depth = if decoder.color_type().has_color() { 3 } else { 1 };

    Ok(ImageShape::new(width, height, depth))
}
