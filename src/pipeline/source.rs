use image::DynamicImage;

use crate::error::{LeafHealthError, Result};

/// Image acquisition helpers.
///
/// Decoding is delegated to the `image` crate (PNG/JPEG/BMP/GIF); failures
/// surface as `InvalidImage` so callers can reject the input before any
/// features are computed.

/// Decodes image bytes (e.g. an HTTP upload) into a raster.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(LeafHealthError::InvalidImage("no image data".into()));
    }
    image::load_from_memory(bytes).map_err(|e| LeafHealthError::InvalidImage(e.to_string()))
}

/// Opens and decodes an image file, guessing the format from its contents.
pub fn load_image(path: &str) -> Result<DynamicImage> {
    let reader = image::io::Reader::open(path)
        .map_err(|e| LeafHealthError::InvalidImage(format!("{}: {}", path, e)))?
        .with_guessed_format()
        .map_err(|e| LeafHealthError::InvalidImage(format!("{}: {}", path, e)))?;
    reader.decode().map_err(|e| LeafHealthError::InvalidImage(format!("{}: {}", path, e)))
}
