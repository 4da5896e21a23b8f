//! PNG encoding of the final image.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use tracing::debug;

use crate::{EngineError, Result};

/// MIME type of everything [`encode_png`] produces.
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Encode `img` as a PNG with the default compression level and filter.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    let mut buf = Vec::new();

    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EngineError::Encode(e.to_string()))?;

    debug!(width, height, bytes = buf.len(), "Encoded PNG");
    Ok(buf)
}
