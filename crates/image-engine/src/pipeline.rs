//! Full transform: decode → resolve size → resize/letterbox → adjust → encode.

use std::io::Cursor;
use std::time::Instant;

use image::{DynamicImage, ImageReader, RgbaImage};
use tracing::debug;

use crate::dimensions::{TargetSize, resolve_target_size};
use crate::params::{ProcessParams, ResizeMode};
use crate::{EngineError, Result, adjust, compose, encode, resize};

/// Result of a successful transform.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    /// PNG-encoded output.
    pub data: Vec<u8>,
    /// Decoded source dimensions (width, height).
    pub original_size: (u32, u32),
    /// Output dimensions (width, height).
    pub output_size: (u32, u32),
}

impl ProcessedImage {
    pub fn content_type(&self) -> &'static str {
        encode::PNG_CONTENT_TYPE
    }
}

/// Run the whole pipeline over raw upload bytes.
pub fn process_image(data: &[u8], params: &ProcessParams) -> Result<ProcessedImage> {
    let start = Instant::now();

    let src = decode_image(data)?;
    let original_size = (src.width(), src.height());
    debug!(
        width = original_size.0,
        height = original_size.1,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Decoded"
    );

    let target = resolve_target_size(params.width, params.height, original_size, params.aspect)?;

    let resized = resize_to_target(&src, target, params);
    debug!(
        target_w = target.width,
        target_h = target.height,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Resized"
    );

    let adjusted = apply_adjustments(resized, params);
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Adjusted");

    let data = encode::encode_png(&adjusted)?;
    debug!(
        bytes = data.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Encoded"
    );

    Ok(ProcessedImage {
        data,
        original_size,
        output_size: adjusted.dimensions(),
    })
}

/// Decode upload bytes, guessing the format from the content.
pub fn decode_image(data: &[u8]) -> Result<DynamicImage> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| EngineError::InvalidImage(e.to_string()))?
        .decode()
        .map_err(|e| EngineError::InvalidImage(e.to_string()))
}

/// Map the source onto the target size according to the resize mode.
///
/// - `Fit`: centre crop, exact size.
/// - `Default` with a fill colour: letterbox on a solid canvas, exact size.
/// - `Default` without one: stretch, exact size.
pub fn resize_to_target(
    src: &DynamicImage,
    target: TargetSize,
    params: &ProcessParams,
) -> RgbaImage {
    let TargetSize { width, height } = target;
    match (params.resize, params.fill) {
        (ResizeMode::Fit, _) => resize::fill(src, width, height).into_rgba8(),
        (ResizeMode::Default, Some(color)) => compose::letterbox(src, width, height, color),
        (ResizeMode::Default, None) => resize::stretch(src, width, height).into_rgba8(),
    }
}

/// Contrast first, then sharpen.
pub fn apply_adjustments(mut img: RgbaImage, params: &ProcessParams) -> RgbaImage {
    adjust::adjust_contrast(&mut img, params.contrast);
    adjust::sharpen(&img, params.sharpen_sigma())
}
