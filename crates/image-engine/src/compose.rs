//! Composition utilities: solid canvases and centred overlays for letterboxing.

use image::{DynamicImage, RgbaImage, imageops};
use tracing::debug;

use crate::params::FillColor;
use crate::resize;

/// Create an opaque canvas of `width`x`height` filled with `color`.
pub fn solid_canvas(width: u32, height: u32, color: FillColor) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color.to_rgba())
}

/// Scale `img` to fit inside `width`x`height` and centre it on a solid canvas.
///
/// The canvas is always exactly `width`x`height` and fully opaque; the
/// source is blended over it source-over. The offset uses integer halves of
/// both sizes, so odd leftovers put the extra pixel on the right/bottom edge.
pub fn letterbox(img: &DynamicImage, width: u32, height: u32, color: FillColor) -> RgbaImage {
    let fitted = resize::fit_within(img, width, height).into_rgba8();
    let mut canvas = solid_canvas(width, height, color);

    let x = (width / 2).saturating_sub(fitted.width() / 2);
    let y = (height / 2).saturating_sub(fitted.height() / 2);
    debug!(
        width,
        height,
        inner_w = fitted.width(),
        inner_h = fitted.height(),
        x,
        y,
        "Letterboxing onto fill colour"
    );

    imageops::overlay(&mut canvas, &fitted, i64::from(x), i64::from(y));

    // Source-over onto an opaque canvas is opaque; f32 blending can land on 254.
    for pixel in canvas.pixels_mut() {
        pixel[3] = 255;
    }
    canvas
}
