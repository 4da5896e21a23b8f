//! Tonal adjustments applied after resizing: contrast, then sharpen.

use image::RgbaImage;
use image::imageops;
use tracing::debug;

/// Adjust contrast by `percentage` (-100..=100, values outside are clamped).
///
/// 0 leaves the image unchanged, positive values push channels away from
/// mid-grey and negative values pull them towards it. At 100 every channel
/// becomes either 0 or 255. Alpha is left alone.
pub fn adjust_contrast(img: &mut RgbaImage, percentage: f64) {
    let percentage = percentage.clamp(-100.0, 100.0);
    if percentage == 0.0 {
        return;
    }

    debug!(percentage, "Adjusting contrast");
    let lut = contrast_lut(percentage);
    for pixel in img.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            *channel = lut[usize::from(*channel)];
        }
    }
}

/// Build the 256-entry lookup table for a contrast percentage.
fn contrast_lut(percentage: f64) -> [u8; 256] {
    let v = (100.0 + percentage) / 100.0;
    let mut lut = [0u8; 256];

    for (i, entry) in lut.iter_mut().enumerate() {
        let x = i as f64 / 255.0 - 0.5;
        *entry = if (0.0..=1.0).contains(&v) {
            to_channel((0.5 + x * v) * 255.0)
        } else if v > 1.0 && v < 2.0 {
            to_channel((0.5 + x / (2.0 - v)) * 255.0)
        } else if i >= 128 {
            255
        } else {
            0
        };
    }

    lut
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Sharpen with an unsharp mask of the given Gaussian `sigma`.
///
/// Each pixel moves away from its blurred value by the same distance it
/// already differs from it. A sigma of zero or less is a no-op.
pub fn sharpen(img: &RgbaImage, sigma: f32) -> RgbaImage {
    if sigma <= 0.0 {
        return img.clone();
    }

    debug!(sigma, "Sharpening");
    imageops::unsharpen(img, sigma, 0)
}
