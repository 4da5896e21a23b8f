//! Resampling onto the target size.
//!
//! All operations use Lanczos3 filtering.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

/// Scale and centre-crop `img` so it covers exactly `width`x`height`.
///
/// The source aspect ratio is kept; whatever overflows the target is cut
/// evenly from both sides. No letterboxing.
pub fn fill(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    debug!(
        orig_w = img.width(),
        orig_h = img.height(),
        width,
        height,
        "Filling target with centre crop"
    );
    img.resize_to_fill(width, height, FilterType::Lanczos3)
}

/// Scale `img` down to fit inside `width`x`height`, keeping its aspect ratio.
///
/// A source that already fits is returned unchanged; this never enlarges.
/// The side that hits the box is taken exactly and the other is truncated,
/// never rounded up, with a floor of 1 pixel.
pub fn fit_within(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (orig_w, orig_h) = (img.width(), img.height());

    if orig_w <= width && orig_h <= height {
        debug!(orig_w, orig_h, width, height, "Image already fits, skipping resize");
        return img.clone();
    }

    let (new_width, new_height) = fit_dimensions((orig_w, orig_h), (width, height));
    debug!(
        orig_w,
        orig_h,
        new_width,
        new_height,
        "Scaling image to fit target"
    );

    img.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

/// Largest size with the source's aspect ratio that fits in `bounds`.
fn fit_dimensions((src_w, src_h): (u32, u32), (max_w, max_h): (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = (u64::from(src_w.max(1)), u64::from(src_h.max(1)));
    let (max_w, max_h) = (u64::from(max_w), u64::from(max_h));

    let (w, h) = if src_w * max_h > max_w * src_h {
        (max_w, max_w * src_h / src_w)
    } else {
        (max_h * src_w / src_h, max_h)
    };
    // both are bounded by max_w / max_h, so they fit in u32
    (w.max(1) as u32, h.max(1) as u32)
}

/// Resize `img` to exactly `width`x`height`, ignoring its aspect ratio.
pub fn stretch(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (orig_w, orig_h) = (img.width(), img.height());

    if orig_w == width && orig_h == height {
        debug!(width, height, "Image already at target size, skipping resize");
        return img.clone();
    }

    debug!(orig_w, orig_h, width, height, "Stretching image to target size");
    img.resize_exact(width, height, FilterType::Lanczos3)
}
