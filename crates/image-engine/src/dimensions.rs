//! Target size resolution: aspect-ratio lock followed by the maximum-dimension clamp.
//!
//! Fixed ratios use integer arithmetic (multiply, then truncate), so the
//! result is the largest box that fits the request rather than an exact
//! ratio. For example `16:9` at 200x100 gives 177x100 (100 * 16 / 9 = 177.7).

use tracing::debug;

use crate::params::AspectRatio;
use crate::{EngineError, MAX_DIMENSION, Result};

/// Output size chosen for a request. Both sides are in `1..=MAX_DIMENSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

/// Resolve the output size for a request.
///
/// `width` and `height` are the requested (already defaulted) dimensions and
/// `original` is the decoded source size.
pub fn resolve_target_size(
    width: i64,
    height: i64,
    original: (u32, u32),
    aspect: Option<AspectRatio>,
) -> Result<TargetSize> {
    if width <= 0 {
        return Err(EngineError::invalid_param("width", "must be positive"));
    }
    if height <= 0 {
        return Err(EngineError::invalid_param("height", "must be positive"));
    }

    let (w, h) = match aspect.map(AspectRatio::fixed_terms) {
        Some(Some((rw, rh))) => (
            width.min(height.saturating_mul(rw) / rh),
            height.min(width.saturating_mul(rh) / rw),
        ),
        Some(None) => keep_original_ratio(width, height, original)?,
        None => (width, height),
    };

    let (w, h) = clamp_to_max(w, h, i64::from(MAX_DIMENSION));
    if w <= 0 || h <= 0 {
        return Err(EngineError::invalid_param(
            "dimensions",
            format!("resolved target size {w}x{h} has a zero side"),
        ));
    }

    debug!(
        width,
        height,
        aspect = aspect.map(AspectRatio::as_tag),
        target_w = w,
        target_h = h,
        "Resolved target size"
    );

    Ok(TargetSize {
        width: w as u32,
        height: h as u32,
    })
}

/// Scale the request down so it keeps the source aspect ratio.
///
/// The side that is "too long" relative to the source is shrunk; the other
/// side is kept as requested.
fn keep_original_ratio(width: i64, height: i64, original: (u32, u32)) -> Result<(i64, i64)> {
    let (orig_w, orig_h) = original;
    if orig_w == 0 || orig_h == 0 {
        return Err(EngineError::invalid_param(
            "image",
            format!("source size {orig_w}x{orig_h} has a zero side"),
        ));
    }

    let orig_ratio = f64::from(orig_w) / f64::from(orig_h);
    let req_ratio = width as f64 / height as f64;

    if req_ratio > orig_ratio {
        Ok(((height as f64 * orig_ratio) as i64, height))
    } else {
        Ok((width, (width as f64 / orig_ratio) as i64))
    }
}

/// Proportionally clamp a size so neither side exceeds `max`.
///
/// Width is clamped first, then height, each step preserving the ratio of
/// the pair it was given. Applying it to an already clamped pair is a no-op.
pub fn clamp_to_max(width: i64, height: i64, max: i64) -> (i64, i64) {
    let (mut w, mut h) = (width, height);
    if w > max {
        h = (h as f64 * max as f64 / w as f64) as i64;
        w = max;
    }
    if h > max {
        w = (w as f64 * max as f64 / h as f64) as i64;
        h = max;
    }
    (w, h)
}
