//! Transform parameters accepted by the pipeline.

use image::Rgba;

/// Width used when the request does not specify a usable one.
pub const DEFAULT_WIDTH: i64 = 2048;
/// Height used when the request does not specify a usable one.
pub const DEFAULT_HEIGHT: i64 = 1536;
/// Contrast percentage used when the request does not specify one.
pub const DEFAULT_CONTRAST: f64 = 20.0;
/// Sharpness used when the request does not specify one.
pub const DEFAULT_SHARPNESS: f64 = 1.5;

/// Aspect-ratio lock applied while resolving the target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Ratio16x9,
    Ratio9x16,
    Ratio4x3,
    Ratio3x4,
    Square,
    /// Keep the aspect ratio of the uploaded image.
    Original,
}

impl AspectRatio {
    /// Parse a form tag such as `"16:9"` or `"original"`.
    ///
    /// Returns `None` for anything else, which callers treat as "no lock".
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "16:9" => Some(Self::Ratio16x9),
            "9:16" => Some(Self::Ratio9x16),
            "4:3" => Some(Self::Ratio4x3),
            "3:4" => Some(Self::Ratio3x4),
            "1:1" => Some(Self::Square),
            "original" => Some(Self::Original),
            _ => None,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Ratio16x9 => "16:9",
            Self::Ratio9x16 => "9:16",
            Self::Ratio4x3 => "4:3",
            Self::Ratio3x4 => "3:4",
            Self::Square => "1:1",
            Self::Original => "original",
        }
    }

    /// Fixed `(width, height)` ratio terms, or `None` for [`AspectRatio::Original`].
    pub fn fixed_terms(self) -> Option<(i64, i64)> {
        match self {
            Self::Ratio16x9 => Some((16, 9)),
            Self::Ratio9x16 => Some((9, 16)),
            Self::Ratio4x3 => Some((4, 3)),
            Self::Ratio3x4 => Some((3, 4)),
            Self::Square => Some((1, 1)),
            Self::Original => None,
        }
    }
}

/// How the source is mapped onto the target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// Centre-crop and fill the target exactly.
    Fit,
    /// Stretch to the target, or letterbox when a fill colour is given.
    #[default]
    Default,
}

impl ResizeMode {
    /// Parse a form value. Only `"fit"` selects [`ResizeMode::Fit`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "fit" => Self::Fit,
            _ => Self::Default,
        }
    }
}

/// Opaque background colour used for letterboxing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FillColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

/// Everything the pipeline needs besides the image bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessParams {
    pub width: i64,
    pub height: i64,
    /// Contrast percentage, 0 leaves the image unchanged.
    pub contrast: f64,
    pub sharpness: f64,
    pub aspect: Option<AspectRatio>,
    pub resize: ResizeMode,
    pub fill: Option<FillColor>,
}

impl Default for ProcessParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            contrast: DEFAULT_CONTRAST,
            sharpness: DEFAULT_SHARPNESS,
            aspect: None,
            resize: ResizeMode::Default,
            fill: None,
        }
    }
}

impl ProcessParams {
    /// Gaussian sigma handed to the sharpen step.
    pub fn sharpen_sigma(&self) -> f32 {
        (1.0 + self.sharpness / 100.0) as f32
    }
}
