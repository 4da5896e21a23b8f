//! Multipart intake for `/process`.
//!
//! Field parsing is lenient: anything missing or unparseable resolves to the
//! engine defaults, and unknown `aspect`/`resize` values mean "unset".

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;
use image_engine::params::{DEFAULT_CONTRAST, DEFAULT_HEIGHT, DEFAULT_SHARPNESS, DEFAULT_WIDTH};
use image_engine::{AspectRatio, FillColor, ProcessParams, ResizeMode};
use tracing::warn;

use crate::error::AppError;

/// Name of the file part carrying the source image.
pub const IMAGE_FIELD: &str = "image";

/// Raw contents of a `/process` form.
#[derive(Debug, Default)]
pub struct ProcessForm {
    image: Option<Bytes>,
    fields: HashMap<String, String>,
}

impl ProcessForm {
    /// Drain `multipart`, keeping the first value seen for each field.
    pub async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::MalformedForm(e.body_text()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == IMAGE_FIELD {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::MalformedForm(e.body_text()))?;
                form.image.get_or_insert(data);
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::MalformedForm(e.body_text()))?;
                if !name.is_empty() {
                    form.fields.entry(name).or_insert(text);
                }
            }
        }

        Ok(form)
    }

    /// Value of a text field, or `""` when absent.
    pub fn value(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Split into the image bytes and the resolved parameters.
    pub fn into_parts(self) -> Result<(Bytes, ProcessParams), AppError> {
        let params = self.params();
        let image = self.image.ok_or(AppError::MissingFile)?;
        Ok((image, params))
    }

    /// Resolve transform parameters from the text fields.
    pub fn params(&self) -> ProcessParams {
        ProcessParams {
            width: positive_int(self.value("width")).unwrap_or(DEFAULT_WIDTH),
            height: positive_int(self.value("height")).unwrap_or(DEFAULT_HEIGHT),
            contrast: non_zero_float(self.value("contrast")).unwrap_or(DEFAULT_CONTRAST),
            sharpness: non_zero_float(self.value("sharpness")).unwrap_or(DEFAULT_SHARPNESS),
            aspect: self.aspect(),
            resize: self.resize_mode(),
            fill: self.fill_color(),
        }
    }

    fn aspect(&self) -> Option<AspectRatio> {
        let tag = self.value("aspect");
        let aspect = AspectRatio::from_tag(tag);
        if aspect.is_none() && !tag.is_empty() {
            warn!(aspect = tag, "Unknown aspect, leaving size unlocked");
        }
        aspect
    }

    fn resize_mode(&self) -> ResizeMode {
        let tag = self.value("resize");
        let mode = ResizeMode::from_tag(tag);
        if mode == ResizeMode::Default && !tag.is_empty() {
            warn!(resize = tag, "Unknown resize mode, using default");
        }
        mode
    }

    /// Fill colour, present when any of the three channels was sent.
    fn fill_color(&self) -> Option<FillColor> {
        let channels = ["fillColourR", "fillColourG", "fillColourB"].map(|name| self.value(name));
        if channels.iter().all(|c| c.is_empty()) {
            return None;
        }
        let [r, g, b] = channels.map(channel);
        Some(FillColor::new(r, g, b))
    }
}

fn positive_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|v| *v > 0)
}

fn non_zero_float(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v != 0.0)
}

/// Colour channel: non-numeric is 0, out-of-range values are clamped.
fn channel(raw: &str) -> u8 {
    raw.trim()
        .parse::<i64>()
        .map(|v| v.clamp(0, 255) as u8)
        .unwrap_or(0)
}
