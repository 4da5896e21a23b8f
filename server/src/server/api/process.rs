//! Image processing API.

mod form;
#[cfg(test)]
mod tests;

use std::time::Instant;

use axum::body::Body;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartRejection;
use axum::http::{StatusCode, header};
use axum::response::Response;
use image_engine::{ProcessedImage, process_image};
use tracing::info;

use crate::error::AppError;

use form::ProcessForm;

/// POST /process – Resize and adjust an uploaded image, respond with PNG
pub async fn process_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let start = Instant::now();
    let mut multipart = multipart.map_err(|e| AppError::MalformedForm(e.body_text()))?;

    let form = ProcessForm::read(&mut multipart).await?;
    info!(elapsed_ms = elapsed_ms(start), "Parsed multipart form");

    let (image, params) = form.into_parts()?;
    info!(
        width = params.width,
        height = params.height,
        contrast = params.contrast,
        sharpness = params.sharpness,
        aspect = params.aspect.map(|a| a.as_tag()),
        resize = ?params.resize,
        fill = ?params.fill,
        upload_bytes = image.len(),
        "Parsed fields"
    );

    let processed = tokio::task::spawn_blocking(move || process_image(&image, &params))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    info!(
        orig_w = processed.original_size.0,
        orig_h = processed.original_size.1,
        out_w = processed.output_size.0,
        out_h = processed.output_size.1,
        bytes = processed.data.len(),
        elapsed_ms = elapsed_ms(start),
        "Processed image"
    );

    png_response(processed)
}

/// Any other method on /process
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

fn png_response(processed: ProcessedImage) -> Result<Response, AppError> {
    let content_type = processed.content_type();
    let length = processed.data.len();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, length)
        .body(Body::from(processed.data))
        .map_err(|e| AppError::Internal(e.to_string()))
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
