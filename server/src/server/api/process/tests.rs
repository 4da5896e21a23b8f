use std::io::Cursor;

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::server::router::create_router;

const BOUNDARY: &str = "process-test-boundary";

fn fixture_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 90, 255])
    });
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

/// Build a `multipart/form-data` body from text fields and an optional image part.
fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(data) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"upload.png\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn post_process(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/process")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(request: Request<Body>) -> Response {
    send_with(&AppConfig::default(), request).await
}

async fn send_with(config: &AppConfig, request: Request<Body>) -> Response {
    create_router(config).oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn decoded_png(response: Response) -> RgbaImage {
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let length: usize = response.headers()[header::CONTENT_LENGTH]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.len(), length);
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    image::load_from_memory(&bytes).unwrap().to_rgba8()
}

#[tokio::test]
async fn options_returns_cors_headers_and_empty_body() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/process")
        .body(Body::empty())
        .unwrap();
    let response = send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST") && methods.contains("OPTIONS"), "{methods}");
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("content-type"), "{allowed}");
    assert!(body_text(response).await.is_empty());
}

#[tokio::test]
async fn browser_preflight_is_answered() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/process")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn other_methods_are_rejected() {
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let request = Request::builder()
            .method(method.clone())
            .uri("/process")
            .body(Body::empty())
            .unwrap();
        let response = send(request).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(body_text(response).await, "POST only");
    }
}

#[tokio::test]
async fn missing_image_is_bad_request() {
    let response = send(post_process(multipart_body(&[("width", "100")], None))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Missing"));
}

#[tokio::test]
async fn non_image_bytes_are_bad_request() {
    let body = multipart_body(&[], Some(&b"this is not an image at all"[..]));
    let response = send(post_process(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Invalid"));
}

#[tokio::test]
async fn non_multipart_body_is_malformed() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.starts_with("Could not parse form"));
}

#[tokio::test]
async fn oversized_upload_is_malformed() {
    let config = AppConfig {
        max_upload_bytes: 1024,
        ..AppConfig::default()
    };
    let body = multipart_body(&[], Some(&[0u8; 8 * 1024][..]));
    let response = send_with(&config, post_process(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.starts_with("Could not parse form"));
}

#[tokio::test]
async fn fixed_ratio_fixture_is_800_by_450() {
    let png = fixture_png(320, 240);
    let body = multipart_body(
        &[("width", "800"), ("height", "600"), ("aspect", "16:9")],
        Some(png.as_slice()),
    );
    let out = decoded_png(send(post_process(body)).await).await;
    assert_eq!(out.dimensions(), (800, 450));
}

#[tokio::test]
async fn fit_mode_crops_to_exact_size() {
    let png = fixture_png(300, 60);
    let body = multipart_body(
        &[("width", "120"), ("height", "120"), ("resize", "fit")],
        Some(png.as_slice()),
    );
    let out = decoded_png(send(post_process(body)).await).await;
    assert_eq!(out.dimensions(), (120, 120));
}

#[tokio::test]
async fn fill_colour_letterboxes_with_coloured_corners() {
    let png = fixture_png(200, 50);
    let body = multipart_body(
        &[
            ("width", "160"),
            ("height", "120"),
            ("fillColourR", "255"),
            ("fillColourG", "0"),
            ("fillColourB", "255"),
        ],
        Some(png.as_slice()),
    );
    let out = decoded_png(send(post_process(body)).await).await;
    assert_eq!(out.dimensions(), (160, 120));
    let (w, h) = out.dimensions();
    for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
        assert_eq!(*out.get_pixel(x, y), Rgba([255, 0, 255, 255]), "corner ({x}, {y})");
    }
}

#[tokio::test]
async fn original_aspect_keeps_source_ratio() {
    let png = fixture_png(300, 100);
    let body = multipart_body(
        &[("width", "600"), ("height", "600"), ("aspect", "original")],
        Some(png.as_slice()),
    );
    let out = decoded_png(send(post_process(body)).await).await;
    assert_eq!(out.dimensions(), (600, 200));
}

#[tokio::test]
async fn zero_sided_target_is_bad_request() {
    let png = fixture_png(10, 10);
    let body = multipart_body(&[("width", "1"), ("aspect", "16:9")], Some(png.as_slice()));
    let response = send(post_process(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.starts_with("Invalid parameter"));
}
