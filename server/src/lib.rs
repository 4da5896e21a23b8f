//! HTTP front end for the image engine: one `/process` endpoint that takes a
//! multipart upload and answers with a PNG.

pub mod config;
pub mod error;
pub mod server;

pub use config::AppConfig;
pub use error::AppError;
