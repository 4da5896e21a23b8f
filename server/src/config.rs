//! Runtime configuration: built-in defaults with environment overrides.

use tracing::warn;

/// Port the server listens on unless `SERVER_PORT` says otherwise.
pub const DEFAULT_SERVER_PORT: u16 = 8000;
/// Largest accepted request body (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 << 20;

/// Runtime configuration for the process server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_port: u16,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to read overrides.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_or("SERVER_PORT", lookup("SERVER_PORT"), defaults.server_port),
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                lookup("MAX_UPLOAD_BYTES"),
                defaults.max_upload_bytes,
            ),
        }
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    let Some(raw) = value else {
        return default;
    };
    if raw.trim().is_empty() {
        return default;
    }
    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(key, value = %raw, %default, "Ignoring unparseable override");
            default
        }
    }
}
