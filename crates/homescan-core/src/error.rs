use thiserror::Error;

/// Application-wide error types for homescan.
///
/// The `Display` text carries internal detail and is meant for logs only.
/// The HTTP layer maps each variant to a status code and a fixed message.
#[derive(Error, Debug)]
pub enum AppError {
    /// The remote page answered 204 No Content.
    #[error("Remote page returned no content")]
    NoContent,

    /// The remote resource is not an HTML page.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The remote server answered with a 4xx/5xx status.
    #[error("Upstream responded with HTTP {status}")]
    UpstreamHttpError { status: u16 },

    /// Network-level failure while fetching (DNS, connect, timeout, TLS, body).
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// HTML could not be turned into text.
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// The model call failed or its output broke the structured contract.
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// Missing or wrong credentials. The message is safe to show to callers.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller supplied a malformed request.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or invalid startup configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Short machine-readable name of the variant, used as the `error` field
    /// of API error bodies and as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NoContent => "no_content",
            AppError::UnsupportedMediaType(_) => "unsupported_media_type",
            AppError::UpstreamHttpError { .. } => "upstream_http_error",
            AppError::FetchFailed(_) => "fetch_failed",
            AppError::ParseFailed(_) => "parse_failed",
            AppError::ExtractionFailed(_) => "extraction_failed",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::ConfigError(_) => "config_error",
        }
    }
}
