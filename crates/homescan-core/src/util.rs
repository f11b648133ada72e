use url::Url;

use crate::error::AppError;

/// Parse and validate a target URL: absolute, `http` or `https`, with a host.
pub fn parse_target_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::InvalidInput(format!("Invalid URL '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::InvalidInput(format!(
                "URL scheme '{scheme}' is not allowed (only http/https)"
            )));
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::InvalidInput(format!("URL '{raw}' has no host")));
    }

    Ok(url)
}
