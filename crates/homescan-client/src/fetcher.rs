use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use homescan_core::error::AppError;
use homescan_core::models::RawPage;
use homescan_core::traits::Fetcher;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use url::Url;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_REDIRECTS: usize = 10;

/// HTTP fetcher using reqwest.
///
/// Downloads a homepage with a fixed timeout and accepts only `text/html`
/// responses. A single attempt is made per call.
/// By default, SSRF protection is **enabled**: every connection, including
/// redirect hops, is refused when it targets a private/reserved IP. Use
/// [`allow_private_urls`](Self::allow_private_urls) to disable this (e.g.,
/// for CLI usage where the user controls the machine).
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout: Duration,
    ssrf_protection: bool,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            client: build_client(timeout, true)?,
            timeout,
            ssrf_protection: true,
        })
    }

    /// Disable SSRF protection, allowing requests to private/reserved IPs.
    pub fn allow_private_urls(self) -> Result<Self, AppError> {
        Ok(Self {
            client: build_client(self.timeout, false)?,
            timeout: self.timeout,
            ssrf_protection: false,
        })
    }
}

fn build_client(timeout: Duration, ssrf_protection: bool) -> Result<Client, AppError> {
    let builder = Client::builder()
        .user_agent(concat!("homescan/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout);

    let builder = if ssrf_protection {
        builder
            .dns_resolver(PublicOnlyResolver)
            .redirect(guarded_redirects())
    } else {
        builder.redirect(Policy::limited(MAX_REDIRECTS))
    };

    builder
        .build()
        .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {e}")))
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPage, AppError> {
        if self.ssrf_protection {
            validate_url(url).inspect_err(|e| {
                tracing::error!(%url, error = %e, "Refusing to fetch URL");
            })?;
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            let detail = error_chain(&e);
            tracing::error!(%url, error = %detail, "Request failed while fetching URL");
            let kind = if e.is_timeout() {
                "timed out"
            } else if e.is_redirect() {
                "redirect refused"
            } else if e.is_connect() {
                "connection failed"
            } else {
                "request error"
            };
            AppError::FetchFailed(format!("{kind}: {detail}"))
        })?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            tracing::warn!(%url, "Received 204 No Content response");
            return Err(AppError::NoContent);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("text/html") {
            tracing::error!(%url, %content_type, "Unsupported media type, expected 'text/html'");
            return Err(AppError::UnsupportedMediaType(content_type));
        }

        if status.is_client_error() || status.is_server_error() {
            tracing::error!(%url, status = status.as_u16(), "Upstream returned an HTTP error");
            return Err(AppError::UpstreamHttpError {
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| {
            tracing::error!(%url, error = %e, "Failed to read response body");
            AppError::FetchFailed(format!("Failed to read response body: {e}"))
        })?;

        Ok(RawPage {
            html,
            content_type,
            status_code: status.as_u16(),
        })
    }
}

/// Render a reqwest error with its full source chain.
fn error_chain(e: &reqwest::Error) -> String {
    let mut detail = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

// ---------------------------------------------------------------------------
// SSRF protection
// ---------------------------------------------------------------------------

/// Check a URL before any connection is made to it.
///
/// 1. Only allow `http` and `https` schemes.
/// 2. Reject literal private/reserved IPs.
///
/// Hostnames are checked at connect time by [`PublicOnlyResolver`], so a
/// name that re-resolves to a private address between check and use is
/// still refused.
fn validate_url(url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::FetchFailed(format!("Invalid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::FetchFailed(format!(
                "URL scheme '{scheme}' is not allowed (only http/https)"
            )));
        }
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| AppError::FetchFailed("URL has no host".to_string()))?;
    let bare_host = host.trim_start_matches('[').trim_end_matches(']');

    if let Ok(ip) = bare_host.parse::<IpAddr>()
        && is_private_ip(ip)
    {
        return Err(AppError::FetchFailed(format!(
            "SSRF blocked: {host} is a private/reserved IP"
        )));
    }

    Ok(())
}

/// Redirect policy that re-applies [`validate_url`] to every hop.
fn guarded_redirects() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        let verdict = validate_url(attempt.url().as_str());
        match verdict {
            Ok(()) => attempt.follow(),
            Err(e) => attempt.error(e),
        }
    })
}

/// DNS resolver that refuses names resolving to any private/reserved IP.
#[derive(Debug, Clone, Copy, Default)]
struct PublicOnlyResolver;

impl Resolve for PublicOnlyResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(resolve_public(name.as_str().to_string()))
    }
}

async fn resolve_public(host: String) -> Result<Addrs, Box<dyn std::error::Error + Send + Sync>> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), 0))
        .await?
        .collect();

    if let Some(blocked) = addrs.iter().find(|a| is_private_ip(a.ip())) {
        return Err(format!(
            "SSRF blocked: {host} resolves to private/reserved IP {}",
            blocked.ip()
        )
        .into());
    }

    Ok(Box::new(addrs.into_iter()))
}

/// Check if an IP address is in a private/reserved/link-local range.
fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local() // includes cloud metadata
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation()
                || v4.octets()[0] == 100 && (v4.octets()[1] & 0xC0) == 64 // 100.64.0.0/10 (CGN)
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || v6.is_unspecified()
                || (v6.segments()[0] & 0xFFC0) == 0xFE80 // fe80::/10
                || (v6.segments()[0] & 0xFE00) == 0xFC00 // fc00::/7
                || v6
                    .to_ipv4_mapped()
                    .is_some_and(|v4| is_private_ip(IpAddr::V4(v4)))
        }
    }
}
