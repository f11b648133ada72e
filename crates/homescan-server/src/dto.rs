use serde::{Deserialize, Serialize};

use homescan_core::ExtractionResult;

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ScrapeRequest {
    /// Absolute http/https URL of the homepage to analyse
    #[schema(example = "https://example.com")]
    pub url: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ScrapeResponse {
    /// Industry of the company, or "Not Mentioned"
    pub industry: String,
    /// Company size (small, medium or large), or "Not Mentioned"
    pub company_size: String,
    /// Location of the company, or "Not Mentioned"
    pub location: String,
}

impl From<ExtractionResult> for ScrapeResponse {
    fn from(result: ExtractionResult) -> Self {
        Self {
            industry: result.industry,
            company_size: result.company_size,
            location: result.location,
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}
