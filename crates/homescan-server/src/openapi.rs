use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AI Agent for Website Scraping",
        version = "0.1.0",
        description = "Scrapes a website's homepage and reports the company's industry, size, and location."
    ),
    paths(crate::routes::scrape, crate::routes::health),
    components(schemas(
        crate::dto::ScrapeRequest,
        crate::dto::ScrapeResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "Scrape Homepage", description = "Company profile extraction"),
        (name = "Health Check", description = "Liveness probe"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the `Authorization` header API-key scheme so Swagger UI shows an
/// "Authorize" button.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "APIKeyAuth",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::with_description(
                            "Authorization",
                            "Bearer <token>, set via the AUTHORIZATION_TOKEN environment variable.",
                        ),
                    ),
                ),
            );
        }
    }
}
