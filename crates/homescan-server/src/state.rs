use homescan_client::{HtmlTextExtractor, OpenAiModel, ReqwestFetcher};
use homescan_core::{AppError, ExtractionAgent, ScrapeService};

use crate::config::ServerConfig;

/// The concrete pipeline the server runs.
pub type Pipeline = ScrapeService<ReqwestFetcher, HtmlTextExtractor, OpenAiModel>;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
///
/// Built once at startup and never mutated afterwards.
pub struct AppState {
    pub pipeline: Pipeline,
    /// Token expected in `Authorization: Bearer <token>` on protected routes.
    pub auth_token: String,
}

impl AppState {
    /// Build the fetcher, text extractor and extraction agent from `config`.
    ///
    /// Fails if the agent cannot be constructed; the server must not start then.
    pub fn from_config(config: &ServerConfig) -> Result<Self, AppError> {
        let fetcher = ReqwestFetcher::with_timeout(config.fetch_timeout)?;
        let fetcher = if config.allow_private_urls {
            fetcher.allow_private_urls()?
        } else {
            fetcher
        };

        let model = OpenAiModel::with_base_url(
            &config.model_api_key,
            &config.model_name,
            &config.model_base_url,
        )?
        .with_timeout(config.model_timeout)?;
        let agent = ExtractionAgent::new(model)?;

        Ok(Self {
            pipeline: ScrapeService::new(fetcher, HtmlTextExtractor::new(), agent),
            auth_token: config.auth_token.clone(),
        })
    }
}
