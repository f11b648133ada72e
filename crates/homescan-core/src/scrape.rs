use std::fmt;

use crate::agent::ExtractionAgent;
use crate::error::AppError;
use crate::models::{ExtractionContext, ExtractionResult};
use crate::normalize::normalize;
use crate::traits::{Fetcher, LanguageModel, TextExtractor};

/// Stages a single scrape passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Fetched,
    Extracted,
    AgentInvoked,
    Normalized,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Received => "received",
            PipelineStage::Fetched => "fetched",
            PipelineStage::Extracted => "extracted",
            PipelineStage::AgentInvoked => "agent_invoked",
            PipelineStage::Normalized => "normalized",
        };
        f.write_str(name)
    }
}

/// Orchestrates the scrape pipeline: fetch → extract text → agent → normalize.
///
/// Generic over the fetcher, text extractor, and model so it can run against
/// mocks in tests. Holds no per-request state; one instance serves every
/// request concurrently.
pub struct ScrapeService<F, T, M>
where
    F: Fetcher,
    T: TextExtractor,
    M: LanguageModel,
{
    fetcher: F,
    text_extractor: T,
    agent: ExtractionAgent<M>,
}

impl<F, T, M> ScrapeService<F, T, M>
where
    F: Fetcher,
    T: TextExtractor,
    M: LanguageModel,
{
    pub fn new(fetcher: F, text_extractor: T, agent: ExtractionAgent<M>) -> Self {
        Self {
            fetcher,
            text_extractor,
            agent,
        }
    }

    pub fn model_name(&self) -> &str {
        self.agent.model_name()
    }

    /// Run the full pipeline for one homepage.
    ///
    /// Short-circuits on the first failing stage; never returns a partial
    /// result.
    pub async fn scrape(&self, url: &str) -> Result<ExtractionResult, AppError> {
        tracing::info!(stage = %PipelineStage::Received, "Fetching {}", url);
        let page = self.fetcher.fetch(url).await?;
        tracing::info!(
            stage = %PipelineStage::Fetched,
            status = page.status_code,
            "Fetched {} bytes of HTML",
            page.html.len()
        );

        let text = self.text_extractor.extract_text(page.html).await?;
        tracing::info!(
            stage = %PipelineStage::Extracted,
            "Extracted {} bytes of text",
            text.len()
        );

        let context = ExtractionContext::new(text);
        tracing::info!("Extracting with model {} ...", self.agent.model_name());
        let raw = self.agent.extract(&context).await?;
        tracing::debug!(stage = %PipelineStage::AgentInvoked, ?raw, "Agent returned");

        let result = normalize(raw);
        tracing::info!(
            stage = %PipelineStage::Normalized,
            industry = %result.industry,
            company_size = %result.company_size,
            location = %result.location,
            "Extraction complete"
        );

        Ok(result)
    }
}
