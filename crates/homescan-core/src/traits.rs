use std::future::Future;

use crate::error::AppError;
use crate::models::RawPage;

/// Fetches a homepage over HTTP.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<RawPage, AppError>> + Send;
}

/// Converts raw HTML into plain visible text.
///
/// Parsing is CPU-bound; implementations keep it off the async worker.
pub trait TextExtractor: Send + Sync + Clone {
    fn extract_text(&self, html: String) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// An external LLM able to answer with JSON conforming to a schema.
///
/// Implementations only transport the request; prompt content and contract
/// enforcement belong to [`ExtractionAgent`](crate::agent::ExtractionAgent).
pub trait LanguageModel: Send + Sync + Clone {
    /// Model identifier, for logs.
    fn model_name(&self) -> &str;

    /// Sends the system prompts and task prompt, asking for output matching
    /// `schema`, and returns the parsed JSON the model produced.
    fn generate_structured(
        &self,
        system_prompts: &[String],
        task_prompt: &str,
        schema: &serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value, AppError>> + Send;
}
