use std::sync::Arc;

use jsonschema::Validator;

use crate::error::AppError;
use crate::models::{ExtractionContext, ExtractionResult, acceptance_schema, extraction_schema};
use crate::traits::LanguageModel;

pub const SYSTEM_PROMPT: &str = "You are an intelligent website analysis and scraping agent. \
Analyze the provided homepage content carefully and extract structured information such as \
industry, company size, and location of the company.";

pub const TASK_PROMPT: &str = "Extract industry (type of), company size (small, medium or large) \
if mentioned, location where the company exists if mentioned";

/// Company-profile extraction agent.
///
/// Built once at startup and shared read-only across requests. Owns the
/// fixed prompts and the output schema; the [`LanguageModel`] only carries
/// the request to a provider.
pub struct ExtractionAgent<M: LanguageModel> {
    model: M,
    schema: serde_json::Value,
    validator: Arc<Validator>,
}

impl<M: LanguageModel> Clone for ExtractionAgent<M> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            schema: self.schema.clone(),
            validator: Arc::clone(&self.validator),
        }
    }
}

impl<M: LanguageModel> ExtractionAgent<M> {
    /// Compile the output schema and wrap `model`.
    pub fn new(model: M) -> Result<Self, AppError> {
        let schema = extraction_schema();
        let validator = jsonschema::validator_for(&acceptance_schema())
            .map_err(|e| AppError::ConfigError(format!("Invalid extraction schema: {e}")))?;

        tracing::info!(model = model.model_name(), "Extraction agent initialized");

        Ok(Self {
            model,
            schema,
            validator: Arc::new(validator),
        })
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Ask the model for the company profile described by `context`.
    ///
    /// Every failure, including output that breaks the schema, is logged in
    /// full and returned as [`AppError::ExtractionFailed`].
    pub async fn extract(&self, context: &ExtractionContext) -> Result<ExtractionResult, AppError> {
        let system_prompts = [SYSTEM_PROMPT.to_string(), context.as_prompt()];

        let value = self
            .model
            .generate_structured(&system_prompts, TASK_PROMPT, &self.schema)
            .await
            .map_err(|e| {
                tracing::error!(
                    model = self.model.model_name(),
                    error = %e,
                    "Agent execution failed during content processing"
                );
                match e {
                    AppError::ExtractionFailed(_) => e,
                    other => AppError::ExtractionFailed(other.to_string()),
                }
            })?;

        self.check_output(value)
    }

    fn check_output(&self, value: serde_json::Value) -> Result<ExtractionResult, AppError> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(&value)
            .map(|e| e.to_string())
            .collect();

        if !violations.is_empty() {
            let detail = format!(
                "model output violates schema: {}. Raw: {}",
                violations.join("; "),
                value
            );
            tracing::error!(model = self.model.model_name(), "{detail}");
            return Err(AppError::ExtractionFailed(detail));
        }

        serde_json::from_value(value).map_err(|e| {
            tracing::error!(model = self.model.model_name(), error = %e, "Model output could not be decoded");
            AppError::ExtractionFailed(format!("model output could not be decoded: {e}"))
        })
    }
}
