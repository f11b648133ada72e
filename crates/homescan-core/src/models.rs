use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder for any field the model could not determine.
pub const NOT_MENTIONED: &str = "Not Mentioned";

/// A fetched homepage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    pub html: String,
    pub content_type: String,
    pub status_code: u16,
}

/// Input handed to the extraction agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionContext {
    pub scraped_text: String,
}

impl ExtractionContext {
    pub fn new(scraped_text: impl Into<String>) -> Self {
        Self {
            scraped_text: scraped_text.into(),
        }
    }

    /// The system-prompt addendum that carries the page text to the model.
    pub fn as_prompt(&self) -> String {
        format!("Company details: scraped_text={}", self.scraped_text)
    }
}

/// Company profile produced by the extraction agent.
///
/// Absent or `null` fields deserialize to an empty string; the normalizer
/// later replaces them with [`NOT_MENTIONED`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub industry: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_size: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
}

impl ExtractionResult {
    pub fn new(
        industry: impl Into<String>,
        company_size: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            industry: industry.into(),
            company_size: company_size.into(),
            location: location.into(),
        }
    }

    pub(crate) fn fields_mut(&mut self) -> [&mut String; 3] {
        [
            &mut self.industry,
            &mut self.company_size,
            &mut self.location,
        ]
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// JSON Schema of the structured output the model must produce.
///
/// Strict-mode compatible: every property required, no extras.
pub fn extraction_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "industry": {
                "type": "string",
                "description": "The industry the company operates in"
            },
            "company_size": {
                "type": "string",
                "description": "Company size: small, medium or large"
            },
            "location": {
                "type": "string",
                "description": "Where the company is located"
            }
        },
        "required": ["industry", "company_size", "location"],
        "additionalProperties": false
    })
}

/// Schema the agent checks model output against.
///
/// Looser than [`extraction_schema`]: a field may be absent or `null` (the
/// normalizer fills it in), but wrong types and unknown keys are rejected.
pub fn acceptance_schema() -> serde_json::Value {
    let field = serde_json::json!({"type": ["string", "null"]});
    serde_json::json!({
        "type": "object",
        "properties": {
            "industry": field,
            "company_size": field,
            "location": field
        },
        "additionalProperties": false
    })
}
