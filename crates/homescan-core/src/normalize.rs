use crate::models::{ExtractionResult, NOT_MENTIONED};

/// Post-process a model result so every field is a non-empty string.
///
/// Blank fields become [`NOT_MENTIONED`]; other values pass through unchanged.
/// Non-ASCII text is escaped only when the result is encoded, see
/// [`to_ascii_json`](crate::ascii_json::to_ascii_json). Applying it twice
/// changes nothing.
pub fn normalize(mut result: ExtractionResult) -> ExtractionResult {
    for field in result.fields_mut() {
        if field.trim().is_empty() {
            *field = NOT_MENTIONED.to_string();
        }
    }
    result
}
