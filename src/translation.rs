use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One translated segment as returned by the model.
///
/// The declared response schema requires both fields, so a missing field
/// here means the model violated its contract and the batch fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedSegment {
    pub index: String,
    pub translation: String,
}

/// Build the system instruction for a translation request.
pub fn build_system_instruction(target_language: &str) -> String {
    format!(
        r#"Translate the following texts to {}, paying close attention to the context and ensuring accuracy. Double-check for any potentially ambiguous words or phrases and choose the most appropriate translation.

## Examples of potential ambiguities
- If the word "charge" refers to billing, ensure it is not translated as "charging" (as in electricity).

## Formatting
- Do not add any extra line breaks, markdown formatting, numbering, or any other special formatting.
- Preserve all original formatting, including spaces, line breaks, and special characters such as tabs.
- Directly return a JSON array without any additional formatting."#,
        target_language
    )
}

/// Encode the input segments as the user-role payload sent upstream: a JSON
/// array of objects carrying each segment's position and text. The model
/// echoes the index back in its output so callers can match segments even
/// when the output order differs.
pub fn build_segment_payload(segments: &[String]) -> String {
    let items: Vec<serde_json::Value> = segments
        .iter()
        .enumerate()
        .map(|(i, text)| json!({ "index": i.to_string(), "text": text }))
        .collect();

    serde_json::Value::Array(items).to_string()
}

/// Parse the model's raw text output into translated segments.
pub fn parse_translations(raw: &str) -> Result<Vec<TranslatedSegment>> {
    serde_json::from_str(raw)
        .context("Gemini returned output that does not match the translation schema")
}
