use std::collections::BTreeMap;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::TranslateError;

/// Gemini generateContent request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Schema,
}

/// A node in Gemini's OpenAPI-subset response schema. The schema sent with
/// every request is a fixed structure literal built by [`response_schema`].
#[derive(Debug, Serialize)]
struct Schema {
    #[serde(rename = "type")]
    schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<BTreeMap<&'static str, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<Vec<&'static str>>,
}

impl Schema {
    fn string(description: &'static str) -> Self {
        Schema {
            schema_type: "STRING",
            description: Some(description),
            nullable: Some(false),
            items: None,
            properties: None,
            required: None,
        }
    }
}

/// The declared shape of the model output: an array of objects, each carrying
/// exactly two required, non-null string fields.
fn response_schema() -> Schema {
    let mut properties = BTreeMap::new();
    properties.insert("index", Schema::string("Index of translated text"));
    properties.insert("translation", Schema::string("Translated text"));

    Schema {
        schema_type: "ARRAY",
        description: None,
        nullable: None,
        items: Some(Box::new(Schema {
            schema_type: "OBJECT",
            description: Some("Objects containing index and translated text"),
            nullable: None,
            items: None,
            properties: Some(properties),
            required: Some(vec!["index", "translation"]),
        })),
        properties: None,
        required: None,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Call Gemini's generateContent endpoint and return the raw model text.
///
/// The request forces JSON output conforming to [`response_schema`]. A
/// content-safety block reported in the prompt feedback is surfaced as
/// [`TranslateError::Blocked`]; every other failure is an upstream error.
pub async fn generate_content(
    client: &reqwest::Client,
    config: &Config,
    system_instruction: &str,
    payload: &str,
) -> Result<String, TranslateError> {
    let request = GenerateContentRequest {
        system_instruction: Content {
            role: "model".to_string(),
            parts: vec![Part {
                text: system_instruction.to_string(),
            }],
        },
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: payload.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    };

    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        config.gemini_api_url.trim_end_matches('/'),
        config.gemini_model
    );

    let response = client
        .post(&url)
        .query(&[("key", config.gemini_api_key.as_str())])
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await
        .context("Failed to send request to Gemini API")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
        return Err(anyhow::anyhow!("Gemini API error ({}): {}", status, body).into());
    }

    let generated: GenerateContentResponse = response
        .json()
        .await
        .context("Failed to parse Gemini response")?;

    if let Some(reason) = generated.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(TranslateError::Blocked(reason));
    }

    let text = generated
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .filter(|text| !text.is_empty())
        .context("Gemini response contained no candidate text")?;

    Ok(text)
}
