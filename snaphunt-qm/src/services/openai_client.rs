//! OpenAI Responses API client
//!
//! Single-shot multimodal classification against the hosted vision model.
//! The response is requested with a provider-side structured-output schema
//! and re-validated defensively on receipt: the schema constraint is a
//! protocol-level contract, not something to trust blindly.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::services::prompt_builder::USER_IMAGE_PREAMBLE;
use crate::types::{ClassifyRequest, ProviderError, RawMatchDecision, VisionProvider};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT_SECS: u64 = 30;

// The answer is always two short fields; a low temperature keeps repeated
// submissions of the same unambiguous image near-deterministic.
const MATCH_TEMPERATURE: f32 = 0.1;
const MATCH_MAX_OUTPUT_TOKENS: u32 = 100;
const MATCH_SCHEMA_NAME: &str = "location_match_result";

const DESCRIBE_PROMPT: &str = "Generate a detailed description of this location. \
Focus on unique, identifying features. This description will be used to match \
user-submitted photos.";

/// OpenAI Responses API request
#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<TextFormat>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: Vec<InputPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum InputPart<'a> {
    #[serde(rename = "input_text")]
    Text { text: &'a str },
    #[serde(rename = "input_image")]
    Image { detail: &'a str, image_url: &'a str },
}

#[derive(Debug, Serialize)]
struct TextFormat {
    format: SchemaFormat,
}

#[derive(Debug, Serialize)]
struct SchemaFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    name: &'static str,
    strict: bool,
    schema: serde_json::Value,
}

/// OpenAI Responses API response envelope
#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    item_type: String,
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

/// JSON schema for the match decision, enforced provider-side
fn match_output_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "location_index": {
                "type": "integer",
                "description": "Index of the matched location, or -1 if no match"
            },
            "confidence": {
                "type": "string",
                "enum": ["high", "medium", "low"],
                "description": "Confidence level of the match"
            }
        },
        "required": ["location_index", "confidence"],
        "additionalProperties": false
    })
}

/// Extract the assistant's text from the response envelope
fn extract_output_text(response: &ResponsesResponse) -> Option<&str> {
    response
        .output
        .iter()
        .filter(|item| item.item_type == "message")
        .flat_map(|item| item.content.iter())
        .find(|content| content.content_type == "output_text")
        .map(|content| content.text.as_str())
}

/// OpenAI vision client
///
/// Shared read-only across all concurrent match requests: the reqwest client
/// pools connections internally, and no call mutates client state.
pub struct OpenAiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Create a client with the default model and endpoint
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        Self::with_options(api_key, None, None)
    }

    /// Create a client with optional model and base-URL overrides
    ///
    /// The base-URL override exists for proxies and for integration tests
    /// pointing at a stub server.
    pub fn with_options(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
        })
    }

    async fn send(&self, request: &ResponsesRequest<'_>) -> Result<String, ProviderError> {
        let url = format!("{}/responses", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::InvalidApiKey);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Unavailable(format!(
                "API error {}: {}",
                status.as_u16(),
                body
            )));
        }

        let envelope: ResponsesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ContractViolation(format!("malformed envelope: {}", e)))?;

        extract_output_text(&envelope)
            .map(|text| text.to_string())
            .ok_or_else(|| ProviderError::ContractViolation("empty response output".to_string()))
    }

    /// Generate a discriminating visual description of a reference photo
    ///
    /// Used by the `generate-descriptions` companion binary when preparing a
    /// catalogue, not on the match path.
    pub async fn describe_image(&self, image_data_url: &str) -> Result<String, ProviderError> {
        let request = ResponsesRequest {
            model: &self.model,
            input: vec![InputMessage {
                role: "user",
                content: vec![
                    InputPart::Text {
                        text: DESCRIBE_PROMPT,
                    },
                    InputPart::Image {
                        detail: "high",
                        image_url: image_data_url,
                    },
                ],
            }],
            text: None,
            temperature: 0.7,
            max_output_tokens: None,
        };

        self.send(&request).await
    }
}

#[async_trait::async_trait]
impl VisionProvider for OpenAiClient {
    async fn classify(&self, request: ClassifyRequest) -> Result<RawMatchDecision, ProviderError> {
        let api_request = ResponsesRequest {
            model: &self.model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: vec![InputPart::Text {
                        text: &request.system_instruction,
                    }],
                },
                InputMessage {
                    role: "user",
                    content: vec![
                        InputPart::Text {
                            text: USER_IMAGE_PREAMBLE,
                        },
                        InputPart::Image {
                            detail: "low",
                            image_url: &request.image_data_url,
                        },
                    ],
                },
            ],
            text: Some(TextFormat {
                format: SchemaFormat {
                    format_type: "json_schema",
                    name: MATCH_SCHEMA_NAME,
                    strict: true,
                    schema: match_output_schema(),
                },
            }),
            temperature: MATCH_TEMPERATURE,
            max_output_tokens: Some(MATCH_MAX_OUTPUT_TOKENS),
        };

        tracing::debug!(model = %self.model, "querying inference provider");

        let text = self.send(&api_request).await?;

        // Defensive re-validation: never trust provider-side schema
        // enforcement alone.
        serde_json::from_str(&text).map_err(|e| {
            ProviderError::ContractViolation(format!(
                "output does not match schema: {} (raw: {})",
                e, text
            ))
        })
    }
}
