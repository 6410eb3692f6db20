//! Native Google Generative AI client.
//!
//! Issues a single non-streaming `generateContent` request, optionally with
//! Google Search grounding so the model can look up real-world data, and
//! returns the concatenated text of the first candidate.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::GeminiSettings;

use super::{ApiError, ApiResult, error_from_response};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for the Generative Language API.
    pub api_key: String,
    /// Model to use (e.g., "gemini-2.0-flash").
    pub model: String,
    /// Base URL up to and including `/models`.
    pub base_url: String,
    /// Attach the `googleSearch` tool to the request.
    pub google_search_grounding: bool,
    /// Temperature for sampling (0.0-2.0).
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_output_tokens: Option<u32>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiSettings::default().into()
    }
}

impl From<GeminiSettings> for GeminiConfig {
    fn from(settings: GeminiSettings) -> Self {
        Self {
            api_key: settings.api_key,
            model: settings.model,
            base_url: settings.base_url,
            google_search_grounding: settings.google_search_grounding,
            temperature: settings.temperature,
            max_output_tokens: settings.max_output_tokens,
        }
    }
}

/// Response body of `generateContent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

/// Candidate response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

/// Candidate content.
#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Content part.
#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Usage metadata from response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

/// Prompt feedback (for blocked prompts).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Native Google Generative AI client.
pub struct GeminiClient {
    /// HTTP client for API requests.
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Creates a client with the given HTTP client and configuration.
    pub fn with_client(client: reqwest::Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Sends `prompt` as a single user turn and returns the model's text.
    pub async fn generate_text(&self, prompt: &str) -> ApiResult<String> {
        if self.config.api_key.trim().is_empty() {
            return Err(ApiError::InvalidConfig(
                "Gemini API key is not configured".to_string(),
            ));
        }

        let body = self.build_request_body(prompt);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(self.config.api_key.trim())
                .map_err(|_| ApiError::InvalidConfig("Invalid API key".to_string()))?,
        );

        let url = format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("invalid generateContent response: {e}")))?;

        Self::extract_text(parsed)
    }

    /// Builds the request body for the Generative AI API.
    fn build_request_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });

        if self.config.google_search_grounding {
            body["tools"] = json!([{ "googleSearch": {} }]);
        }

        let mut gen_config = serde_json::Map::new();
        if let Some(temp) = self.config.temperature {
            gen_config.insert("temperature".to_string(), json!(temp));
        }
        if let Some(max_tokens) = self.config.max_output_tokens {
            gen_config.insert("maxOutputTokens".to_string(), json!(max_tokens));
        }
        if !gen_config.is_empty() {
            body["generationConfig"] = Value::Object(gen_config);
        }

        body
    }

    /// Joins the text parts of the first candidate.
    fn extract_text(response: GenerateResponse) -> ApiResult<String> {
        if let Some(feedback) = &response.prompt_feedback
            && let Some(reason) = &feedback.block_reason
        {
            return Err(ApiError::ApiResponse {
                status: 400,
                message: format!("Prompt blocked: {reason}"),
                error_type: Some("PROMPT_BLOCKED".to_string()),
            });
        }

        if let Some(usage) = &response.usage_metadata {
            tracing::debug!(
                input_tokens = usage.prompt_token_count.unwrap_or(0),
                output_tokens = usage.candidates_token_count.unwrap_or(0),
                "generateContent usage"
            );
        }

        let candidate = response
            .candidates
            .and_then(|c| c.into_iter().next())
            .ok_or_else(|| ApiError::Parse("response contained no candidates".to_string()))?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(ApiError::ApiResponse {
                status: 400,
                message: "Response blocked due to safety concerns".to_string(),
                error_type: Some("SAFETY_BLOCK".to_string()),
            });
        }

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ApiError::Parse("response contained no text".to_string()));
        }

        Ok(text)
    }
}
