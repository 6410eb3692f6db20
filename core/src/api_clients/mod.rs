//! HTTP clients for the Google services behind the pipeline.
//!
//! - [`GeminiClient`]: one-shot `generateContent` calls with web-search grounding
//! - [`SheetsClient`]: spreadsheet creation, value writes, formatting and sharing

mod google;
mod sheets;

pub use google::{GeminiClient, GeminiConfig};
pub use sheets::SheetsClient;

use serde::Deserialize;
use thiserror::Error;

/// Errors from API client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network request failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code.
        status: u16,
        /// Error message from API.
        message: String,
        /// Error type (if provided).
        error_type: Option<String>,
    },

    /// Failed to parse API response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for API client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Google error response format.
#[derive(Debug, Deserialize)]
struct GoogleError {
    code: Option<u16>,
    message: String,
    status: Option<String>,
}

/// Google error wrapper.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: GoogleError,
}

/// Turns a non-success response into an [`ApiError::ApiResponse`].
///
/// All Google REST APIs share the `{"error": {code, message, status}}`
/// envelope; anything else is reported with the raw body.
pub(crate) async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let error_text = response.text().await.unwrap_or_default();
    error_from_body(status, &error_text)
}

fn error_from_body(status: u16, body: &str) -> ApiError {
    if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(body) {
        return ApiError::ApiResponse {
            status: error_response.error.code.unwrap_or(status),
            message: error_response.error.message,
            error_type: error_response.error.status,
        };
    }

    ApiError::ApiResponse {
        status,
        message: body.to_string(),
        error_type: None,
    }
}
