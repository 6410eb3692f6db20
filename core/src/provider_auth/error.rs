//! Authentication error types for the Google token exchange.

use thiserror::Error;

/// Errors from exchanging a refresh token for an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The token endpoint rejected the exchange.
    #[error("OAuth error ({status}): {body}")]
    OAuth {
        /// HTTP status returned by the token endpoint.
        status: u16,
        /// Raw response body, usually `{"error": ..., "error_description": ...}`.
        body: String,
    },

    /// Invalid or malformed token response from provider.
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    /// Client id, client secret or refresh token is not configured.
    #[error("Google credentials not configured: missing {0}")]
    NotAuthenticated(&'static str),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
