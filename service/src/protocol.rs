//! Wire types for the HTTP API.
//!
//! Success bodies are [`prospect_core::GenerateSummary`] and
//! [`HealthResult`]. Every failure is an [`ErrorBody`] whose status comes
//! from [`status_for`].

use axum::http::StatusCode;
use prospect_core::ErrorCategory;
use serde::{Deserialize, Serialize};

/// Prefix of the message for a body that is not a valid generate request.
pub const INVALID_BODY_PREFIX: &str = "Richiesta non valida";

/// Message returned when a request outlives the configured timeout.
pub const TIMEOUT_MESSAGE: &str = "Timeout della richiesta.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResult {
    pub status: String,
    pub version: String,
}

/// HTTP status for a pipeline error category.
pub fn status_for(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::BadInput => StatusCode::BAD_REQUEST,
        ErrorCategory::NoResults => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
