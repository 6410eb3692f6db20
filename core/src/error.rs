//! Prospect pipeline error types
//!
//! Three categories decide how a failure reaches the caller: bad input,
//! an empty search, or an internal failure of one of the upstream services.

use thiserror::Error;

use crate::api_clients::ApiError;
use crate::config::ConfigError;
use crate::provider_auth::AuthError;

/// User-facing message when the model output holds no JSON object.
pub const INVALID_JSON_MESSAGE: &str = "Gemini non ha restituito JSON valido. Riprova.";

/// Error category for structured logging and status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller sent an incomplete geography
    BadInput,
    /// Research succeeded but returned zero companies
    NoResults,
    /// Any failure of the model, token exchange or document APIs
    Internal,
}

impl ErrorCategory {
    /// Machine-readable code for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadInput => "BAD_INPUT",
            Self::NoResults => "NO_RESULTS",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Error)]
pub enum ProspectError {
    #[error("I campi 'area' e 'country' sono obbligatori.")]
    InvalidInput,

    #[error("Nessuna azienda trovata. Prova con un'area diversa.")]
    NoProspects,

    #[error("Gemini request failed: {0}")]
    Research(#[source] ApiError),

    /// Model output could not be turned into rows. The message is shown as is.
    #[error("{0}")]
    Parse(String),

    #[error("Google authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Google Sheets request failed: {0}")]
    Sheets(#[source] ApiError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ProspectError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput => ErrorCategory::BadInput,
            Self::NoProspects => ErrorCategory::NoResults,
            Self::Research(_)
            | Self::Parse(_)
            | Self::Auth(_)
            | Self::Sheets(_)
            | Self::Config(_)
            | Self::HttpClient(_) => ErrorCategory::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProspectError>;
