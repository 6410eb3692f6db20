//! OAuth 2.0 access for the Google document APIs.
//!
//! The service runs unattended, so there is no interactive consent flow:
//! a long-lived refresh token is configured once and exchanged for a
//! short-lived access token whenever a sheet is published.
//!
//! - [`GoogleAuth`]: refresh-token grant against the Google token endpoint
//! - [`TokenResponse`]: token data from the exchange
//! - [`AuthError`]: failures of the exchange

mod error;
mod google;

pub use error::AuthError;
pub use google::GoogleAuth;

use serde::{Deserialize, Serialize};

use crate::config::GoogleSettings;

/// OAuth client registration plus the stored refresh token.
#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Token exchange URL.
    pub token_url: String,
}

impl From<&GoogleSettings> for OAuthClientConfig {
    fn from(settings: &GoogleSettings) -> Self {
        Self {
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            refresh_token: settings.refresh_token.clone(),
            token_url: settings.token_url.clone(),
        }
    }
}

/// Token response from OAuth exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The access token for API calls.
    pub access_token: String,
    /// Google only returns a new refresh token when it rotates the old one.
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds.
    pub expires_in: Option<u64>,
    /// Token type (usually "Bearer").
    pub token_type: String,
    /// Scopes granted.
    pub scope: Option<String>,
}
