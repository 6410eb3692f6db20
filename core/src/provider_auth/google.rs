//! Google OAuth 2.0 refresh-token grant.

use serde::Deserialize;

use super::{AuthError, OAuthClientConfig, TokenResponse};

/// Exchanges the configured refresh token for access tokens.
#[derive(Debug, Clone)]
pub struct GoogleAuth {
    client: reqwest::Client,
    config: OAuthClientConfig,
}

/// Google's token response format.
#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    token_type: Option<String>,
    scope: Option<String>,
}

impl GoogleAuth {
    /// Token exchange and refresh URL.
    pub const TOKEN_URL: &'static str = "https://oauth2.googleapis.com/token";

    pub fn new(client: reqwest::Client, config: OAuthClientConfig) -> Self {
        Self { client, config }
    }

    /// Returns a fresh access token for the configured refresh token.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        let refresh_token = self.config.refresh_token.trim();
        if refresh_token.is_empty() {
            return Err(AuthError::NotAuthenticated("refresh token"));
        }
        let token = self.refresh_token(refresh_token).await?;
        tracing::debug!(
            expires_in = token.expires_in.unwrap_or(0),
            scope = token.scope.as_deref().unwrap_or_default(),
            "Obtained Google access token"
        );
        if token
            .refresh_token
            .as_deref()
            .is_some_and(|rotated| rotated != refresh_token)
        {
            tracing::warn!("Google rotated the refresh token; update GOOGLE_REFRESH_TOKEN");
        }
        Ok(token.access_token)
    }

    /// Performs the `refresh_token` grant.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, AuthError> {
        let client_id = self.config.client_id.trim();
        let client_secret = self.config.client_secret.trim();
        if client_id.is_empty() {
            return Err(AuthError::NotAuthenticated("client id"));
        }
        if client_secret.is_empty() {
            return Err(AuthError::NotAuthenticated("client secret"));
        }
        if refresh_token.trim().is_empty() {
            return Err(AuthError::NotAuthenticated("refresh token"));
        }

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token.trim()),
        ];

        let token_url = if self.config.token_url.is_empty() {
            Self::TOKEN_URL
        } else {
            self.config.token_url.as_str()
        };

        let response = self.client.post(token_url).form(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, "Google token refresh rejected");
            return Err(AuthError::OAuth { status, body });
        }

        let body = response.text().await?;
        let google_response: GoogleTokenResponse = serde_json::from_str(&body)?;

        if google_response.access_token.is_empty() {
            return Err(AuthError::InvalidResponse(
                "token response has an empty access_token".to_string(),
            ));
        }

        Ok(TokenResponse {
            access_token: google_response.access_token,
            refresh_token: google_response.refresh_token,
            expires_in: google_response.expires_in,
            token_type: google_response
                .token_type
                .unwrap_or_else(|| "Bearer".to_string()),
            scope: google_response.scope,
        })
    }
}
