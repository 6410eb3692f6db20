//! Google Sheets v4 and Drive v3 calls used to publish a prospect sheet.
//!
//! Every call carries a bearer access token obtained from
//! [`crate::provider_auth::GoogleAuth`]. The client itself is stateless.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::GoogleSettings;

use super::{ApiError, ApiResult, error_from_response};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateResponse {
    spreadsheet_id: Option<String>,
}

/// Thin REST client for the document APIs.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: reqwest::Client,
    sheets_base_url: String,
    drive_base_url: String,
}

impl SheetsClient {
    pub fn new(
        client: reqwest::Client,
        sheets_base_url: impl Into<String>,
        drive_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            sheets_base_url: sheets_base_url.into().trim_end_matches('/').to_string(),
            drive_base_url: drive_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(client: reqwest::Client, settings: &GoogleSettings) -> Self {
        Self::new(
            client,
            settings.sheets_base_url.as_str(),
            settings.drive_base_url.as_str(),
        )
    }

    /// Creates a spreadsheet from a `spreadsheets.create` body and returns its id.
    pub async fn create_spreadsheet(&self, token: &str, body: &Value) -> ApiResult<String> {
        let url = format!("{}/v4/spreadsheets", self.sheets_base_url);
        let response = self.client.post(&url).bearer_auth(token).json(body).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let created: CreateResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("invalid spreadsheets.create response: {e}")))?;

        created
            .spreadsheet_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::Parse("spreadsheets.create returned no spreadsheetId".to_string()))
    }

    /// Overwrites `range` with `values`, taking every cell literally.
    pub async fn write_values(
        &self,
        token: &str,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<String>],
    ) -> ApiResult<()> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.sheets_base_url,
            spreadsheet_id,
            urlencoding::encode(range)
        );

        let response = self
            .client
            .put(&url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(token)
            .json(&json!({ "values": values }))
            .send()
            .await?;

        Self::expect_success(response).await
    }

    /// Applies `requests` in one `batchUpdate`.
    pub async fn batch_update(
        &self,
        token: &str,
        spreadsheet_id: &str,
        requests: &[Value],
    ) -> ApiResult<()> {
        let url = format!(
            "{}/v4/spreadsheets/{}:batchUpdate",
            self.sheets_base_url, spreadsheet_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "requests": requests }))
            .send()
            .await?;

        Self::expect_success(response).await
    }

    /// Grants read access to anyone with the link.
    pub async fn share_public(&self, token: &str, file_id: &str) -> ApiResult<()> {
        let url = format!(
            "{}/drive/v3/files/{}/permissions",
            self.drive_base_url, file_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "type": "anyone", "role": "reader" }))
            .send()
            .await?;

        Self::expect_success(response).await
    }

    async fn expect_success(response: reqwest::Response) -> ApiResult<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }
}
