//! Publishing prospect rows as a shared Google Sheet.

use async_trait::async_trait;

use crate::api_clients::SheetsClient;
use crate::error::{ProspectError, Result};
use crate::provider_auth::GoogleAuth;
use crate::prospect::{Geography, ProspectRow};
use crate::sheet_layout;

/// Writes rows to a new document and returns its public URL.
#[async_trait]
pub trait SheetPublisher: Send + Sync {
    async fn publish(&self, geography: &Geography, rows: &[ProspectRow]) -> Result<String>;
}

/// [`SheetPublisher`] using the Sheets and Drive REST APIs.
pub struct GoogleSheetPublisher {
    auth: GoogleAuth,
    sheets: SheetsClient,
    brand: String,
}

impl GoogleSheetPublisher {
    pub fn new(auth: GoogleAuth, sheets: SheetsClient, brand: impl Into<String>) -> Self {
        Self {
            auth,
            sheets,
            brand: brand.into(),
        }
    }
}

#[async_trait]
impl SheetPublisher for GoogleSheetPublisher {
    async fn publish(&self, geography: &Geography, rows: &[ProspectRow]) -> Result<String> {
        let token = self.auth.access_token().await?;

        let title = sheet_layout::sheet_title(&self.brand, geography);
        let spreadsheet_id = self
            .sheets
            .create_spreadsheet(&token, &sheet_layout::create_body(&title))
            .await
            .map_err(ProspectError::Sheets)?;
        tracing::info!(%spreadsheet_id, %title, "Created spreadsheet");

        self.sheets
            .write_values(
                &token,
                &spreadsheet_id,
                &sheet_layout::values_anchor(),
                &sheet_layout::value_rows(rows),
            )
            .await
            .map_err(ProspectError::Sheets)?;

        let requests = sheet_layout::format_requests(rows);
        tracing::debug!(requests = requests.len(), "Applying sheet formatting");
        self.sheets
            .batch_update(&token, &spreadsheet_id, &requests)
            .await
            .map_err(ProspectError::Sheets)?;

        self.sheets
            .share_public(&token, &spreadsheet_id)
            .await
            .map_err(ProspectError::Sheets)?;

        Ok(sheet_layout::spreadsheet_url(&spreadsheet_id))
    }
}
