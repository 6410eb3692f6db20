//! One prospect-generation run: validate, research, publish, summarize.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api_clients::{GeminiClient, GeminiConfig, SheetsClient};
use crate::config::ProspectConfig;
use crate::error::{ProspectError, Result};
use crate::provider_auth::{GoogleAuth, OAuthClientConfig};
use crate::prospect::{Geography, PriorityCounts};
use crate::publisher::{GoogleSheetPublisher, SheetPublisher};
use crate::research::{GeminiResearcher, ProspectResearcher};

/// Body of a generate request. Fields are optional so that a missing field
/// reports the same error as a blank one.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl GenerateRequest {
    pub fn new(area: &str, country: &str, region: Option<&str>) -> Self {
        Self {
            area: Some(area.to_string()),
            country: Some(country.to_string()),
            region: region.map(str::to_string),
        }
    }

    /// Trimmed geography, or [`ProspectError::InvalidInput`] when area or
    /// country is missing or blank.
    pub fn geography(&self) -> Result<Geography> {
        let area = self.area.as_deref().unwrap_or_default();
        let country = self.country.as_deref().unwrap_or_default();
        if area.trim().is_empty() || country.trim().is_empty() {
            return Err(ProspectError::InvalidInput);
        }
        Ok(Geography::new(area, country, self.region.as_deref()))
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateSummary {
    pub url: String,
    pub total: usize,
    pub counts: PriorityCounts,
}

/// Research and publishing, wired together.
#[derive(Clone)]
pub struct ProspectPipeline {
    researcher: Arc<dyn ProspectResearcher>,
    publisher: Arc<dyn SheetPublisher>,
}

impl ProspectPipeline {
    pub fn new(researcher: Arc<dyn ProspectResearcher>, publisher: Arc<dyn SheetPublisher>) -> Self {
        Self {
            researcher,
            publisher,
        }
    }

    /// Builds the Gemini and Google Sheets adapters from configuration.
    pub fn from_config(config: &ProspectConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.server.request_timeout())
            .user_agent(concat!("prospect/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ProspectError::HttpClient)?;

        let gemini = GeminiClient::with_client(
            client.clone(),
            GeminiConfig::from(config.gemini.clone()),
        );
        let researcher = GeminiResearcher::new(gemini, config.research.clone());

        let auth = GoogleAuth::new(client.clone(), OAuthClientConfig::from(&config.google));
        let sheets = SheetsClient::from_settings(client, &config.google);
        let publisher = GoogleSheetPublisher::new(auth, sheets, config.research.brand.as_str());

        Ok(Self::new(Arc::new(researcher), Arc::new(publisher)))
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateSummary> {
        let geography = request.geography()?;

        let rows = self.researcher.research(&geography).await?;
        if rows.is_empty() {
            tracing::info!(location = %geography.location_label(), "No prospects found");
            return Err(ProspectError::NoProspects);
        }

        let url = self.publisher.publish(&geography, &rows).await?;
        let summary = GenerateSummary {
            url,
            total: rows.len(),
            counts: PriorityCounts::tally(&rows),
        };

        tracing::info!(
            url = %summary.url,
            total = summary.total,
            alta = summary.counts.alta,
            media = summary.counts.media,
            bassa = summary.counts.bassa,
            "Prospect sheet published"
        );
        Ok(summary)
    }
}
