//! Prospect research through the grounded Gemini model.

use async_trait::async_trait;

use crate::api_clients::GeminiClient;
use crate::config::ResearchConfig;
use crate::error::{ProspectError, Result};
use crate::parser::parse_companies;
use crate::prompt::build_research_prompt;
use crate::prospect::{Geography, ProspectRow};

/// Finds prospect companies for a geography.
#[async_trait]
pub trait ProspectResearcher: Send + Sync {
    /// Returns the normalized rows. An empty vector means nothing was found.
    async fn research(&self, geography: &Geography) -> Result<Vec<ProspectRow>>;
}

/// [`ProspectResearcher`] backed by one `generateContent` call.
pub struct GeminiResearcher {
    client: GeminiClient,
    research: ResearchConfig,
}

impl GeminiResearcher {
    pub fn new(client: GeminiClient, research: ResearchConfig) -> Self {
        Self { client, research }
    }
}

#[async_trait]
impl ProspectResearcher for GeminiResearcher {
    async fn research(&self, geography: &Geography) -> Result<Vec<ProspectRow>> {
        let prompt = build_research_prompt(geography, &self.research);

        tracing::info!(
            location = %geography.location_label(),
            model = %self.client.config().model,
            "Researching prospects"
        );

        let text = self
            .client
            .generate_text(&prompt)
            .await
            .map_err(ProspectError::Research)?;

        let rows = parse_companies(&text)?;
        tracing::info!(count = rows.len(), "Model returned prospects");
        Ok(rows)
    }
}
