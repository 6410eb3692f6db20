//! One-shot CLI commands that do not run the server.

use std::time::Duration;

use anyhow::{Context, bail};
use prospect_core::{GenerateRequest, GenerateSummary, ProspectConfig, ProspectPipeline};

use crate::protocol::{HealthResult, TIMEOUT_MESSAGE};

const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Calls `/healthz` under `base_url` and returns the reported health.
/// Fails unless the service answers 2xx with status `ok`.
pub async fn ping(base_url: &str) -> anyhow::Result<HealthResult> {
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));

    let client = reqwest::Client::builder()
        .timeout(PING_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("ping: cannot connect to {url}"))?;
    if !response.status().is_success() {
        bail!("ping: {url} answered {}", response.status());
    }

    let health: HealthResult = response
        .json()
        .await
        .context("ping: invalid health response")?;
    if health.status != "ok" {
        bail!("ping: service reports status '{}'", health.status);
    }
    Ok(health)
}

/// Runs the pipeline once under the configured request timeout.
pub async fn generate_once(
    config: &ProspectConfig,
    request: &GenerateRequest,
) -> anyhow::Result<GenerateSummary> {
    let pipeline = ProspectPipeline::from_config(config)?;

    let summary = tokio::time::timeout(config.server.request_timeout(), pipeline.generate(request))
        .await
        .context(TIMEOUT_MESSAGE)??;
    Ok(summary)
}
