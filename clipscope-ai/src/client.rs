use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use clipscope_common::{AnalysisApi, AnalysisError, VideoAnalysis};

use crate::models::ProviderConfig;
use crate::prompt::{analysis_prompt, SYSTEM_PROMPT};
use crate::provider::Provider;
use crate::response::parse_analysis;
use crate::traits::ModelProvider;

/// Turns a video URL into a validated `VideoAnalysis` using one model provider.
pub struct AnalysisClient {
    provider: Arc<dyn ModelProvider>,
}

impl AnalysisClient {
    /// Create a client on top of an already-built provider
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    /// Build the provider described by `config` and wrap it
    pub fn from_config(config: ProviderConfig) -> Result<Self, AnalysisError> {
        Ok(Self::new(Provider::from_config(config)?))
    }

    /// Name of the provider requests go to
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

#[async_trait]
impl AnalysisApi for AnalysisClient {
    async fn analyze(&self, url: &str) -> Result<VideoAnalysis, AnalysisError> {
        info!("Analyzing {} via {}", url, self.provider.name());

        let raw = self
            .provider
            .generate_json(SYSTEM_PROMPT, &analysis_prompt(url))
            .await
            .map_err(|e| {
                error!("Analysis request for {} failed: {}", url, e);
                e
            })?;
        debug!("Model output for {}: {}", url, raw);

        let analysis = parse_analysis(&raw).map_err(|e| {
            error!("Analysis response for {} rejected: {}", url, e);
            e
        })?;

        info!(
            "Analysis complete: '{}' on {} (sentiment {})",
            analysis.title, analysis.platform, analysis.sentiment_score
        );
        Ok(analysis)
    }
}
