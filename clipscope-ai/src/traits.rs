use async_trait::async_trait;

use clipscope_common::AnalysisError;

/// A generative model endpoint that can answer with a JSON document.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Send one request and return the raw text the model produced.
    async fn generate_json(&self, system: &str, prompt: &str) -> Result<String, AnalysisError>;
}
