use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::models::VideoAnalysis;

/// The one operation the frontend needs from the analysis service.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Issue a single request for `url`. No retries, no caching.
    async fn analyze(&self, url: &str) -> Result<VideoAnalysis, AnalysisError>;
}
