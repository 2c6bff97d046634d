// File: clipscope-common/src/models/history.rs

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::analysis::VideoAnalysis;

/// A successful analysis remembered by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub url: String,
    /// Unix milliseconds at which the analysis completed.
    pub timestamp: i64,
    #[serde(flatten)]
    pub analysis: VideoAnalysis,
}

impl HistoryItem {
    /// Stamp a fresh entry with a new id and the current instant.
    pub fn new(analysis: VideoAnalysis, url: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            analysis,
        }
    }
}
