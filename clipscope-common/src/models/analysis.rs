// File: clipscope-common/src/models/analysis.rs

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::models::platform::Platform;

/// Structured metadata the analysis service extracted for one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAnalysis {
    pub title: String,
    pub platform: Platform,
    pub author: String,
    pub summary: String,
    pub tags: Vec<String>,

    /// 0..=100, higher is more positive.
    pub sentiment_score: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_estimate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
}

impl VideoAnalysis {
    pub fn sentiment_label(&self, positive_threshold: u8) -> SentimentLabel {
        SentimentLabel::from_score(self.sentiment_score, positive_threshold)
    }

    /// Tags rendered the way social platforms expect them (`#cats #funny`).
    pub fn hashtags(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|t| format!("#{}", t.trim_start_matches('#')))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    /// Scores strictly above the threshold are positive.
    pub fn from_score(score: u8, positive_threshold: u8) -> Self {
        if score > positive_threshold {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Negative => write!(f, "Negative"),
        }
    }
}
