//! Clipboard and share capabilities, and the payloads handed to them.

use async_trait::async_trait;
use serde::Serialize;

use clipscope_common::{ClipboardError, ShareError, VideoAnalysis};

/// Rich payload for a native share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn new(analysis: &VideoAnalysis, url: &str) -> Self {
        let mut text = format!(
            "{} by {}\n\n{}\n\nSentiment Score: {}/100",
            analysis.title, analysis.author, analysis.summary, analysis.sentiment_score
        );
        let hashtags = analysis.hashtags();
        if !hashtags.is_empty() {
            text.push_str("\n\n");
            text.push_str(&hashtags.join(" "));
        }

        Self {
            title: analysis.title.clone(),
            text,
            url: url.to_string(),
        }
    }
}

/// Plain text placed on the clipboard by the copy action.
pub fn copy_text(analysis: &VideoAnalysis, url: &str) -> String {
    format!("{}\n\n{}\n\n{}", analysis.title, analysis.summary, url)
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// A platform share sheet. Optional: when absent, sharing falls back to copying.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShareTarget: Send + Sync {
    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}
