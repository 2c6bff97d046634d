// ================================================================
// File: clipscope-common/src/error.rs
// ================================================================

use thiserror::Error;

/// Failures raised by the analysis client. The `Display` text of each
/// variant is what the session shows as its error message.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // The service's own message is shown verbatim.
    #[error("{0}")]
    Service(String),

    #[error("Malformed analysis response: {0}")]
    Malformed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Analysis task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for AnalysisError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            AnalysisError::Task("analysis task was cancelled".to_string())
        } else {
            AnalysisError::Task("analysis task panicked".to_string())
        }
    }
}

/// Rejections raised by the session before any state is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please enter a video URL")]
    EmptyUrl,

    #[error("An analysis is already in progress")]
    Busy,

    #[error("No history entry matches '{0}'")]
    UnknownHistoryItem(String),
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clipboard unavailable: {0}")]
    Unsupported(String),
}

#[derive(Debug, Error)]
pub enum ShareError {
    /// The user dismissed the share sheet. Not a failure.
    #[error("Share cancelled")]
    Aborted,

    #[error("Share failed: {0}")]
    Failed(String),

    #[error("Share I/O error: {0}")]
    Io(#[from] std::io::Error),
}
