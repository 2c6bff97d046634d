pub mod error;
pub mod models;
pub mod traits;

pub use error::{AnalysisError, ClipboardError, SessionError, ShareError};
pub use models::{AnalysisStatus, HistoryItem, Platform, SentimentLabel, SessionConfig, VideoAnalysis};
pub use traits::api::AnalysisApi;
