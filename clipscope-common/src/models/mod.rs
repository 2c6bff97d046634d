// File: clipscope-common/src/models/mod.rs
pub mod analysis;
pub mod history;
pub mod platform;
pub mod session;

pub use analysis::{SentimentLabel, VideoAnalysis};
pub use history::HistoryItem;
pub use platform::Platform;
pub use session::{AnalysisStatus, SessionConfig};
