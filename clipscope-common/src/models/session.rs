// File: clipscope-common/src/models/session.rs

use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Analyzing,
    Success,
    Error,
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisStatus::Idle => write!(f, "idle"),
            AnalysisStatus::Analyzing => write!(f, "analyzing"),
            AnalysisStatus::Success => write!(f, "success"),
            AnalysisStatus::Error => write!(f, "error"),
        }
    }
}

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
pub const DEFAULT_POSITIVE_THRESHOLD: u8 = 50;
/// Upper bound accepted from the command line.
pub const MAX_HISTORY_CAPACITY: usize = 100;

/// Tunables for the session and its presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of remembered analyses.
    pub history_capacity: usize,
    /// Sentiment scores strictly above this are labelled positive.
    pub positive_threshold: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            positive_threshold: DEFAULT_POSITIVE_THRESHOLD,
        }
    }
}
