use tracing::{debug, info, warn};

use clipscope_common::{
    AnalysisError, AnalysisStatus, HistoryItem, SessionConfig, SessionError, VideoAnalysis,
};

use crate::history::History;

/// The application's state machine. All mutation goes through the
/// transition methods below; the presentation layer only sees `Snapshot`s.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    status: AnalysisStatus,
    /// Set for exactly as long as an analysis is outstanding.
    busy: bool,
    url: String,
    result: Option<VideoAnalysis>,
    error: Option<String>,
    history: History,
}

/// Read-only view of a `Session` at one instant.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub config: &'a SessionConfig,
    pub status: AnalysisStatus,
    pub busy: bool,
    pub url: &'a str,
    pub result: Option<&'a VideoAnalysis>,
    pub error: Option<&'a str>,
    pub history: &'a History,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            status: AnalysisStatus::Idle,
            busy: false,
            url: String::new(),
            result: None,
            error: None,
            history: History::new(config.history_capacity),
        }
    }

    /// Idle | Success | Error -> Analyzing. Returns the trimmed URL to analyze.
    /// A rejected submit leaves every field untouched.
    pub fn submit(&mut self, url: &str) -> Result<String, SessionError> {
        if self.busy {
            debug!("Submit rejected: analysis of {} still in flight", self.url);
            return Err(SessionError::Busy);
        }
        let url = url.trim();
        if url.is_empty() {
            return Err(SessionError::EmptyUrl);
        }

        info!("Analysis requested for {}", url);
        self.status = AnalysisStatus::Analyzing;
        self.busy = true;
        self.url = url.to_string();
        self.result = None;
        self.error = None;
        Ok(self.url.clone())
    }

    /// Analyzing -> Success. Returns false when no analysis was outstanding.
    pub fn succeed(&mut self, result: VideoAnalysis) -> bool {
        if self.status != AnalysisStatus::Analyzing {
            warn!("Ignoring analysis result while {}", self.status);
            return false;
        }

        self.history.record(HistoryItem::new(result.clone(), &self.url));
        self.status = AnalysisStatus::Success;
        self.busy = false;
        self.result = Some(result);
        self.error = None;
        info!("Analysis of {} succeeded ({} in history)", self.url, self.history.len());
        true
    }

    /// Analyzing -> Error. Returns false when no analysis was outstanding.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if self.status != AnalysisStatus::Analyzing {
            warn!("Ignoring analysis failure while {}", self.status);
            return false;
        }

        let message = message.into();
        warn!("Analysis of {} failed: {}", self.url, message);
        self.status = AnalysisStatus::Error;
        self.busy = false;
        self.result = None;
        self.error = Some(message);
        true
    }

    /// Apply the outcome of the analysis call.
    pub fn complete(&mut self, outcome: Result<VideoAnalysis, AnalysisError>) -> bool {
        match outcome {
            Ok(result) => self.succeed(result),
            Err(err) => self.fail(err.to_string()),
        }
    }

    /// Show a remembered analysis again. No request is made and history is unchanged.
    pub fn select_from_history(&mut self, key: &str) -> Result<(), SessionError> {
        if self.busy {
            return Err(SessionError::Busy);
        }
        let item = self
            .history
            .resolve(key)
            .cloned()
            .ok_or_else(|| SessionError::UnknownHistoryItem(key.trim().to_string()))?;

        debug!("Restoring history entry {} ({})", item.id, item.url);
        self.status = AnalysisStatus::Success;
        self.url = item.url;
        self.result = Some(item.analysis);
        self.error = None;
        Ok(())
    }

    /// Drop every history entry. Status, result and error are untouched.
    pub fn clear_history(&mut self) {
        info!("Clearing {} history entries", self.history.len());
        self.history.clear();
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            config: &self.config,
            status: self.status,
            busy: self.busy,
            url: &self.url,
            result: self.result.as_ref(),
            error: self.error.as_deref(),
            history: &self.history,
        }
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn result(&self) -> Option<&VideoAnalysis> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
