use std::fmt;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use clipscope_common::{
    AnalysisApi, AnalysisError, AnalysisStatus, SessionConfig, SessionError, ShareError, VideoAnalysis,
};

use crate::share::{copy_text, Clipboard, SharePayload, ShareTarget};
use crate::state::{Session, Snapshot};

/// Everything the presentation layer can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Submit(String),
    Copy,
    Share,
    Download,
    /// 1-based history position or entry id.
    SelectHistory(String),
    ClearHistory,
}

/// What happened in response to an `Intent`, for the user to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Started { url: String },
    Rejected(SessionError),
    Copied,
    CopyFailed(String),
    Shared,
    /// No usable share target, so the result went to the clipboard instead.
    SharedViaClipboard,
    ShareCancelled,
    NoResult,
    DownloadUnavailable,
    Selected { title: String },
    HistoryCleared,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Started { url } => write!(f, "Analyzing {}...", url),
            Feedback::Rejected(err) => write!(f, "{}", err),
            Feedback::Copied => write!(f, "Copied to clipboard!"),
            Feedback::CopyFailed(reason) => write!(f, "Could not copy: {}", reason),
            Feedback::Shared => write!(f, "Shared."),
            Feedback::SharedViaClipboard => {
                write!(f, "Sharing is not available here, so the details were copied to your clipboard.")
            }
            Feedback::ShareCancelled => Ok(()),
            Feedback::NoResult => write!(f, "Nothing to act on yet. Analyze a video first."),
            Feedback::DownloadUnavailable => write!(
                f,
                "Download is not available: this environment has no backend to stream video files."
            ),
            Feedback::Selected { title } => write!(f, "Showing '{}' from history.", title),
            Feedback::HistoryCleared => write!(f, "History cleared."),
        }
    }
}

/// Owns the session and its collaborators; the single place where user
/// intents and analysis completions turn into state transitions.
pub struct Controller {
    session: Session,
    api: Arc<dyn AnalysisApi>,
    clipboard: Arc<dyn Clipboard>,
    share: Option<Arc<dyn ShareTarget>>,
    in_flight: Option<JoinHandle<Result<VideoAnalysis, AnalysisError>>>,
}

impl Controller {
    pub fn new(config: SessionConfig, api: Arc<dyn AnalysisApi>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            session: Session::new(config),
            api,
            clipboard,
            share: None,
            in_flight: None,
        }
    }

    /// Install a native share target. Without one, sharing copies instead.
    pub fn with_share_target(mut self, target: Arc<dyn ShareTarget>) -> Self {
        self.share = Some(target);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.session.snapshot()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start analyzing `url` in the background. At most one analysis runs at a time.
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, url: &str) -> Result<String, SessionError> {
        if self.in_flight.is_some() {
            return Err(SessionError::Busy);
        }
        let url = self.session.submit(url)?;

        let api = self.api.clone();
        let task_url = url.clone();
        self.in_flight = Some(tokio::spawn(async move { api.analyze(&task_url).await }));
        Ok(url)
    }

    /// Wait for the outstanding analysis and apply it. Pending forever when
    /// nothing is in flight, so it can sit in a `select!` next to user input.
    /// Dropping this future before it resolves leaves the analysis running.
    pub async fn next_completion(&mut self) -> AnalysisStatus {
        let Some(handle) = self.in_flight.as_mut() else {
            return std::future::pending().await;
        };

        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                error!("Analysis task did not finish: {}", join_err);
                Err(AnalysisError::from(join_err))
            }
        };
        self.in_flight = None;
        self.session.complete(outcome);
        self.session.status()
    }

    /// Submit and wait in one step.
    pub async fn analyze(&mut self, url: &str) -> Result<AnalysisStatus, SessionError> {
        self.submit(url)?;
        Ok(self.next_completion().await)
    }

    pub async fn handle(&mut self, intent: Intent) -> Feedback {
        debug!("Handling intent {:?}", intent);
        match intent {
            Intent::Submit(url) => match self.submit(&url) {
                Ok(url) => Feedback::Started { url },
                Err(err) => Feedback::Rejected(err),
            },
            Intent::Copy => self.copy_result().await,
            Intent::Share => self.share_result().await,
            Intent::Download => self.download(),
            Intent::SelectHistory(key) => match self.session.select_from_history(&key) {
                Ok(()) => Feedback::Selected {
                    title: self
                        .session
                        .result()
                        .map(|r| r.title.clone())
                        .unwrap_or_default(),
                },
                Err(err) => Feedback::Rejected(err),
            },
            Intent::ClearHistory => {
                self.session.clear_history();
                Feedback::HistoryCleared
            }
        }
    }

    /// Copy title, summary and link of the current result.
    pub async fn copy_result(&self) -> Feedback {
        let Some(result) = self.session.result() else {
            return Feedback::NoResult;
        };
        self.copy(copy_text(result, self.session.url())).await
    }

    /// Share the current result, falling back to the clipboard when sharing
    /// is unavailable. A user-cancelled share is silently ignored.
    pub async fn share_result(&self) -> Feedback {
        let Some(result) = self.session.result() else {
            return Feedback::NoResult;
        };
        let payload = SharePayload::new(result, self.session.url());

        let Some(target) = &self.share else {
            info!("No share target configured; copying instead");
            return self.share_fallback(&payload).await;
        };

        match target.share(&payload).await {
            Ok(()) => Feedback::Shared,
            Err(ShareError::Aborted) => {
                debug!("Share cancelled by user");
                Feedback::ShareCancelled
            }
            Err(err) => {
                warn!("Share failed, copying instead: {}", err);
                self.share_fallback(&payload).await
            }
        }
    }

    /// There is no backend to stream files from; acknowledge and do nothing.
    pub fn download(&self) -> Feedback {
        if self.session.result().is_none() {
            return Feedback::NoResult;
        }
        info!("Download requested for {}; not supported", self.session.url());
        Feedback::DownloadUnavailable
    }

    async fn share_fallback(&self, payload: &SharePayload) -> Feedback {
        let text = format!("{}\n\n{}", payload.text, payload.url);
        match self.copy(text).await {
            Feedback::Copied => Feedback::SharedViaClipboard,
            other => other,
        }
    }

    async fn copy(&self, text: String) -> Feedback {
        match self.clipboard.write_text(&text).await {
            Ok(()) => Feedback::Copied,
            Err(err) => {
                error!("Clipboard write failed: {}", err);
                Feedback::CopyFailed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clipscope_common::{ClipboardError, Platform};
    use crate::share::{MockClipboard, MockShareTarget};

    struct FixedApi;

    #[async_trait]
    impl AnalysisApi for FixedApi {
        async fn analyze(&self, _url: &str) -> Result<VideoAnalysis, AnalysisError> {
            Ok(VideoAnalysis {
                title: "Cat video".to_string(),
                platform: Platform::TikTok,
                author: "x".to_string(),
                summary: "A cat.".to_string(),
                tags: vec!["cats".to_string(), "funny".to_string()],
                sentiment_score: 80,
                views_estimate: None,
                upload_date: None,
            })
        }
    }

    fn controller(clipboard: MockClipboard) -> Controller {
        Controller::new(SessionConfig::default(), Arc::new(FixedApi), Arc::new(clipboard))
    }

    #[tokio::test]
    async fn copy_without_result_touches_nothing() {
        let mut clipboard = MockClipboard::new();
        clipboard.expect_write_text().never();
        let mut share = MockShareTarget::new();
        share.expect_share().never();

        let mut controller = controller(clipboard).with_share_target(Arc::new(share));
        assert_eq!(controller.handle(Intent::Copy).await, Feedback::NoResult);
        assert_eq!(controller.handle(Intent::Share).await, Feedback::NoResult);
        assert_eq!(controller.handle(Intent::Download).await, Feedback::NoResult);
        assert_eq!(controller.session().status(), AnalysisStatus::Idle);
    }

    #[tokio::test]
    async fn copy_writes_title_summary_and_link() {
        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_write_text()
            .withf(|text| text.to_string() == "Cat video\n\nA cat.\n\nhttps://tiktok.com/@x/123")
            .times(1)
            .returning(|_| Ok(()));

        let mut controller = controller(clipboard);
        controller.analyze("https://tiktok.com/@x/123").await.unwrap();
        assert_eq!(controller.handle(Intent::Copy).await, Feedback::Copied);
    }

    #[tokio::test]
    async fn share_without_target_falls_back_to_copy() {
        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_write_text()
            .withf(|text| text.contains("Sentiment Score: 80/100") && text.ends_with("https://tiktok.com/@x/123"))
            .times(1)
            .returning(|_| Ok(()));

        let mut controller = controller(clipboard);
        controller.analyze("https://tiktok.com/@x/123").await.unwrap();
        assert_eq!(controller.handle(Intent::Share).await, Feedback::SharedViaClipboard);
    }

    #[tokio::test]
    async fn cancelled_share_is_silent() {
        let mut clipboard = MockClipboard::new();
        clipboard.expect_write_text().never();
        let mut share = MockShareTarget::new();
        share.expect_share().times(1).returning(|_| Err(ShareError::Aborted));

        let mut controller = controller(clipboard).with_share_target(Arc::new(share));
        controller.analyze("https://tiktok.com/@x/123").await.unwrap();

        let feedback = controller.handle(Intent::Share).await;
        assert_eq!(feedback, Feedback::ShareCancelled);
        assert!(feedback.to_string().is_empty());
        assert_eq!(controller.session().status(), AnalysisStatus::Success);
    }

    #[tokio::test]
    async fn failed_share_falls_back_to_copy() {
        let mut clipboard = MockClipboard::new();
        clipboard.expect_write_text().times(1).returning(|_| Ok(()));
        let mut share = MockShareTarget::new();
        share
            .expect_share()
            .withf(|payload| payload.title == "Cat video")
            .times(1)
            .returning(|_| Err(ShareError::Failed("no handler".to_string())));

        let mut controller = controller(clipboard).with_share_target(Arc::new(share));
        controller.analyze("https://tiktok.com/@x/123").await.unwrap();
        assert_eq!(controller.handle(Intent::Share).await, Feedback::SharedViaClipboard);
    }

    #[tokio::test]
    async fn clipboard_failure_is_reported() {
        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_write_text()
            .returning(|_| Err(ClipboardError::Unsupported("no terminal".to_string())));

        let mut controller = controller(clipboard);
        controller.analyze("https://tiktok.com/@x/123").await.unwrap();
        assert!(matches!(controller.handle(Intent::Copy).await, Feedback::CopyFailed(_)));
    }

    #[tokio::test]
    async fn download_is_acknowledged_only() {
        let mut clipboard = MockClipboard::new();
        clipboard.expect_write_text().never();

        let mut controller = controller(clipboard);
        controller.analyze("https://tiktok.com/@x/123").await.unwrap();
        assert_eq!(controller.handle(Intent::Download).await, Feedback::DownloadUnavailable);
        assert_eq!(controller.session().history().len(), 1);
    }
}
