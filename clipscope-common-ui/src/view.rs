//! View model: a pure function from a session snapshot to what should be on screen.

use chrono::DateTime;

use clipscope_common::{AnalysisStatus, Platform, SentimentLabel, VideoAnalysis};

use crate::state::Snapshot;

pub const GAUGE_SEGMENTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub form: InputForm,
    pub body: Body,
    /// `None` when there is nothing to list.
    pub history: Option<HistoryPanel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputForm {
    pub url: String,
    pub submit_enabled: bool,
    pub button_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Welcome,
    Loading { url: String },
    Error { message: String },
    Result(ResultCard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: String,
    pub platform: Platform,
    pub author: String,
    pub summary: String,
    pub hashtags: Vec<String>,
    pub views: Option<String>,
    pub upload_date: Option<String>,
    pub url: String,
    pub sentiment: SentimentGauge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentGauge {
    pub score: u8,
    pub label: SentimentLabel,
    /// Segments lit out of `GAUGE_SEGMENTS`.
    pub filled: usize,
}

impl SentimentGauge {
    pub fn new(score: u8, positive_threshold: u8) -> Self {
        let score = score.min(100);
        Self {
            score,
            label: SentimentLabel::from_score(score, positive_threshold),
            filled: (score as usize * GAUGE_SEGMENTS + 50) / 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPanel {
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// 1-based, newest first.
    pub index: usize,
    pub id: String,
    pub title: String,
    pub platform: Platform,
    pub url: String,
    pub when: String,
    /// The entry currently shown in the result card.
    pub current: bool,
}

pub fn render(snapshot: &Snapshot<'_>) -> Screen {
    let form = InputForm {
        url: snapshot.url.to_string(),
        submit_enabled: !snapshot.busy,
        button_label: if snapshot.busy { "Analyzing..." } else { "Analyze" },
    };

    let body = match (snapshot.status, snapshot.result, snapshot.error) {
        (AnalysisStatus::Analyzing, _, _) => Body::Loading {
            url: snapshot.url.to_string(),
        },
        (AnalysisStatus::Error, _, error) => Body::Error {
            message: error.unwrap_or("Analysis failed").to_string(),
        },
        (AnalysisStatus::Success, Some(result), _) => {
            Body::Result(result_card(result, snapshot.url, snapshot.config.positive_threshold))
        }
        _ => Body::Welcome,
    };

    let history = if snapshot.history.is_empty() {
        None
    } else {
        let entries = snapshot
            .history
            .iter()
            .enumerate()
            .map(|(i, item)| HistoryEntry {
                index: i + 1,
                id: item.id.clone(),
                title: item.analysis.title.clone(),
                platform: item.analysis.platform,
                url: item.url.clone(),
                when: format_timestamp(item.timestamp),
                current: snapshot.status == AnalysisStatus::Success
                    && snapshot.url == item.url
                    && snapshot.result == Some(&item.analysis),
            })
            .collect();
        Some(HistoryPanel { entries })
    };

    Screen { form, body, history }
}

fn result_card(result: &VideoAnalysis, url: &str, positive_threshold: u8) -> ResultCard {
    ResultCard {
        title: result.title.clone(),
        platform: result.platform,
        author: result.author.clone(),
        summary: result.summary.clone(),
        hashtags: result.hashtags(),
        views: result.views_estimate.clone(),
        upload_date: result.upload_date.clone(),
        url: url.to_string(),
        sentiment: SentimentGauge::new(result.sentiment_score, positive_threshold),
    }
}

fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown time".to_string())
}
