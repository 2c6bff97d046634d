// tests/view_tests.rs

use clipscope_common::{Platform, SentimentLabel, SessionConfig, VideoAnalysis};
use clipscope_common_ui::view::{render, Body};
use clipscope_common_ui::Session;

fn cat_video(score: u8) -> VideoAnalysis {
    VideoAnalysis {
        title: "Cat video".to_string(),
        platform: Platform::TikTok,
        author: "x".to_string(),
        summary: "A cat.".to_string(),
        tags: vec!["cats".to_string(), "funny".to_string()],
        sentiment_score: score,
        views_estimate: Some("1.2M".to_string()),
        upload_date: Some("2024-05-01".to_string()),
    }
}

#[test]
fn test_idle_screen_is_welcome_without_history() {
    let session = Session::default();
    let screen = render(&session.snapshot());
    assert_eq!(screen.body, Body::Welcome);
    assert!(screen.form.submit_enabled);
    assert_eq!(screen.form.button_label, "Analyze");
    assert!(screen.history.is_none());
}

#[test]
fn test_analyzing_disables_submit() {
    let mut session = Session::default();
    session.submit("https://tiktok.com/@x/123").unwrap();
    let screen = render(&session.snapshot());
    assert_eq!(screen.body, Body::Loading { url: "https://tiktok.com/@x/123".to_string() });
    assert!(!screen.form.submit_enabled);
    assert_eq!(screen.form.button_label, "Analyzing...");
}

#[test]
fn test_error_message_is_shown_verbatim() {
    let mut session = Session::default();
    session.submit("https://tiktok.com/@x/123").unwrap();
    session.fail("timeout");
    let screen = render(&session.snapshot());
    assert_eq!(screen.body, Body::Error { message: "timeout".to_string() });
    assert!(screen.form.submit_enabled);
}

#[test]
fn test_result_card_and_history_panel() {
    let mut session = Session::default();
    session.submit("https://tiktok.com/@x/123").unwrap();
    session.succeed(cat_video(80));

    let screen = render(&session.snapshot());
    let Body::Result(card) = &screen.body else {
        panic!("expected a result card, got {:?}", screen.body);
    };
    assert_eq!(card.title, "Cat video");
    assert_eq!(card.platform, Platform::TikTok);
    assert_eq!(card.hashtags, vec!["#cats", "#funny"]);
    assert_eq!(card.views.as_deref(), Some("1.2M"));
    assert_eq!(card.upload_date.as_deref(), Some("2024-05-01"));
    assert_eq!(card.url, "https://tiktok.com/@x/123");
    assert_eq!(card.sentiment.label, SentimentLabel::Positive);
    assert_eq!(card.sentiment.score, 80);
    assert_eq!(card.sentiment.filled, 8);

    let panel = screen.history.expect("history panel");
    assert_eq!(panel.entries.len(), 1);
    assert_eq!(panel.entries[0].index, 1);
    assert!(panel.entries[0].current);
}

#[test]
fn test_threshold_comes_from_config() {
    let mut session = Session::new(SessionConfig { history_capacity: 10, positive_threshold: 85 });
    session.submit("https://tiktok.com/@x/123").unwrap();
    session.succeed(cat_video(80));

    let screen = render(&session.snapshot());
    let Body::Result(card) = screen.body else {
        panic!("expected a result card");
    };
    assert_eq!(card.sentiment.label, SentimentLabel::Negative);
}

#[test]
fn test_only_the_shown_entry_is_current() {
    let mut session = Session::default();
    session.submit("https://tiktok.com/@x/1").unwrap();
    session.succeed(cat_video(20));
    session.submit("https://tiktok.com/@x/2").unwrap();
    session.succeed(cat_video(90));
    session.select_from_history("2").unwrap();

    let panel = render(&session.snapshot()).history.unwrap();
    let current: Vec<_> = panel.entries.iter().map(|e| e.current).collect();
    assert_eq!(current, vec![false, true]);
}
