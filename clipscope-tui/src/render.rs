// File: clipscope-tui/src/render.rs

use colored::Colorize;

use clipscope_common::SentimentLabel;
use clipscope_common_ui::view::{Body, HistoryPanel, ResultCard, Screen, SentimentGauge, GAUGE_SEGMENTS};

/// Paint the whole screen: body first, then the history list if any.
pub fn paint(screen: &Screen) -> String {
    let mut out = paint_body(&screen.body);
    if let Some(panel) = &screen.history {
        out.push_str("\n\n");
        out.push_str(&paint_history(panel));
    }
    out
}

pub fn paint_body(body: &Body) -> String {
    match body {
        Body::Welcome => format!(
            "{}\nPaste a TikTok, YouTube or Instagram link, or type 'analyze <url>'.",
            "Decode viral content.".bold()
        ),
        Body::Loading { url } => format!("{} {}", "Analyzing".yellow().bold(), url),
        Body::Error { message } => format!("{} {}", "Analysis failed:".red().bold(), message),
        Body::Result(card) => paint_card(card),
    }
}

fn paint_card(card: &ResultCard) -> String {
    let mut lines = Vec::new();

    lines.push(card.title.bold().to_string());
    lines.push(format!("{}  by {}", format!("[{}]", card.platform).cyan(), card.author));
    lines.push(String::new());
    lines.push(card.summary.clone());

    if !card.hashtags.is_empty() {
        lines.push(String::new());
        lines.push(card.hashtags.join(" ").blue().to_string());
    }

    lines.push(String::new());
    lines.push(format!("Sentiment  {}", paint_gauge(&card.sentiment)));

    let mut stats = Vec::new();
    if let Some(views) = &card.views {
        stats.push(format!("Views: {}", views));
    }
    if let Some(date) = &card.upload_date {
        stats.push(format!("Uploaded: {}", date));
    }
    if !stats.is_empty() {
        lines.push(stats.join("   ").dimmed().to_string());
    }

    lines.push(format!("Source     {}", card.url.underline()));
    lines.push(String::new());
    lines.push("copy | share | download | open".dimmed().to_string());

    lines.join("\n")
}

pub fn paint_gauge(gauge: &SentimentGauge) -> String {
    let bar = format!(
        "{}{}",
        "█".repeat(gauge.filled),
        "░".repeat(GAUGE_SEGMENTS.saturating_sub(gauge.filled))
    );
    let label = gauge.label.to_string();
    match gauge.label {
        SentimentLabel::Positive => format!("{} {}/100 {}", bar.green(), gauge.score, label.green().bold()),
        SentimentLabel::Negative => format!("{} {}/100 {}", bar.red(), gauge.score, label.red().bold()),
    }
}

pub fn paint_history(panel: &HistoryPanel) -> String {
    let mut lines = vec!["Recent analyses".bold().to_string()];
    for entry in &panel.entries {
        let marker = if entry.current { "*" } else { " " };
        lines.push(format!(
            "{} {:>2}. {} {}  {}",
            marker,
            entry.index,
            format!("[{}]", entry.platform).cyan(),
            entry.title,
            entry.when.dimmed()
        ));
    }
    lines.push("select <n> to reopen, clear to forget".dimmed().to_string());
    lines.join("\n")
}
