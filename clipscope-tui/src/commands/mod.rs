// File: clipscope-tui/src/commands/mod.rs

use tracing::{error, info};

use clipscope_common_ui::{render, Controller, Feedback, Intent};

use crate::render::{paint, paint_history};

pub const HELP: &str = "\
Commands:
  analyze <url>     analyze a video link (a bare URL works too)
  show              redraw the current result
  copy              copy title, summary and link to the clipboard
  share             share the result (falls back to copy)
  download          download the video (not available)
  open              open the source link in your browser
  history           list recent analyses
  select <n|id>     reopen a history entry
  clear             forget the history
  help
  quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Show,
    Open,
    History,
    Help,
    Quit,
    Usage(&'static str),
    Unknown(String),
    Empty,
}

fn looks_like_url(word: &str) -> bool {
    let lower = word.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.")
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    if cmd.is_empty() {
        return Command::Empty;
    }
    if looks_like_url(cmd) {
        return Command::Intent(Intent::Submit(line.to_string()));
    }

    match cmd.to_lowercase().as_str() {
        // an empty argument is handed on so the session reports it
        "analyze" | "a" => Command::Intent(Intent::Submit(rest.to_string())),
        "copy" | "c" => Command::Intent(Intent::Copy),
        "share" | "s" => Command::Intent(Intent::Share),
        "download" | "d" => Command::Intent(Intent::Download),
        "select" | "sel" => {
            if rest.is_empty() {
                Command::Usage("Usage: select <n|id>")
            } else {
                Command::Intent(Intent::SelectHistory(rest.to_string()))
            }
        }
        "clear" => Command::Intent(Intent::ClearHistory),
        "show" => Command::Show,
        "open" | "o" => Command::Open,
        "history" | "h" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Run one input line. Returns (quit_requested, output).
pub async fn dispatch(line: &str, controller: &mut Controller) -> (bool, Option<String>) {
    match parse_command(line) {
        Command::Intent(intent) => {
            let feedback = controller.handle(intent).await;
            let output = match &feedback {
                Feedback::Selected { .. } => Some(paint(&render(&controller.snapshot()))),
                Feedback::ShareCancelled => None,
                other => Some(other.to_string()),
            };
            (false, output)
        }
        Command::Show => (false, Some(paint(&render(&controller.snapshot())))),
        Command::History => {
            let screen = render(&controller.snapshot());
            let output = match &screen.history {
                Some(panel) => paint_history(panel),
                None => "History is empty.".to_string(),
            };
            (false, Some(output))
        }
        Command::Open => (false, Some(open_source(controller))),
        Command::Help => (false, Some(HELP.to_string())),
        Command::Quit => (true, Some("Goodbye!".to_string())),
        Command::Usage(usage) => (false, Some(usage.to_string())),
        Command::Unknown(cmd) => (
            false,
            Some(format!("Unknown command '{}'. Type 'help' for usage.", cmd)),
        ),
        Command::Empty => (false, None),
    }
}

fn open_source(controller: &Controller) -> String {
    let session = controller.session();
    if session.result().is_none() {
        return Feedback::NoResult.to_string();
    }
    let url = session.url();
    info!("Opening {} in browser", url);
    match open::that(url) {
        Ok(()) => format!("Opened {}", url),
        Err(e) => {
            error!("Failed to open {}: {}", url, e);
            format!("Could not open {}: {}", url, e)
        }
    }
}
