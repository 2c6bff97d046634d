//! Terminal implementations of the clipboard and share capabilities.

use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use clipscope_common::{ClipboardError, ShareError};
use clipscope_common_ui::{Clipboard, SharePayload, ShareTarget};

/// Conventional exit status of a process interrupted with Ctrl-C.
const CANCELLED_EXIT_CODE: i32 = 130;

/// Sets the system clipboard through the terminal with an OSC 52 escape
/// sequence. Works over SSH; terminals that don't support it ignore it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    pub fn new() -> Self {
        Self
    }

    pub fn sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
    }
}

#[async_trait]
impl Clipboard for Osc52Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut out = tokio::io::stdout();
        out.write_all(Self::sequence(text).as_bytes()).await?;
        out.flush().await?;
        debug!("Wrote {} bytes to clipboard via OSC 52", text.len());
        Ok(())
    }
}

/// Hands share payloads to an external program as JSON on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandShare {
    program: String,
    args: Vec<String>,
}

impl CommandShare {
    /// Split a whitespace-separated command line. `None` when blank.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl ShareTarget for CommandShare {
    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
        let body = serde_json::to_vec(payload).map_err(|e| ShareError::Failed(e.to_string()))?;

        info!("Sharing '{}' via {}", payload.title, self.program);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // The helper may exit without reading; its exit status still decides the outcome.
            if let Err(e) = stdin.write_all(&body).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    warn!("Could not hand payload to {}: {}", self.program, e);
                    if let Err(kill_err) = abandon(child).await {
                        warn!("Failed to stop {}: {}", self.program, kill_err);
                    }
                    return Err(e.into());
                }
            }
        }

        let status = child.wait().await?;
        match status.code() {
            Some(0) => Ok(()),
            Some(CANCELLED_EXIT_CODE) | None => Err(ShareError::Aborted),
            Some(code) => Err(ShareError::Failed(format!(
                "'{}' exited with status {}",
                self.program, code
            ))),
        }
    }
}

/// Kill a helper we gave up on and reap it.
async fn abandon(mut child: Child) -> std::io::Result<ExitStatus> {
    child.start_kill()?;
    child.wait().await
}
