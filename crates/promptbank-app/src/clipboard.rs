//! Clipboard port and the system implementation.
//!
//! The system clipboard is reached through the platform's copy utility
//! (`pbcopy`, `wl-copy`, `xclip`, `clip`), fed on stdin.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

use promptbank_core::{Error, Result};

#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Clipboard backed by an external copy command.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    program: String,
    args: Vec<String>,
}

impl SystemClipboard {
    /// Use an explicit command, e.g. `xsel --clipboard --input`.
    pub fn with_command(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Pick the copy utility for the current platform.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::with_command("pbcopy", vec![])
        } else if cfg!(target_os = "windows") {
            Self::with_command("clip", vec![])
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::with_command("wl-copy", vec![])
        } else {
            Self::with_command(
                "xclip",
                vec!["-selection".to_string(), "clipboard".to_string()],
            )
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    #[instrument(skip(self, text), fields(subsystem = "app", component = "clipboard", program = %self.program, len = text.len()))]
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Clipboard(format!("cannot run {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(Error::Clipboard(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        debug!("Copied to clipboard");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_clipboard_error() {
        let clipboard = SystemClipboard::with_command("promptbank-no-such-copy-tool", vec![]);
        let err = clipboard.write_text("hello").await.unwrap_err();
        assert!(matches!(err, Error::Clipboard(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_receives_text() {
        let clipboard = SystemClipboard::with_command("cat", vec![]);
        assert!(clipboard.write_text("hello").await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_is_error() {
        // `false` may exit before reading, so the failure can surface as a
        // broken pipe or as the exit status.
        let clipboard = SystemClipboard::with_command("false", vec![]);
        assert!(clipboard.write_text("hello").await.is_err());
    }
}
