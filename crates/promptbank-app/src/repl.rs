//! Interactive session: turns command lines into intents and prints views.

use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;
use tracing::debug;

use promptbank_core::Result;

use crate::commands::{Command, CommandError, HELP};
use crate::controller::{App, FormField, Intent};
use crate::render;

/// How often timers (toast expiry, logo-tap window) are advanced.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Output of one input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

pub struct Session {
    app: App,
    /// Lines collected by `set body` until a lone ".".
    body_capture: Option<Vec<String>>,
}

impl Session {
    pub fn new(app: App) -> Self {
        Self {
            app,
            body_capture: None,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn is_capturing(&self) -> bool {
        self.body_capture.is_some()
    }

    /// Current screen.
    pub fn view(&self) -> String {
        render::render(self.app.state())
    }

    /// Handle one line of input.
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        if let Some(lines) = self.body_capture.as_mut() {
            if line.trim_end() != "." {
                lines.push(line.trim_end_matches(['\r', '\n']).to_string());
                return Reply::default();
            }
            let body = lines.join("\n");
            self.body_capture = None;
            self.app
                .dispatch(Intent::EditField(FormField::Body, body))
                .await;
            return Reply::text(self.view());
        }

        if line.trim().is_empty() {
            return Reply::default();
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => return Reply::text(format!("{}\n", e)),
        };
        debug!(?command, "command");

        match self.run(command).await {
            Ok(reply) => reply,
            Err(e) => Reply::text(format!("{}\n", e)),
        }
    }

    /// Advance timers; returns the new screen when something changed.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        if self.app.tick(now) && !self.is_capturing() {
            Some(self.view())
        } else {
            None
        }
    }

    async fn run(&mut self, command: Command) -> std::result::Result<Reply, CommandError> {
        let intent = match command {
            Command::Help => return Ok(Reply::text(format!("{}\n", HELP))),
            Command::Quit => {
                return Ok(Reply {
                    output: String::new(),
                    quit: true,
                })
            }
            Command::Search(text) => Intent::SetSearch(text),
            Command::Category(name) => Intent::SetCategory(self.resolve_category(name)?),
            Command::Sort(sort) => Intent::SetSort(sort),
            Command::Open(n) => Intent::OpenDetail(self.card_id(n)?),
            Command::Close => self.close_intent(),
            Command::Copy(n) => Intent::Copy(self.target_id(n)?),
            Command::Logo(taps) => {
                for _ in 1..taps {
                    self.app.dispatch(Intent::LogoTap).await;
                }
                Intent::LogoTap
            }
            Command::Login(password) => {
                self.app.dispatch(Intent::SetPassword(password)).await;
                Intent::SubmitLogin
            }
            Command::Logout => Intent::Logout,
            Command::Add => Intent::OpenCreateForm,
            Command::Edit(n) => Intent::OpenEditForm(self.target_id(n)?),
            Command::Set(FormField::Body, None) => {
                if self.app.state().form.is_none() {
                    return Ok(Reply::text("No form is open\n"));
                }
                self.body_capture = Some(Vec::new());
                return Ok(Reply::text("Enter the prompt text; finish with a line containing only '.'\n"));
            }
            Command::Set(field, value) => {
                Intent::EditField(field, value.unwrap_or_default())
            }
            Command::Submit => Intent::SubmitForm,
            Command::Cancel => self.close_intent(),
            Command::Delete(n) => Intent::RequestDelete(self.target_id(n)?),
            Command::Yes => Intent::ConfirmDelete,
            Command::No => Intent::CancelDelete,
        };
        self.app.dispatch(intent).await;
        Ok(Reply::text(self.view()))
    }

    /// Closes whatever overlay is on top.
    fn close_intent(&self) -> Intent {
        let state = self.app.state();
        if state.pending_delete.is_some() {
            Intent::CancelDelete
        } else if state.form.is_some() {
            Intent::CloseForm
        } else if state.login.is_some() {
            Intent::CloseLogin
        } else {
            Intent::CloseDetail
        }
    }

    fn card_id(&self, number: usize) -> std::result::Result<String, CommandError> {
        self.app
            .state()
            .visible()
            .get(number.wrapping_sub(1))
            .map(|p| p.id.clone())
            .ok_or(CommandError::NoSuchCard(number))
    }

    /// Card `n`, or the record in the detail view.
    fn target_id(&self, number: Option<usize>) -> std::result::Result<String, CommandError> {
        match number {
            Some(n) => self.card_id(n),
            None => self
                .app
                .state()
                .detail
                .clone()
                .ok_or(CommandError::NoSelection),
        }
    }

    fn resolve_category(&self, name: Option<String>) -> std::result::Result<String, CommandError> {
        let categories = self.app.state().categories();
        let Some(name) = name else {
            return Ok(promptbank_core::defaults::ALL_CATEGORIES.to_string());
        };
        categories
            .into_iter()
            .find(|c| c.eq_ignore_ascii_case(&name))
            .ok_or(CommandError::UnknownCategory(name))
    }
}

/// Drive `session` from `input` until `quit` or end of input, writing
/// screens to `output`. Timers keep running between lines.
pub async fn run<R, W>(session: &mut Session, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                let reply = session.handle_line(&line).await;
                if !reply.output.is_empty() {
                    output.write_all(reply.output.as_bytes()).await?;
                    output.flush().await?;
                }
                if reply.quit {
                    break;
                }
            }
            _ = ticker.tick() => {
                if let Some(screen) = session.tick(Instant::now()) {
                    output.write_all(screen.as_bytes()).await?;
                    output.flush().await?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use promptbank_client::MockRecordStore;

    use crate::clipboard::Clipboard;

    struct NullClipboard;

    #[async_trait]
    impl Clipboard for NullClipboard {
        async fn write_text(&self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    async fn session() -> Session {
        let store = Arc::new(MockRecordStore::new().with_delay_ms(0));
        let mut app = App::new(store, Arc::new(NullClipboard), "admin123");
        app.dispatch(Intent::Load).await;
        Session::new(app)
    }

    #[tokio::test]
    async fn test_category_is_case_insensitive() {
        let mut s = session().await;
        s.handle_line("category coding").await;
        assert_eq!(s.app().state().filter.category, "Coding");

        let reply = s.handle_line("category Poetry").await;
        assert_eq!(reply.output, "Unknown category: Poetry\n");

        s.handle_line("category").await;
        assert_eq!(s.app().state().filter.category, "All");
    }

    #[tokio::test]
    async fn test_card_numbers_follow_visible_list() {
        let mut s = session().await;
        s.handle_line("search python").await;
        s.handle_line("open 1").await;
        assert_eq!(s.app().state().detail.as_deref(), Some("2"));

        let reply = s.handle_line("open 2").await;
        assert_eq!(reply.output, "No card 2 in the current list\n");
    }

    #[tokio::test]
    async fn test_body_capture_collects_lines() {
        let mut s = session().await;
        s.handle_line("logo logo logo").await;
        s.handle_line("login admin123").await;
        s.handle_line("add").await;
        s.handle_line("set body").await;
        assert!(s.is_capturing());
        assert_eq!(s.handle_line("first line").await, Reply::default());
        s.handle_line("second line").await;
        let reply = s.handle_line(".").await;

        assert!(!s.is_capturing());
        assert!(reply.output.contains("  second line"));
        let form = s.app().state().form.as_ref().unwrap();
        assert_eq!(form.draft.body, "first line\nsecond line");
    }

    #[tokio::test]
    async fn test_close_picks_top_overlay() {
        let mut s = session().await;
        s.handle_line("open 1").await;
        s.handle_line("logo logo logo").await;
        assert!(s.app().state().login.is_some());
        s.handle_line("close").await;
        assert!(s.app().state().login.is_none());
        assert!(s.app().state().detail.is_some());
        s.handle_line("close").await;
        assert!(s.app().state().detail.is_none());
    }

    #[tokio::test]
    async fn test_copy_without_selection() {
        let mut s = session().await;
        let reply = s.handle_line("copy").await;
        assert_eq!(reply.output, "Open a prompt first or give a card number\n");
    }

    #[tokio::test]
    async fn test_quit_and_blank_lines() {
        let mut s = session().await;
        assert_eq!(s.handle_line("   ").await, Reply::default());
        assert!(s.handle_line("quit").await.quit);
    }
}
