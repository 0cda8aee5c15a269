//! Text presentation of an [`AppState`] snapshot.
//!
//! Everything here is a pure function of the state; the REPL prints the
//! result after each command. Card numbers are positions in
//! [`AppState::visible`], starting at 1.

use std::fmt::Write;

use promptbank_core::defaults;
use promptbank_core::Prompt;

use crate::controller::{AppState, FormMode, FormState};
use crate::toast::Toast;

const TITLE: &str = "Bank Prompt";
const TAGLINE: &str = "High Quality Prompt Library";
const LOADING_MESSAGE: &str = "Syncing with database...";
const DEMO_BANNER: &str = "Demo Mode: API URL is not configured. Changes will not be saved.";
const RULE: &str = "------------------------------------------------------------------------";

/// Full screen for the current state: the topmost overlay if one is open,
/// otherwise the catalog.
pub fn render(state: &AppState) -> String {
    let mut out = String::new();
    if let Some(id) = &state.pending_delete {
        out.push_str(&render_delete_confirm(state, id));
    } else if let Some(form) = &state.form {
        out.push_str(&render_form(form));
    } else if state.login.is_some() {
        out.push_str(&render_login(state));
    } else if let Some(prompt) = state.detail_record() {
        out.push_str(&render_detail(prompt, state.is_admin));
    } else {
        out.push_str(&render_catalog(state));
    }
    if let Some(toast) = &state.toast {
        out.push('\n');
        out.push_str(&render_toast(toast));
        out.push('\n');
    }
    out
}

pub fn render_header(state: &AppState) -> String {
    let mut out = String::new();
    let admin = if state.is_admin { "  [admin]" } else { "" };
    let _ = writeln!(out, "{}{}", TITLE, admin);
    let _ = writeln!(out, "{}", TAGLINE);
    let _ = writeln!(out, "{}", RULE);

    let categories: Vec<String> = state
        .categories()
        .into_iter()
        .map(|c| {
            if c == state.filter.category {
                format!("[{}]", c)
            } else {
                c
            }
        })
        .collect();
    let _ = writeln!(out, "Categories: {}", categories.join("  "));

    let search = if state.filter.search.is_empty() {
        "-".to_string()
    } else {
        format!("\"{}\"", state.filter.search)
    };
    let sort = state
        .sort
        .map(|s| s.to_string())
        .unwrap_or_else(|| "default".to_string());
    let _ = writeln!(out, "Search: {}   Sort: {}", search, sort);
    out
}

/// Header, optional demo banner and the grid (or its placeholder).
pub fn render_catalog(state: &AppState) -> String {
    let mut out = render_header(state);
    if state.demo_mode && !state.loading {
        let _ = writeln!(out, "! {}", DEMO_BANNER);
    }
    let _ = writeln!(out, "{}", RULE);

    if state.loading {
        let _ = writeln!(out, "{}", LOADING_MESSAGE);
        return out;
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "{}", error);
        return out;
    }

    let visible = state.visible();
    if visible.is_empty() {
        let _ = writeln!(out, "{}", defaults::EMPTY_STATE_MESSAGE);
        return out;
    }
    for (index, prompt) in visible.iter().enumerate() {
        out.push_str(&render_card(index + 1, prompt));
        out.push('\n');
    }
    out
}

pub fn render_card(number: usize, prompt: &Prompt) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}  ({})", number, prompt.title, prompt.category);
    for line in preview_lines(&prompt.body) {
        let _ = writeln!(out, "    {}", line);
    }
    let _ = writeln!(out, "    {}", format_date(prompt));
    out
}

pub fn render_detail(prompt: &Prompt, is_admin: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", prompt.title);
    let _ = writeln!(out, "{} | {}", prompt.category, format_date(prompt));
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{}", prompt.body);
    let _ = writeln!(out, "{}", RULE);
    let actions = if is_admin {
        "copy | edit | delete | close"
    } else {
        "copy | close"
    };
    let _ = writeln!(out, "{}", actions);
    out
}

pub fn render_login(state: &AppState) -> String {
    let mut out = String::new();
    let masked = state
        .login
        .as_ref()
        .map(|l| "*".repeat(l.password.chars().count()))
        .unwrap_or_default();
    let _ = writeln!(out, "Admin Access");
    let _ = writeln!(out, "Password: {}", masked);
    let _ = writeln!(out, "login <password> | cancel");
    out
}

pub fn render_form(form: &FormState) -> String {
    let mut out = String::new();
    let heading = match form.mode {
        FormMode::Create => "Create New Prompt",
        FormMode::Edit(_) => "Edit Prompt",
    };
    let _ = writeln!(out, "{}", heading);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Title:    {}", form.draft.title);
    let _ = writeln!(out, "Category: {}", form.draft.category);
    let _ = writeln!(out, "Prompt:");
    for line in form.draft.body.lines() {
        let _ = writeln!(out, "  {}", line);
    }
    let _ = writeln!(out, "{}", RULE);
    if form.submitting {
        let _ = writeln!(out, "Saving...");
    } else {
        let _ = writeln!(out, "set title|category|body <text> | submit | cancel");
    }
    out
}

pub fn render_delete_confirm(state: &AppState, id: &str) -> String {
    let title = state
        .find(id)
        .map(|p| p.title.as_str())
        .unwrap_or("this prompt");
    format!(
        "Delete \"{}\"? This cannot be undone.\nyes | no\n",
        title
    )
}

pub fn render_toast(toast: &Toast) -> String {
    format!("[{}] {}", toast.kind, toast.message)
}

/// First lines of `body`, each clipped to the card width.
fn preview_lines(body: &str) -> Vec<String> {
    let mut lines: Vec<String> = body
        .lines()
        .take(defaults::CARD_PREVIEW_LINES)
        .map(|line| clip(line, defaults::CARD_PREVIEW_WIDTH))
        .collect();
    if body.lines().count() > defaults::CARD_PREVIEW_LINES {
        if let Some(last) = lines.last_mut() {
            last.push_str("...");
        }
    }
    lines
}

fn clip(line: &str, width: usize) -> String {
    if line.chars().count() <= width {
        return line.to_string();
    }
    let mut clipped: String = line.chars().take(width.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}

/// Creation date as shown on cards; the raw value when it does not parse.
fn format_date(prompt: &Prompt) -> String {
    prompt
        .created_at_utc()
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| prompt.created_at.clone())
}
