//! # promptbank-app
//!
//! Terminal browser for a prompt catalog.
//!
//! - [`controller`]: [`App`] owns the [`AppState`] and applies [`Intent`]s
//! - [`admin_gate`]: logo-tap burst detection that reveals the login prompt
//! - [`toast`]: transient notifications
//! - [`clipboard`]: clipboard port and the system implementation
//! - [`render`]: text views of a state snapshot
//! - [`commands`] and [`repl`]: the line-oriented front end
//! - [`settings`]: environment and command-line configuration

pub mod admin_gate;
pub mod clipboard;
pub mod commands;
pub mod controller;
pub mod render;
pub mod repl;
pub mod settings;
pub mod toast;

pub use clipboard::{Clipboard, SystemClipboard};
pub use commands::{Command, CommandError};
pub use controller::{App, AppState, FormField, FormMode, FormState, Intent};
pub use repl::{Reply, Session};
pub use settings::AppSettings;
pub use toast::{Toast, ToastKind};
