//! promptbank - terminal browser for a prompt catalog

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promptbank_app::{repl, App, AppSettings, Clipboard, Intent, Session, SystemClipboard};

#[derive(Parser)]
#[command(name = "promptbank")]
#[command(about = "Browse, search and manage a shared prompt catalog")]
#[command(version)]
struct Cli {
    /// Record store endpoint (overrides PROMPTBANK_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Admin password (overrides PROMPTBANK_ADMIN_PASSWORD)
    #[arg(long)]
    admin_password: Option<String>,

    /// Use the built-in sample data even when an endpoint is configured
    #[arg(long)]
    mock: bool,

    /// Clipboard command, e.g. "xsel --clipboard --input"
    #[arg(long)]
    clipboard: Option<String>,
}

/// Initialize tracing with configurable output.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
///   RUST_LOG    - standard env filter (default: "promptbank_app=info,promptbank_client=info")
///
/// Console output goes to stderr; stdout carries the rendered views.
///
/// Structured fields used across the crates: `subsystem`, `component`,
/// `op`, `prompt_id`, `result_count`, `duration_ms`, `error`.
fn init_tracing() -> Option<WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "promptbank_app=info,promptbank_client=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("promptbank.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stderr)"),
        "Logging initialized"
    );
    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _file_guard = init_tracing();

    let settings =
        AppSettings::from_env().with_overrides(cli.api_url, cli.admin_password, cli.mock);
    let store =
        promptbank_client::connect(&settings.client).context("Failed to configure record store")?;

    let clipboard: Arc<dyn Clipboard> = match cli.clipboard.as_deref().map(str::split_whitespace) {
        Some(mut parts) => match parts.next() {
            Some(program) => Arc::new(SystemClipboard::with_command(
                program,
                parts.map(str::to_string).collect(),
            )),
            None => Arc::new(SystemClipboard::detect()),
        },
        None => Arc::new(SystemClipboard::detect()),
    };

    let mut app = App::new(store, clipboard, settings.admin_password);
    let mut stdout = tokio::io::stdout();

    stdout
        .write_all(promptbank_app::render::render(app.state()).as_bytes())
        .await?;
    stdout.flush().await?;

    app.dispatch(Intent::Load).await;
    let mut session = Session::new(app);
    stdout.write_all(session.view().as_bytes()).await?;
    stdout.flush().await?;

    repl::run(&mut session, BufReader::new(tokio::io::stdin()), stdout)
        .await
        .context("Input loop failed")?;

    info!("Session ended");
    Ok(())
}
