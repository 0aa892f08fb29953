//! `congreso-tui`: terminal preview of the congress site.
//!
//! Three screens (Home, Speakers, Workshops) fed by the same cached
//! content layer the site uses. The speaker and workshop screens drive the
//! carousel engine from terminal resizes, mouse movement and clicks.
//!
//! Logs go to a file (default `/tmp/congreso-tui.log`) so they never draw
//! over the terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use congreso_core::ContentService;

use crate::app::{App, CarouselSettings};

/// Terminal preview of the congress website content.
#[derive(Parser, Debug)]
#[command(name = "congreso-tui", version, about)]
struct Cli {
    /// CMS base URL (overrides `backend.url` from the config file)
    #[arg(short = 'b', long, env = "CONGRESO_BACKEND_URL")]
    backend: Option<String>,

    /// Advance the carousels automatically
    #[arg(long)]
    autoplay: bool,

    /// Autoplay interval, e.g. `3s` or `1500ms` (defaults to the config value)
    #[arg(long, value_parser = parse_interval, requires = "autoplay")]
    interval: Option<Duration>,

    /// Log file path
    #[arg(long, default_value = "/tmp/congreso-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// humantime duration that must be non-zero.
fn parse_interval(raw: &str) -> Result<Duration, String> {
    let interval = humantime::parse_duration(raw).map_err(|e| e.to_string())?;
    if interval.is_zero() {
        return Err("interval must be greater than zero".into());
    }
    Ok(interval)
}

/// File-only tracing. The guard must live until exit so buffered lines
/// are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "congreso_tui={log_level},congreso_core={log_level},congreso_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("congreso-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first, so a panic during setup still restores the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let mut cfg = congreso_config::load_config()?;
    if let Some(ref url) = cli.backend {
        cfg.backend.url.clone_from(url);
    }

    let service = ContentService::connect(
        cfg.backend.base_url()?,
        &cfg.backend.transport(),
        cfg.fetch.policy(),
    )?;

    let carousel = CarouselSettings {
        breakpoints: cfg.carousel.breakpoints()?,
        autoplay: cli.autoplay,
        interval: cli
            .interval
            .unwrap_or_else(|| cfg.carousel.autoplay_interval()),
    };

    info!(
        backend = %service.base_url(),
        autoplay = carousel.autoplay,
        interval = %humantime::format_duration(carousel.interval),
        "starting congreso-tui"
    );

    let mut app = App::new(service, &carousel);
    app.run().await?;

    Ok(())
}
