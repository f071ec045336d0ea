//! tracktable - browse a track library in the terminal
//!
//! Search, sort, paginate and select rows of a CSV/JSON/YAML track library.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod engine;
mod error;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::services::LibrarySource;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for tracktable
#[derive(Parser, Debug)]
#[command(name = "tracktable")]
#[command(about = "Search, sort and select tracks from a library file")]
#[command(version)]
struct Args {
    /// Library file (.csv, .json, .yaml); the bundled sample when omitted
    #[arg(short, long, env = "TRACKTABLE_LIBRARY")]
    library: Option<PathBuf>,

    /// Rows per page
    #[arg(short, long, env = "TRACKTABLE_PAGE_SIZE")]
    page_size: Option<usize>,

    /// Write logs here instead of ~/.tracktable/tracktable.log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_path) = args.log_file.clone().or_else(Config::log_path) {
        if let Err(e) = init_logging(&log_path) {
            eprintln!("Logging disabled: {:#}", e);
        }
    }

    let mut config = Config::load_or_default();
    if let Some(page_size) = args.page_size {
        config.page_size = page_size.max(1);
    }
    let library_path = args
        .library
        .or_else(|| config.library_path.as_ref().map(PathBuf::from));
    let source = LibrarySource::from_path(library_path);
    info!(source = %source, page_size = config.page_size, "starting tracktable");

    // Setup terminal
    let mut tui = Tui::new()?
        .with_tick_rate(Duration::from_millis(config.tick_rate_ms))
        .with_mouse(config.mouse);
    tui.enter()?;

    let mut app = App::new(config, source);
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "exiting after error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("bye");
    Ok(())
}

/// Send tracing output to `path`; the terminal belongs to the UI
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Could not open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracktable=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
