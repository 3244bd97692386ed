//! DirNav — a terminal directory browser built with ratatui.
//!
//! This binary initialises the terminal, runs the main event loop,
//! and restores the terminal on exit or panic.

mod app;
mod input;
mod render;
mod ui;

use std::ffi::OsString;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dirnav_core::service::{Dispatcher, LocalDirectoryService, Outcome};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

use crate::app::{load_settings, App};
use crate::render::{layout, render};

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs to a file (`$DIRNAV_LOG`, else `dirnav.log` in the temp dir) to
/// avoid interfering with the terminal. `RUST_LOG` overrides the level.
fn init_logging() -> anyhow::Result<()> {
    let path = std::env::var_os("DIRNAV_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("dirnav.log"));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn start_dir() -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let home = std::env::var_os("HOME").map(PathBuf::from);
    Ok(resolve_start_dir(std::env::args_os().nth(1), &cwd, home))
}

/// The directory given on the command line (relative to `cwd`), else the
/// home directory, else `cwd`.
fn resolve_start_dir(arg: Option<OsString>, cwd: &Path, home: Option<PathBuf>) -> PathBuf {
    match arg {
        Some(arg) => cwd.join(arg),
        None => home
            .filter(|home| home.is_absolute())
            .unwrap_or_else(|| cwd.to_path_buf()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    let start_dir = start_dir()?;
    let (config, keymap) = load_settings();
    tracing::info!(start = %start_dir.display(), ?config, "starting dirnav");

    let service = Arc::new(LocalDirectoryService::new(config.search.mode));
    let (dispatcher, outcomes) = Dispatcher::new(tokio::runtime::Handle::current(), service);
    let app = App::new(&start_dir, &config, keymap, dispatcher)?;

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, app, outcomes);

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    mut outcomes: UnboundedReceiver<Outcome>,
) -> anyhow::Result<()> {
    app.start();

    loop {
        // 1. Apply finished service calls
        while let Ok(outcome) = outcomes.try_recv() {
            app.handle_outcome(outcome);
        }

        // 2. Lay out and draw
        let size = terminal.size()?;
        let regions = layout(Rect::new(0, 0, size.width, size.height));
        app.set_list_area(regions.list_inner);
        terminal.draw(|f| render(f, &app))?;

        if app.should_quit() {
            break;
        }

        // 3. Poll for crossterm events
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }
    }

    tracing::info!("quit");
    Ok(())
}
