//! meshmapper - MeshMapper start screen
//!
//! A terminal launcher for the MeshMapper web maps.
//!
//! Features:
//! - Open the MeshMapper home page and the Wardrive tool
//! - Explore 14 regional maps from a grid
//! - Pin one region to the start screen (remembered across launches)
//!
//! Usage: meshmapper [--dry-run] [--verbose]

mod app;
mod config;
mod launcher;
mod prefs;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use launcher::{DryRunLauncher, SystemLauncher, UrlLauncher};
use prefs::Preferences;
use ratatui::prelude::*;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::io::stdout;
use std::time::Duration;

fn main() -> Result<()> {
    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let dry_run = args.iter().any(|a| a == "--dry-run" || a == "-n");
    let verbose = args.iter().any(|a| a == "--verbose");

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("meshmapper {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(verbose);

    // Run the application
    let result = run_app(dry_run);

    if let Err(e) = result {
        log::error!("Fatal: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"meshmapper - MeshMapper start screen

USAGE:
    meshmapper [OPTIONS]

OPTIONS:
    -n, --dry-run    Log URLs instead of opening them
        --verbose    Write debug output to the log file
    -h, --help       Print help information
    -v, --version    Print version information

KEYBINDINGS:
    Arrows / h j k l Move between buttons
    Enter            Open the focused button
    p / Space        Long-press: pin a region, or remove the pin
    t                Cycle color theme
    Esc / q          Back (quits from the start screen)

FILES:
    ~/.config/meshmapper/config.toml
    ~/.local/share/meshmapper/MeshMapperPrefs.json
    ~/.local/share/meshmapper/meshmapper.log
"#
    );
}

/// Log to a file next to the preferences; the terminal belongs to the UI
fn init_logging(verbose: bool) {
    let Some(dir) = dirs::data_dir().map(|d| d.join("meshmapper")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    if let Ok(log_file) = File::create(dir.join("meshmapper.log")) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

fn run_app(dry_run: bool) -> Result<()> {
    log::info!("meshmapper {} starting", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = config::Config::load()
        .context("Failed to load configuration")?;

    // Storage problems never stop the shell; the pin just won't persist
    let prefs = Preferences::open_default().unwrap_or_else(|e| {
        log::warn!("Preferences unavailable, pin will not persist: {:#}", e);
        Preferences::in_memory()
    });
    if let Some(path) = prefs.path() {
        log::debug!("Preferences at {:?}", path);
    }

    let launcher: Box<dyn UrlLauncher> = if dry_run {
        log::info!("Running in dry-run mode (no URLs will be opened)");
        Box::new(DryRunLauncher)
    } else {
        Box::new(SystemLauncher::new(config.browser.clone()))
    };

    let mut app = App::new(config, prefs, launcher);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .context("Failed to create terminal")?;

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    log::info!("meshmapper exiting");
    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Render UI
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Expire flash message
        app.tick();

        // Poll for events with timeout (for flash expiry)
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        // Check if should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
