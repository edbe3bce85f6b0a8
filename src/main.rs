mod app;
mod clock;
mod domain;
mod error;
mod export;
mod history;
mod input;
mod persistence;
mod store;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use clock::SystemClock;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{check_glyph, format_elapsed, status_badge, visible_tasks, ViewOptions};
use export::ExportFormat;
use persistence::{ensure_tasky_dir, init_local_tasky, load_settings, log_file, settings_file, tasks_file, JsonTaskFile, Settings};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use store::TaskStore;
use ticker::DisplayTicker;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "tasky")]
#[command(about = "A terminal task tracker with per-task timers, tags and undo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .tasky directory in the current directory
    Init,
    /// Print tasks using the saved sort and status filter
    List {
        /// Only tasks carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Export all tasks with their current elapsed time
    Export {
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let tasky_dir = init_local_tasky()?;
            println!("Initialized tasky directory: {}", tasky_dir.display());
            println!();
            println!("Tasky will now use this local directory for task storage.");
            println!("Run 'tasky' to start tracking tasks.");
            Ok(())
        }
        Some(Commands::List { tag }) => {
            let dir = ensure_tasky_dir()?;
            init_tracing(&dir)?;
            let (store, settings) = open(&dir);
            print_list(&store, &settings, tag)
        }
        Some(Commands::Export { format, output }) => {
            let dir = ensure_tasky_dir()?;
            init_tracing(&dir)?;
            let (store, _) = open(&dir);
            match output {
                Some(path) => {
                    export::write_export(store.tasks(), format, store.now(), &path)?;
                    eprintln!("Exported {} task(s) to {}", store.tasks().len(), path.display());
                }
                None => {
                    let content = export::render(store.tasks(), format, store.now())?;
                    println!("{}", content);
                }
            }
            Ok(())
        }
        None => run_tui(),
    }
}

/// Opt-in file logging via RUST_LOG; the TUI owns the terminal so logs go to tasky.log
fn init_tracing(dir: &Path) -> Result<()> {
    let Some(filter) = std::env::var("RUST_LOG").ok().and_then(|raw| {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > 4096 {
            return None;
        }
        EnvFilter::try_new(raw).ok()
    }) else {
        return Ok(());
    };

    let path = log_file(dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

/// Open the task store and settings for a data directory
fn open(dir: &Path) -> (TaskStore, Settings) {
    let repository = JsonTaskFile::new(tasks_file(dir));
    info!(path = %repository.path().display(), "opening task file");
    let store = TaskStore::open(Box::new(repository), Box::new(SystemClock));

    let settings = load_settings(settings_file(dir)).unwrap_or_else(|err| {
        warn!(error = %err, "failed to load settings, using defaults");
        Settings::default()
    });
    (store, settings)
}

fn print_list(store: &TaskStore, settings: &Settings, tag: Option<String>) -> Result<()> {
    let view = ViewOptions {
        sort: settings.sort,
        status_filter: settings.status_filter,
        tag_filter: tag,
        ..ViewOptions::default()
    };
    let now = store.now();
    let mut stdout = io::stdout().lock();

    for task in visible_tasks(store.tasks(), &view) {
        let tags: Vec<String> = task.tags.iter().map(|t| format!("[{}]", t)).collect();
        writeln!(
            stdout,
            "{} {}  {} {} {}",
            check_glyph(task.is_completed, false),
            task.title,
            format_elapsed(task.live_elapsed(now)),
            status_badge(task),
            tags.join(" ")
        )?;
    }
    Ok(())
}

fn run_tui() -> Result<()> {
    let tasky_dir = ensure_tasky_dir()?;
    init_tracing(&tasky_dir)?;
    eprintln!("Using tasky directory: {}", tasky_dir.display());

    let (store, settings) = open(&tasky_dir);
    info!(dir = %tasky_dir.display(), "starting tui");
    let mut app = AppState::new(store, settings, tasky_dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Every change is already saved; running timers keep running across restarts
    if let Err(err) = &result {
        eprintln!("Error: {}", err);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut ticker = DisplayTicker::from_millis(app.settings.tick_ms);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        ticker.sync(app.running_visible_ids(), Instant::now());

        // Wait for input, waking up for the next display tick while a timer runs
        if event::poll(ticker.timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    ticker.cancel();
                    return Ok(());
                }
            }
        }

        if ticker.poll(Instant::now()) {
            tracing::trace!("display tick");
        }
    }
}
