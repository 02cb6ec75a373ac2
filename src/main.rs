use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use statuswatch::config::{Overrides, Settings};
use statuswatch::ui::Theme;
use statuswatch::{events, ui, ApiClient, App, FileSource, Page, Source};

#[derive(Parser, Debug)]
#[command(name = "statuswatch", version)]
#[command(about = "Terminal dashboard and status page for monitored endpoints and agents")]
struct Args {
    /// Backend base URL [default: http://localhost:3000]
    #[arg(short, long, conflicts_with = "file")]
    endpoint: Option<String>,

    /// Bearer token sent to the backend
    #[arg(long)]
    token: Option<String>,

    /// Read status data from a JSON file instead of the backend
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Page to open at startup [default: dashboard]
    #[arg(short, long, value_enum)]
    page: Option<Page>,

    /// Refresh interval in seconds [default: 60]
    #[arg(short, long)]
    refresh: Option<u64>,

    /// HTTP request timeout in seconds [default: 10]
    #[arg(long)]
    timeout: Option<u64>,

    /// TOML config file; STATUSWATCH_* environment variables also apply
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            token: self.token.clone(),
            file: self.file.clone(),
            page: self.page,
            refresh_secs: self.refresh,
            timeout_secs: self.timeout,
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(args.overrides());

    if let Some(ref path) = settings.log_file {
        init_logging(path)?;
    }

    let source = build_source(&settings)?;

    // Fetch cycles run on a single worker; the TUI draws on this thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("statuswatch-fetch")
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    info!(source = %source.description(), page = settings.page.query(), "Starting");

    let result = {
        let _guard = runtime.enter();
        run_tui(source, &settings)
    };

    runtime.shutdown_timeout(Duration::from_millis(500));
    result
}

/// Install a file-backed subscriber. Without one, nothing is logged, so
/// log lines never land on the TUI.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("statuswatch=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn build_source(settings: &Settings) -> Result<Source> {
    if let Some(ref path) = settings.file {
        return Ok(FileSource::new(path).into());
    }

    let mut builder = ApiClient::builder()
        .endpoint(&settings.endpoint)
        .timeout(settings.timeout());
    if let Some(ref token) = settings.token {
        builder = builder.token(token);
    }

    Ok(builder.build()?.into())
}

/// Run the TUI with the given data source
fn run_tui(source: Source, settings: &Settings) -> Result<()> {
    // Mount the first page before touching the terminal so errors print normally
    let mut app = App::new(source, settings.page, settings.refresh_interval())?;
    app.theme = Theme::auto_detect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Stop polling before the runtime goes away
    drop(app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        let snapshot = app.snapshot();
        app.clamp_selection(&snapshot);

        terminal.draw(|frame| ui::render(frame, app, &snapshot))?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key_event(app, key)
                }
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                // Terminal will redraw on next iteration
                _ => {}
            }
        }
    }

    info!("Quit");
    Ok(())
}
