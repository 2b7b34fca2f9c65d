use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs, io, sync::Mutex};
use taskboard::{
    app::run_app,
    config::{Args, Config, StorageKind},
    FileStorage, KanbanBoard, MemoryStorage, Storage,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(config: &Config) -> anyhow::Result<()> {
    if let Some(parent) = config.log_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("opening log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_args(Args::parse())?;
    init_logging(&config)?;

    let storage: Box<dyn Storage> = match config.storage {
        StorageKind::File => Box::new(FileStorage::new(&config.data_dir)),
        StorageKind::Memory => Box::new(MemoryStorage::new()),
    };
    let mut board = KanbanBoard::new(storage);

    info!(data_dir = %config.data_dir.display(), "task board loaded");
    info!(
        "keyboard shortcuts: Ctrl/Cmd+N add task, Escape close modal, drag cards between columns"
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut board);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("{:?}", err);
    }
    Ok(())
}
