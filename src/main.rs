use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use grid_snake::config::{ConfigError, GameConfig, PALETTE};
use grid_snake::engine::{GameEvent, GameLoop, LoopError};
use grid_snake::game::GridState;
use grid_snake::input::{poll_input, GameInput};
use grid_snake::renderer::{self, Screen};
use grid_snake::terminal_runtime::{install_panic_hook, TerminalSession};

/// How long the UI thread waits for a key before redrawing.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about = "Grid snake in the terminal")]
struct Cli {
    /// JSON settings file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Terminal columns per cell.
    #[arg(long)]
    tile_width: Option<u16>,

    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Delay between steps at the start of a game.
    #[arg(long)]
    initial_delay_ms: Option<u64>,

    /// Shortest delay between steps.
    #[arg(long)]
    min_delay_ms: Option<u64>,

    /// Delay reduction per food eaten.
    #[arg(long)]
    delay_step_ms: Option<u64>,

    /// Write logs here; the terminal itself is taken by the game.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Loop(#[from] LoopError),
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    tracing::info!(?config, "starting");

    install_panic_hook();
    run(config)
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid.width = width;
    }
    if let Some(height) = cli.height {
        config.grid.height = height;
    }
    if let Some(tile_width) = cli.tile_width {
        config.tile_width = tile_width;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(ms) = cli.initial_delay_ms {
        config.pacing.initial_delay_ms = ms;
    }
    if let Some(ms) = cli.min_delay_ms {
        config.pacing.min_delay_ms = ms;
    }
    if let Some(ms) = cli.delay_step_ms {
        config.pacing.delay_step_ms = ms;
    }

    config.validate()?;
    Ok(config)
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(config: GameConfig) -> Result<(), AppError> {
    let grid = match config.seed {
        Some(seed) => GridState::with_seed(config.grid, seed),
        None => GridState::new(config.grid),
    };
    let mut screen = Screen::new(grid.snapshot(), config.tile_width);

    let (events_tx, events_rx) = mpsc::channel();
    let mut game = GameLoop::new(grid, config.pacing.to_pacing(), events_tx);
    let direction = game.direction_slot();

    let mut session = TerminalSession::enter()?;
    game.new_game()?;

    loop {
        drain_events(&events_rx, &mut screen);
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &screen, &PALETTE))?;

        match poll_input(INPUT_POLL_INTERVAL)? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Direction(heading)) => direction.store(heading),
            Some(GameInput::Confirm) if screen.accepts_restart() => {
                screen.restart();
                game.new_game()?;
            }
            Some(GameInput::Confirm) | None => {}
        }
    }

    game.stop()?;
    tracing::info!(length = screen.length, "exiting");
    Ok(())
}

fn drain_events(events: &Receiver<GameEvent>, screen: &mut Screen) {
    for event in events.try_iter() {
        screen.apply(event);
    }
}
