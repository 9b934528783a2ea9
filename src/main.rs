//! Terminal Block Out runner (default binary).
//!
//! It uses crossterm for input and the framebuffer-based renderer from
//! `blockout-term`. Logs go to a file since the terminal is owned by the game.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blockout::core::{GameSnapshot, GameState};
use blockout::input::{handle_key_event, should_quit};
use blockout::term::{FrameBuffer, GameView, TerminalRenderer};
use blockout::types::TICK_MS;
use blockout::{assets, high_score};

#[derive(Parser, Debug)]
#[command(name = "blockout")]
#[command(about = "3D falling-block game in the terminal")]
struct Args {
    /// Shape-set description file (defaults to the built-in flat set)
    #[arg(long)]
    shapes: Option<PathBuf>,

    /// File holding the high score
    #[arg(long, default_value = high_score::DEFAULT_FILE)]
    high_score_file: PathBuf,

    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Log file
    #[arg(long, default_value = "blockout.log")]
    log_file: PathBuf,

    /// Disable logging
    #[arg(long)]
    no_log: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !args.no_log {
        init_logging(&args)?;
    }

    // Load everything fallible before touching the terminal.
    let catalog = assets::catalog_from(args.shapes.as_deref())?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    let best = high_score::read(&args.high_score_file);
    info!(seed, shapes = catalog.len(), high_score = best, "starting");

    let mut game_state = GameState::new(catalog, seed).with_high_score(best);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut game_state);
    // Always try to restore terminal state.
    let _ = term.exit();

    if let Err(err) = high_score::write(&args.high_score_file, game_state.high_score()) {
        warn!("{err:#}");
    }
    info!(
        score = game_state.score(),
        high_score = game_state.high_score(),
        "exiting"
    );
    result
}

fn init_logging(args: &Args) -> Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("failed to create log file {}", args.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "blockout=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, game_state: &mut GameState) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        game_state.snapshot_into(&mut snap);
        view.render_into(&snap, term.viewport()?, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game_state.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game_state.tick(TICK_MS);
        }
    }
}
