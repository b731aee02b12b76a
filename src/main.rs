//! Terminal board runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer for output. Board
//! parameters come from `SKYBLOCKS_*` environment variables. Logs go to the
//! file named by `SKYBLOCKS_LOG_PATH` (filtered by `SKYBLOCKS_LOG`), never to
//! the terminal the board is drawn on.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skyblocks::core::{BoardConfig, BoardEngine, BoardSnapshot};
use skyblocks::input::{handle_key_event, is_restart, should_quit};
use skyblocks::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use skyblocks::types::TICK_MS;

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("SKYBLOCKS_LOG_PATH") else {
        return Ok(());
    };
    let filter = std::env::var("SKYBLOCKS_LOG").unwrap_or_else(|_| "info".to_string());
    let file = File::create(&path).with_context(|| format!("failed to create log file {path}"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let config = BoardConfig::from_env();
    let board = BoardEngine::new(config).context("invalid board configuration")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, board);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!(%err, "failed to restore terminal");
    }
    let stats = term.stats();
    info!(
        frames = stats.frames,
        full_redraws = stats.full_redraws,
        bytes = stats.bytes,
        "renderer stopped"
    );
    result
}

fn run(term: &mut TerminalRenderer, mut board: BoardEngine) -> Result<()> {
    let view = BoardView::default();
    let mut snap = BoardSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        board.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(cleared = board.cleared(), "quit");
                        return Ok(());
                    }
                    if is_restart(key) {
                        board.restart()?;
                    } else if let Some(action) = handle_key_event(key) {
                        board.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with the real frame time so shifts last the same on slow terminals.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            board.tick(elapsed.as_secs_f32());
            if let Some(event) = board.take_last_event() {
                debug!(
                    runs = event.runs,
                    tiles_cleared = event.tiles_cleared,
                    total = board.cleared(),
                    "match"
                );
            }
        }
    }
}
