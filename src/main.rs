//! Terminal Tetris runner (default binary).
//!
//! Owns the session: one controller, one framebuffer-backed view and the
//! crossterm event loop that feeds it key events and elapsed time.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{error, info};

use tetris_console::audio;
use tetris_console::config::Config;
use tetris_console::core::{Controller, Jukebox};
use tetris_console::engine::{Game, SimpleRng};
use tetris_console::input::{should_quit, translate, ReleaseTracker};
use tetris_console::term::{FrameBuffer, GameView, Geometry, TerminalRenderer};
use tetris_console::types::{PLAYFIELD_COLUMNS, PLAYFIELD_ROWS};

/// Poll timeout while nothing is scheduled (not playing, no key held).
const IDLE_POLL_MS: u32 = 250;

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config)?;
    info!(?config, "starting");

    // Opened before the alternate screen so device chatter stays out of the game.
    let (jukebox, silenced) = audio::open_jukebox(!config.audio_disabled);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, jukebox);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Some(reason) = silenced {
        eprintln!("tetris-console: played without sound: {reason}");
    }
    if let Err(err) = &result {
        error!(error = %err, "exiting with error");
    }
    result
}

fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: &Config, jukebox: Jukebox) -> Result<()> {
    let geometry = Geometry::new(
        config.width as f32,
        config.height as f32,
        PLAYFIELD_ROWS,
        PLAYFIELD_COLUMNS,
    )?;
    let view = GameView::new(FrameBuffer::new(config.width, config.height), geometry);

    // Each session gets its own engine seed, derived from one base seed.
    let base_seed = config.seed.unwrap_or_else(clock_seed);
    let mut seeds = SimpleRng::new(base_seed);
    let mut controller = Controller::new(move || Game::new(seeds.next_u32()), view, jukebox);
    let mut releases = ReleaseTracker::with_timeout_ms(config.release_timeout_ms);
    info!(base_seed, "session ready");

    let mut last = Instant::now();
    loop {
        term.draw(controller.view().surface())?;

        let wait_ms = [controller.time_until_step(), releases.remaining_ms()]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(IDLE_POLL_MS);

        if event::poll(Duration::from_millis(wait_ms as u64))? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some(input) = translate(key) {
                        releases.observe(input);
                        controller.dispatch(input)?;
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Whole milliseconds only; the remainder carries into the next frame.
        let elapsed_ms = last.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last += Duration::from_millis(elapsed_ms as u64);

        for input in releases.update(elapsed_ms) {
            controller.dispatch(input)?;
        }
        controller.advance(elapsed_ms)?;
    }
}
