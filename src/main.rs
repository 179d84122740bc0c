//! Terminal falling-block runner (default binary).
//!
//! Uses crossterm for input and a framebuffer-based renderer. The loop renders a
//! frame, waits for input until the next fixed step is due, then advances gravity.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{info, warn};

use tui_blockfall::core::{GameSnapshot, GameState};
use tui_blockfall::input::{handle_key_event, is_actionable, should_quit};
use tui_blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::GameAction;
use tui_blockfall::GameConfig;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;
    for warning in &config.warnings {
        warn!("{}", warning);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Route `log` output to the configured file. Without a path logging stays off so
/// nothing is written over the game screen.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("opening log file {}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    let mut game_state = GameState::with_randomizer(config.seed, config.randomizer);
    game_state.start();
    info!(
        "session start: seed {}, randomizer {}, tick {}ms",
        config.seed,
        config.randomizer.as_str(),
        config.tick_ms
    );

    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(u64::from(config.tick_ms));

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game_state.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_actionable(&key) => {
                    if should_quit(key) {
                        info!(
                            "quit: score {}, level {}, lines {}",
                            game_state.score(),
                            game_state.level(),
                            game_state.lines()
                        );
                        return Ok(());
                    }

                    match handle_key_event(key) {
                        Some(GameAction::Restart) if !game_state.is_game_over() => {}
                        Some(action) => {
                            game_state.apply_action(action);
                        }
                        None => {}
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            game_state.tick(elapsed.as_millis().min(u128::from(u32::MAX)) as u32);
        }
    }
}
