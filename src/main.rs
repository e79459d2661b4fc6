//! Terminal gameplay entrypoint.
//!
//! Runs the session at a fixed tick, feeding it wall-clock elapsed time and
//! the logical input collected since the previous tick. The game-over scene
//! is driven through the terminal stage once the session goes terminal.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use wraptris::core::{Catalog, Phase, Session};
use wraptris::input::{InputCollector, MetaAction};
use wraptris::stage::GameOverScene;
use wraptris::term::{GameView, TermStage, TerminalRenderer};
use wraptris::types::{Mode, TICK_MS};

/// wraptris - falling blocks, with or without walls
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Play the wrap-around rule set (12-wide board, paired line clears)
    #[arg(long)]
    advanced: bool,

    /// Seed for the piece stream (random by default)
    #[arg(long)]
    seed: Option<u32>,
}

const BASE_MUSIC_VOLUME: f32 = 0.8;

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mode = if args.advanced {
        Mode::Advanced
    } else {
        Mode::Classic
    };
    let seed = args.seed.unwrap_or_else(clock_seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, mode, seed);
    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mode: Mode, seed: u32) -> Result<()> {
    let catalog = Catalog::builtin()?;
    let mut session = Session::new(catalog.clone(), mode, seed)?;
    let mut stage = TermStage::new(BASE_MUSIC_VOLUME);
    let mut scene: Option<GameOverScene> = None;
    let mut collector = InputCollector::new();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        GameView::render(term, &session, &stage)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press => {
                        let game_over = session.phase() == Phase::GameOver;
                        if let Some(meta) = collector.handle_key_press(key.code, game_over) {
                            // Restart / menu are gated while the end scene
                            // has the controls disabled.
                            let gated = game_over && !stage.controls_enabled;
                            match meta {
                                MetaAction::BackToMenu if !gated => return Ok(()),
                                MetaAction::Restart if !gated => {
                                    // Same seed, so an explicit --seed keeps
                                    // its piece stream across restarts.
                                    session = Session::new(catalog.clone(), mode, seed)?;
                                    stage = TermStage::new(BASE_MUSIC_VOLUME);
                                    scene = None;
                                    collector = InputCollector::new();
                                }
                                _ => {}
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat; actions stay edge-triggered.
                    }
                    KeyEventKind::Release => collector.handle_key_release(key.code),
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            let elapsed_ms = last_tick.elapsed().as_millis() as u32;
            last_tick = Instant::now();

            let input = collector.take_tick_input();
            session.tick(elapsed_ms, &input)?;

            if session.phase() == Phase::GameOver {
                let scene = scene.get_or_insert_with(|| {
                    let s = GameOverScene::new(mode, stage.music_volume);
                    s.enter(&mut stage);
                    s
                });
                scene.drive(&mut stage, session.game_over_elapsed());
            }
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
