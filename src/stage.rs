//! Presentation seam and the game-over choreography.
//!
//! The simulation never draws or plays anything itself; it emits named
//! property updates through the [`Stage`] trait. The game-over transition is a
//! fixed per-mode schedule driven by the [`crate::sequencer::Sequencer`] from
//! the wall-clock seconds since the terminal phase was entered.

use crate::sequencer::Sequencer;
use crate::types::{Mode, BACKDROP_FADE_SPEED, MAX_TITLE_SCALE, MIN_TITLE_SCALE};

/// Opaque side-effect surface of the presentation layer.
///
/// Implementations are free to approximate: a terminal front end maps alpha
/// onto color blending, a real UI would set widget opacity.
pub trait Stage {
    /// Enable or disable the restart / back-to-menu controls.
    fn set_controls_enabled(&mut self, enabled: bool);
    /// Background music level, `0.0..=1.0`.
    fn set_music_volume(&mut self, volume: f32);
    /// Full-screen backdrop opacity, `0.0..=1.0`.
    fn set_backdrop_alpha(&mut self, alpha: f32);
    fn set_title_visible(&mut self, visible: bool);
    fn set_title_text(&mut self, text: &str);
    fn set_title_alpha(&mut self, alpha: f32);
    fn set_title_scale(&mut self, scale: f32);
    /// Opacity of the restart / back-to-menu prompts.
    fn set_prompt_alpha(&mut self, alpha: f32);
}

/// The game-over transition for one session.
///
/// Captures the pre-game-over music volume at construction and builds the
/// mode's schedule once; `drive` is then a pure replay of elapsed time.
pub struct GameOverScene {
    mode: Mode,
    sequencer: Sequencer<dyn Stage>,
}

impl GameOverScene {
    pub fn new(mode: Mode, base_volume: f32) -> Self {
        let sequencer = match mode {
            Mode::Classic => classic_schedule(base_volume),
            Mode::Advanced => advanced_schedule(base_volume),
        };
        Self { mode, sequencer }
    }

    /// One-shot setup on entering the terminal phase.
    pub fn enter(&self, stage: &mut dyn Stage) {
        match self.mode {
            Mode::Classic => {
                stage.set_title_text("Game over");
                stage.set_title_visible(true);
                stage.set_title_alpha(0.0);
            }
            Mode::Advanced => {
                stage.set_title_text("YOU DIED");
                stage.set_title_visible(false);
            }
        }
        stage.set_backdrop_alpha(0.0);
        stage.set_prompt_alpha(0.0);
    }

    /// Resolve `elapsed` seconds since game over and apply one step.
    pub fn drive(&self, stage: &mut (dyn Stage + 'static), elapsed: f32) {
        self.sequencer.run(stage, elapsed);
    }
}

/// Simple fade-in: one beat of silence dimming, then everything fades
/// together.
fn classic_schedule(base_volume: f32) -> Sequencer<dyn Stage> {
    Sequencer::new()
        .then(1.0, move |stage: &mut (dyn Stage + 'static), _progress| {
            stage.set_controls_enabled(false);
            stage.set_music_volume(base_volume / 4.0);
        })
        .then(1.0, |stage, progress| {
            stage.set_backdrop_alpha(progress);
            stage.set_title_alpha(progress);
            stage.set_prompt_alpha(progress);
        })
        .settle(move |stage, _progress| {
            stage.set_controls_enabled(true);
            stage.set_music_volume(base_volume);
            stage.set_backdrop_alpha(1.0);
            stage.set_title_alpha(1.0);
            stage.set_prompt_alpha(1.0);
        })
}

/// Multi-phase reveal: the title scales up while fading in over a faster
/// backdrop fade, then yields to the prompts.
fn advanced_schedule(base_volume: f32) -> Sequencer<dyn Stage> {
    const SCALE_DISTANCE: f32 = MAX_TITLE_SCALE - MIN_TITLE_SCALE;

    Sequencer::new()
        .then(1.0, move |stage: &mut (dyn Stage + 'static), _progress| {
            stage.set_controls_enabled(false);
            stage.set_music_volume(base_volume / 4.0);
        })
        .then(4.5, |stage, progress| {
            stage.set_title_visible(true);
            stage.set_title_scale(MIN_TITLE_SCALE + progress * SCALE_DISTANCE);
            stage.set_title_alpha(progress);
            stage.set_backdrop_alpha((progress * BACKDROP_FADE_SPEED).min(1.0));
        })
        .then(0.5, |stage, progress| {
            stage.set_title_alpha(1.0 - progress);
        })
        .then(0.5, |stage, progress| {
            stage.set_prompt_alpha(progress);
        })
        .settle(move |stage, _progress| {
            stage.set_controls_enabled(true);
            stage.set_music_volume(base_volume);
            stage.set_title_scale(MAX_TITLE_SCALE);
            stage.set_title_alpha(0.0);
            stage.set_backdrop_alpha(1.0);
            stage.set_prompt_alpha(1.0);
        })
}
