//! Terminal implementation of the presentation seam.
//!
//! Stores the property values the choreography pushes; the game view reads
//! them back when drawing the overlay. There is no real audio device, so the
//! music volume only feeds the on-screen meter.

use crate::stage::Stage;

#[derive(Debug, Clone)]
pub struct TermStage {
    pub controls_enabled: bool,
    pub music_volume: f32,
    pub backdrop_alpha: f32,
    pub title_visible: bool,
    pub title_text: String,
    pub title_alpha: f32,
    pub title_scale: f32,
    pub prompt_alpha: f32,
}

impl TermStage {
    pub fn new(music_volume: f32) -> Self {
        Self {
            controls_enabled: true,
            music_volume,
            backdrop_alpha: 0.0,
            title_visible: false,
            title_text: String::new(),
            title_alpha: 0.0,
            title_scale: 1.0,
            prompt_alpha: 0.0,
        }
    }
}

impl Stage for TermStage {
    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume;
    }

    fn set_backdrop_alpha(&mut self, alpha: f32) {
        self.backdrop_alpha = alpha;
    }

    fn set_title_visible(&mut self, visible: bool) {
        self.title_visible = visible;
    }

    fn set_title_text(&mut self, text: &str) {
        self.title_text = text.to_string();
    }

    fn set_title_alpha(&mut self, alpha: f32) {
        self.title_alpha = alpha;
    }

    fn set_title_scale(&mut self, scale: f32) {
        self.title_scale = scale;
    }

    fn set_prompt_alpha(&mut self, alpha: f32) {
        self.prompt_alpha = alpha;
    }
}
