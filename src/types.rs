//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions (rows are indexed top to bottom)
pub const BOARD_HEIGHT: usize = 20;
pub const CLASSIC_WIDTH: usize = 10;
pub const ADVANCED_WIDTH: usize = 12;

/// Side length of a piece's working matrix
pub const MATRIX_SIZE: usize = 4;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const FALL_INTERVAL_MS: u32 = 750;
pub const SOFT_DROP_INTERVAL_MS: u32 = 75;

/// Scoring
pub const LINE_SCORE: u32 = 100;
pub const SCORE_DIGITS: usize = 5;

/// Shape draw weights, indexed by shape id
pub const CLASSIC_WEIGHTS: [u32; 7] = [10, 15, 15, 15, 15, 10, 20];
pub const ADVANCED_WEIGHTS: [u32; 10] = [10, 15, 15, 15, 15, 10, 5, 5, 5, 5];

/// Game-over choreography tuning
pub const MIN_TITLE_SCALE: f32 = 0.8;
pub const MAX_TITLE_SCALE: f32 = 1.0;
pub const BACKDROP_FADE_SPEED: f32 = 2.0;

/// Rule variant, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Classic,
    Advanced,
}

impl Mode {
    /// Board width for this rule set (height is shared).
    pub fn board_width(self) -> usize {
        match self {
            Mode::Classic => CLASSIC_WIDTH,
            Mode::Advanced => ADVANCED_WIDTH,
        }
    }

    /// Shape draw weights for this rule set.
    pub fn weights(self) -> &'static [u32] {
        match self {
            Mode::Classic => &CLASSIC_WEIGHTS,
            Mode::Advanced => &ADVANCED_WEIGHTS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::Advanced => "advanced",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color from a hue in degrees at full saturation and value.
    pub fn from_hue(hue_degrees: f32) -> Self {
        let h = hue_degrees.rem_euclid(360.0) / 60.0;
        let x = 1.0 - (h % 2.0 - 1.0).abs();
        let (r, g, b) = match h as u32 {
            0 => (1.0, x, 0.0),
            1 => (x, 1.0, 0.0),
            2 => (0.0, 1.0, x),
            3 => (0.0, x, 1.0),
            4 => (x, 0.0, 1.0),
            _ => (1.0, 0.0, x),
        };
        Self::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }

    /// Blend toward another color; `t` = 0 keeps `self`, `t` = 1 yields `other`.
    pub fn blend(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Scale brightness by a factor in `[0, 1]`.
    pub fn scaled(self, factor: f32) -> Rgb {
        let f = factor.clamp(0.0, 1.0);
        Rgb::new(
            (self.r as f32 * f) as u8,
            (self.g as f32 * f) as u8,
            (self.b as f32 * f) as u8,
        )
    }
}

/// A board cell: `None` empty, `Some(color)` locked/occupied.
pub type BoardCell = Option<Rgb>;

/// Logical player actions, abstracted from any input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    Pause,
}

impl GameAction {
    pub fn as_str(self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
            GameAction::Pause => "pause",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_dimensions() {
        assert_eq!(Mode::Classic.board_width(), 10);
        assert_eq!(Mode::Advanced.board_width(), 12);
        assert_eq!(Mode::Classic.weights().len(), 7);
        assert_eq!(Mode::Advanced.weights().len(), 10);
    }

    #[test]
    fn hue_primaries() {
        assert_eq!(Rgb::from_hue(0.0), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hue(120.0), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hue(240.0), Rgb::new(0, 0, 255));
        // Hue wraps.
        assert_eq!(Rgb::from_hue(360.0), Rgb::from_hue(0.0));
    }

    #[test]
    fn blend_endpoints() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 100, 50);
        assert_eq!(a.blend(b, 0.0), a);
        assert_eq!(a.blend(b, 1.0), b);
    }
}
