//! Logical input collection for terminal environments.
//!
//! Keys map to edge-triggered actions gathered into one `TickInput` per tick.
//! Soft drop is the only held action; terminals that never emit key-release
//! events get a short timeout so a single tap does not stick.

use std::time::Instant;

use crossterm::event::KeyCode;

use crate::core::TickInput;
use crate::types::GameAction;

/// Session-external actions, only honored by the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAction {
    Restart,
    BackToMenu,
}

// In terminals without key-release events, a short timeout prevents a single
// tap of soft drop from turning into a sustained hold.
const SOFT_DROP_RELEASE_TIMEOUT_MS: u32 = 150;

/// Accumulates key events between ticks into a logical `TickInput`.
#[derive(Debug, Clone)]
pub struct InputCollector {
    pending: TickInput,
    soft_drop_held: bool,
    last_soft_drop: Instant,
    release_timeout_ms: u32,
}

impl InputCollector {
    pub fn new() -> Self {
        Self {
            pending: TickInput::default(),
            soft_drop_held: false,
            last_soft_drop: Instant::now(),
            release_timeout_ms: SOFT_DROP_RELEASE_TIMEOUT_MS,
        }
    }

    #[cfg(test)]
    fn with_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    /// Map a key press onto a logical action, recording it for the next tick.
    /// Restart / back-to-menu pass through as meta actions. Once the session
    /// is over there is nothing left to pause, so Escape becomes a second
    /// back-to-menu key.
    pub fn handle_key_press(&mut self, code: KeyCode, game_over: bool) -> Option<MetaAction> {
        if game_over && code == KeyCode::Esc {
            return Some(MetaAction::BackToMenu);
        }
        match self.map_action(code) {
            Some(GameAction::MoveLeft) => self.pending.move_left = true,
            Some(GameAction::MoveRight) => self.pending.move_right = true,
            Some(GameAction::Rotate) => self.pending.rotate = true,
            Some(GameAction::SoftDrop) => {
                self.soft_drop_held = true;
                self.last_soft_drop = Instant::now();
            }
            Some(GameAction::Pause) => self.pending.pause = true,
            None => {
                return match code {
                    KeyCode::Char('r') | KeyCode::Char('R') => Some(MetaAction::Restart),
                    KeyCode::Char('q') | KeyCode::Char('Q') => Some(MetaAction::BackToMenu),
                    _ => None,
                }
            }
        }
        None
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if matches!(
            code,
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S')
        ) {
            self.soft_drop_held = false;
        }
    }

    /// Drain the input collected since the previous tick.
    pub fn take_tick_input(&mut self) -> TickInput {
        // Auto-release when the terminal does not emit release events.
        if self.soft_drop_held
            && self.last_soft_drop.elapsed().as_millis() as u32 > self.release_timeout_ms
        {
            self.soft_drop_held = false;
        }

        let mut input = std::mem::take(&mut self.pending);
        input.soft_drop = self.soft_drop_held;
        input
    }

    fn map_action(&self, code: KeyCode) -> Option<GameAction> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                Some(GameAction::MoveRight)
            }
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::Rotate),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::SoftDrop),
            KeyCode::Esc => Some(GameAction::Pause),
            _ => None,
        }
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}
