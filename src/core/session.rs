//! Game session - the per-tick state machine.
//!
//! One `Session` owns the board, the active and next pieces, the factory and
//! the score; nothing is ambient. The host calls `tick` once per frame with
//! the elapsed wall-clock time and the logical input gathered for that tick.
//!
//! Gravity uses an accumulator that only grows while `Playing`, so paused
//! time never counts toward the fall interval.

use tracing::{debug, info};

use crate::core::board::Board;
use crate::core::catalog::Catalog;
use crate::core::generator::PieceFactory;
use crate::core::piece::Piece;
use crate::error::Result;
use crate::types::{Mode, FALL_INTERVAL_MS, LINE_SCORE, SCORE_DIGITS, SOFT_DROP_INTERVAL_MS};

/// Session phase. `GameOver` is terminal: restart and return-to-menu are
/// external transitions that recreate or drop the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Paused,
    GameOver,
}

/// Player commands with an exact inverse, applied speculatively each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
}

impl Command {
    const ALL: [Command; 3] = [Command::MoveLeft, Command::MoveRight, Command::Rotate];

    fn apply(self, piece: &mut Piece, mode: Mode, width: usize) {
        match self {
            Command::MoveLeft => piece.move_left(mode, width),
            Command::MoveRight => piece.move_right(),
            Command::Rotate => piece.rotate(),
        }
    }

    /// Exact inverse: the rotation inverse is three more clockwise turns.
    fn revert(self, piece: &mut Piece, mode: Mode, width: usize) {
        match self {
            Command::MoveLeft => piece.move_right(),
            Command::MoveRight => piece.move_left(mode, width),
            Command::Rotate => {
                piece.rotate();
                piece.rotate();
                piece.rotate();
            }
        }
    }
}

/// Logical input for one tick: edge-triggered actions plus the held soft-drop
/// level and the pause toggle.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub rotate: bool,
    pub soft_drop: bool,
    pub pause: bool,
}

impl TickInput {
    fn requested(&self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left,
            Command::MoveRight => self.move_right,
            Command::Rotate => self.rotate,
        }
    }
}

/// One game session: board, active/next piece, score, phase, timers.
/// Mode and board dimensions are fixed at creation.
#[derive(Debug, Clone)]
pub struct Session {
    mode: Mode,
    board: Board,
    active: Piece,
    next: Piece,
    factory: PieceFactory,
    score: u32,
    fall_timer_ms: u32,
    game_over_ms: u32,
    phase: Phase,
}

impl Session {
    /// Start a session from an already-parsed catalog.
    pub fn new(catalog: Catalog, mode: Mode, seed: u32) -> Result<Self> {
        let mut factory = PieceFactory::new(catalog, mode, seed)?;
        let active = factory.spawn();
        let next = factory.spawn();
        let mut board = Board::new(mode);
        active.stamp(&mut board, true)?;

        info!(mode = mode.as_str(), seed, "session started");
        Ok(Self {
            mode,
            board,
            active,
            next,
            factory,
            score: 0,
            fall_timer_ms: 0,
            game_over_ms: 0,
            phase: Phase::Playing,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    /// The upcoming piece, for preview rendering.
    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Score zero-padded to the fixed display width.
    pub fn formatted_score(&self) -> String {
        format!("{:0width$}", self.score, width = SCORE_DIGITS)
    }

    /// Seconds since the session entered `GameOver`; drives the end scene.
    pub fn game_over_elapsed(&self) -> f32 {
        self.game_over_ms as f32 / 1000.0
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Advance one tick. `elapsed_ms` is real time since the previous tick.
    pub fn tick(&mut self, elapsed_ms: u32, input: &TickInput) -> Result<()> {
        match self.phase {
            Phase::Playing => self.play_tick(elapsed_ms, input),
            Phase::Paused => {
                if input.pause {
                    self.phase = Phase::Playing;
                    debug!("resumed");
                }
                Ok(())
            }
            Phase::GameOver => {
                self.game_over_ms = self.game_over_ms.saturating_add(elapsed_ms);
                Ok(())
            }
        }
    }

    fn play_tick(&mut self, elapsed_ms: u32, input: &TickInput) -> Result<()> {
        // Lift the active piece off the board so collision checks only see
        // settled cells.
        self.active.stamp(&mut self.board, false)?;

        // Speculative apply-and-revert for each edge-triggered command.
        let width = self.board.width();
        for command in Command::ALL {
            if !input.requested(command) {
                continue;
            }
            command.apply(&mut self.active, self.mode, width);
            if !self.active.check(&self.board, self.mode)? {
                command.revert(&mut self.active, self.mode, width);
            }
        }

        // Gravity, shortened while soft drop is held.
        let interval = if input.soft_drop {
            SOFT_DROP_INTERVAL_MS
        } else {
            FALL_INTERVAL_MS
        };
        self.fall_timer_ms += elapsed_ms;
        if self.fall_timer_ms >= interval {
            self.fall_timer_ms = 0;
            self.active.move_down();
            if !self.active.check(&self.board, self.mode)? {
                self.active.move_up();
                if self.lock_active()? {
                    // Terminal: no re-stamp, no pause handling this tick.
                    return Ok(());
                }
            }
        }

        self.active.stamp(&mut self.board, true)?;

        if input.pause {
            self.phase = Phase::Paused;
            debug!("paused");
        }
        Ok(())
    }

    /// Lock the active piece, clear lines, promote the next piece. Returns
    /// true when the fresh piece has no legal spawn position (game over).
    fn lock_active(&mut self) -> Result<bool> {
        self.active.stamp(&mut self.board, true)?;

        let cleared = self.board.try_clear_lines(self.mode);
        if !cleared.is_empty() {
            self.score = self
                .score
                .saturating_add(cleared.len() as u32 * LINE_SCORE);
            debug!(lines = cleared.len(), score = self.score, "scored");
        }

        self.active = std::mem::replace(&mut self.next, self.factory.spawn());

        if !self.active.check(&self.board, self.mode)? {
            self.phase = Phase::GameOver;
            self.game_over_ms = 0;
            info!(score = self.score, "game over");
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;

    const GRAY: Rgb = Rgb::new(128, 128, 128);

    /// Catalog of identical one-cell shapes (occupied cell at matrix (1,1)),
    /// enough for the classic weight table. Makes every spawn deterministic.
    fn dot_catalog() -> Catalog {
        let dot = "0 0 0 0  0 1 0 0  0 0 0 0  0 0 0 0\n";
        Catalog::parse(&dot.repeat(7)).unwrap()
    }

    fn dot_session() -> Session {
        Session::new(dot_catalog(), Mode::Classic, 1).unwrap()
    }

    #[test]
    fn gravity_waits_for_the_fall_interval() {
        let mut session = dot_session();
        assert_eq!(session.active().y(), 0);

        session.tick(FALL_INTERVAL_MS - 1, &TickInput::default()).unwrap();
        assert_eq!(session.active().y(), 0);

        session.tick(1, &TickInput::default()).unwrap();
        assert_eq!(session.active().y(), 1);
    }

    #[test]
    fn soft_drop_shortens_the_interval() {
        let mut session = dot_session();
        let input = TickInput {
            soft_drop: true,
            ..TickInput::default()
        };
        session.tick(SOFT_DROP_INTERVAL_MS, &input).unwrap();
        assert_eq!(session.active().y(), 1);
    }

    #[test]
    fn paused_time_does_not_count_as_fall_time() {
        let mut session = dot_session();
        let pause = TickInput {
            pause: true,
            ..TickInput::default()
        };

        session.tick(0, &pause).unwrap();
        assert_eq!(session.phase(), Phase::Paused);

        // A long paused stretch advances nothing.
        session.tick(10_000, &TickInput::default()).unwrap();
        assert_eq!(session.active().y(), 0);

        session.tick(0, &pause).unwrap();
        assert_eq!(session.phase(), Phase::Playing);

        // The full interval is still required after resuming.
        session.tick(FALL_INTERVAL_MS - 1, &TickInput::default()).unwrap();
        assert_eq!(session.active().y(), 0);
        session.tick(1, &TickInput::default()).unwrap();
        assert_eq!(session.active().y(), 1);
    }

    #[test]
    fn blocked_spawn_ends_the_game_immediately() {
        let mut session = dot_session();
        // The dot occupies (1, 4); block the cell below it so the next
        // descent locks, then the promoted piece collides with the lock.
        session.board_mut().set_active(2, 4, true, GRAY).unwrap();

        session.tick(FALL_INTERVAL_MS, &TickInput::default()).unwrap();
        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.score(), 0);

        // Terminal phase only advances the game-over clock.
        session.tick(500, &TickInput::default()).unwrap();
        assert!((session.game_over_elapsed() - 0.5).abs() < 1e-6);
        assert_eq!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn locking_into_a_full_row_scores() {
        let mut session = dot_session();
        // Fill the bottom row except the column the dot will land in.
        for col in 0..session.board().width() {
            if col != 4 {
                session.board_mut().set_active(19, col, true, GRAY).unwrap();
            }
        }

        // The dot cell starts at row 1 and locks when it reaches row 19.
        for _ in 0..19 {
            session.tick(FALL_INTERVAL_MS, &TickInput::default()).unwrap();
        }

        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.score(), LINE_SCORE);
        assert_eq!(session.formatted_score(), "00100");
        // The filled row is gone.
        for col in 0..session.board().width() {
            if col != 4 {
                assert!(!session.board().is_active(19, col).unwrap());
            }
        }
    }

    #[test]
    fn locking_into_two_full_rows_scores_double() {
        // Vertical domino at matrix column 1, rows 0 and 1.
        let domino = "0 1 0 0  0 1 0 0  0 0 0 0  0 0 0 0\n";
        let catalog = Catalog::parse(&domino.repeat(7)).unwrap();
        let mut session = Session::new(catalog, Mode::Classic, 1).unwrap();

        // Fill the bottom two rows except the landing column.
        for row in [18, 19] {
            for col in 0..session.board().width() {
                if col != 4 {
                    session.board_mut().set_active(row, col, true, GRAY).unwrap();
                }
            }
        }

        // The domino spans rows y and y + 1; it locks at y = 18, completing
        // both prepared rows in one clear.
        for _ in 0..19 {
            session.tick(FALL_INTERVAL_MS, &TickInput::default()).unwrap();
        }

        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.score(), 2 * LINE_SCORE);
        assert_eq!(session.formatted_score(), "00200");
        for row in [18, 19] {
            for col in 0..session.board().width() {
                if col != 4 {
                    assert!(!session.board().is_active(row, col).unwrap());
                }
            }
        }
    }

    #[test]
    fn formatted_score_is_zero_padded() {
        let catalog = Catalog::builtin().unwrap();
        let session = Session::new(catalog, Mode::Classic, 1).unwrap();
        assert_eq!(session.formatted_score(), "00000");
    }

    #[test]
    fn new_session_stamps_active_piece() {
        let catalog = Catalog::builtin().unwrap();
        let session = Session::new(catalog, Mode::Classic, 1).unwrap();

        let piece = session.active();
        let mut stamped = 0;
        for i in 0..4 {
            for j in 0..4 {
                if piece.matrix()[i][j] {
                    let row = (piece.y() + i as i32) as usize;
                    let col = (piece.x() + j as i32) as usize;
                    assert!(session.board().is_active(row, col).unwrap());
                    stamped += 1;
                }
            }
        }
        assert!(stamped > 0);
    }
}
