//! Board module - manages the game grid.
//!
//! The board is a `height x width` grid of cells created once per session;
//! classic sessions get 10x20, advanced sessions 12x20. Cells carry occupancy
//! and color in one `Option<Rgb>`. Storage is a flat row-major `Vec` since
//! the width is only known at session start.
//!
//! Coordinates are (row, col) with row 0 at the top. Out-of-range access is a
//! hard error, never a silent no-op: every mutation is expected to be behind a
//! piece collision check.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::error::{GameError, Result};
use crate::types::{BoardCell, Mode, Rgb, BOARD_HEIGHT};

/// The game grid. Dimensions never change after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<BoardCell>,
}

impl Board {
    /// Create an empty board sized for the given mode.
    pub fn new(mode: Mode) -> Self {
        Self::with_size(mode.board_width(), BOARD_HEIGHT)
    }

    /// Create an empty board with explicit dimensions. Heights beyond
    /// `BOARD_HEIGHT` would overrun the line-clear bookkeeping, so this stays
    /// crate-internal and asserts the bound.
    pub(crate) fn with_size(width: usize, height: usize) -> Self {
        debug_assert!(height <= BOARD_HEIGHT);
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.height || col >= self.width {
            return Err(GameError::OutOfBounds { row, col });
        }
        Ok(row * self.width + col)
    }

    /// Whether the cell at (row, col) is occupied.
    pub fn is_active(&self, row: usize, col: usize) -> Result<bool> {
        Ok(self.cells[self.index(row, col)?].is_some())
    }

    /// Set or clear the cell at (row, col). The color only matters when
    /// activating; deactivation discards it.
    pub fn set_active(&mut self, row: usize, col: usize, active: bool, color: Rgb) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = active.then_some(color);
        Ok(())
    }

    /// Read a cell for rendering.
    pub fn cell(&self, row: usize, col: usize) -> Result<BoardCell> {
        Ok(self.cells[self.index(row, col)?])
    }

    /// Iterate rows top to bottom as cell slices.
    pub fn rows(&self) -> impl Iterator<Item = &[BoardCell]> {
        self.cells.chunks(self.width)
    }

    fn is_row_complete(&self, row: usize) -> bool {
        let start = row * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Copy activity and color of every row above `index` down by one, then
    /// clear the top row. Shared primitive for both clearing rule sets.
    fn drop_row(&mut self, index: usize) {
        for row in (1..=index).rev() {
            let src = (row - 1) * self.width;
            let dst = row * self.width;
            self.cells.copy_within(src..src + self.width, dst);
        }
        for cell in &mut self.cells[..self.width] {
            *cell = None;
        }
    }

    /// Clear completed lines under the given rule set and return the indices
    /// of the rows that were cleared, in clearing order.
    ///
    /// Classic: every complete row clears independently, scanned top to
    /// bottom. Advanced: a complete row only clears when the row directly
    /// below it is also complete, and the clear then cascades through the
    /// whole run of consecutive complete rows; an isolated full row stays.
    ///
    /// Completeness flags are computed once up front. `drop_row` only moves
    /// rows above the clear point, so flags at or below the scan cursor stay
    /// accurate throughout.
    pub fn try_clear_lines(&mut self, mode: Mode) -> ArrayVec<usize, BOARD_HEIGHT> {
        let mut complete = [false; BOARD_HEIGHT];
        for row in 0..self.height {
            complete[row] = self.is_row_complete(row);
        }

        let mut cleared = ArrayVec::new();
        let mut row = 0;
        while row < self.height {
            match mode {
                Mode::Classic => {
                    if complete[row] {
                        self.drop_row(row);
                        cleared.push(row);
                    }
                    row += 1;
                }
                Mode::Advanced => {
                    if row + 1 < self.height && complete[row] && complete[row + 1] {
                        while row < self.height && complete[row] {
                            self.drop_row(row);
                            cleared.push(row);
                            row += 1;
                        }
                    } else {
                        row += 1;
                    }
                }
            }
        }

        if !cleared.is_empty() {
            debug!(mode = mode.as_str(), lines = cleared.len(), "cleared lines");
        }
        cleared
    }

    /// Fill an entire row (test setup helper).
    #[cfg(test)]
    pub fn fill_row(&mut self, row: usize, color: Rgb) {
        for col in 0..self.width {
            self.set_active(row, col, true, color).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAY: Rgb = Rgb::new(128, 128, 128);

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(Mode::Classic);
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        for row in 0..20 {
            for col in 0..10 {
                assert!(!board.is_active(row, col).unwrap());
            }
        }
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let mut board = Board::new(Mode::Classic);
        assert_eq!(
            board.is_active(0, 10),
            Err(GameError::OutOfBounds { row: 0, col: 10 })
        );
        assert_eq!(
            board.set_active(20, 0, true, GRAY),
            Err(GameError::OutOfBounds { row: 20, col: 0 })
        );
    }

    #[test]
    fn set_and_read_back() {
        let mut board = Board::new(Mode::Advanced);
        board.set_active(5, 11, true, GRAY).unwrap();
        assert!(board.is_active(5, 11).unwrap());
        assert_eq!(board.cell(5, 11).unwrap(), Some(GRAY));

        board.set_active(5, 11, false, GRAY).unwrap();
        assert!(!board.is_active(5, 11).unwrap());
    }

    #[test]
    fn drop_row_shifts_colors_down() {
        let mut board = Board::with_size(3, 4);
        let red = Rgb::new(255, 0, 0);
        board.set_active(1, 2, true, red).unwrap();

        board.drop_row(2);
        assert_eq!(board.cell(2, 2).unwrap(), Some(red));
        assert!(!board.is_active(1, 2).unwrap());
        assert!(!board.is_active(0, 2).unwrap());
    }

    #[test]
    fn clearing_works_on_short_boards() {
        // Line clearing indexes its completeness flags by board height, which
        // must hold for any height up to BOARD_HEIGHT, not just the full 20.
        let mut board = Board::with_size(3, 4);
        board.fill_row(3, GRAY);
        board.set_active(1, 0, true, GRAY).unwrap();

        let cleared = board.try_clear_lines(Mode::Classic);
        assert_eq!(cleared.as_slice(), &[3]);
        assert!(board.is_active(2, 0).unwrap());
        assert!(!board.is_active(3, 1).unwrap());
    }

    #[test]
    fn advanced_isolated_row_survives() {
        let mut board = Board::new(Mode::Advanced);
        board.fill_row(10, GRAY);
        let cleared = board.try_clear_lines(Mode::Advanced);
        assert!(cleared.is_empty());
        assert!(board.is_active(10, 0).unwrap());
    }

    #[test]
    fn advanced_pair_cascades() {
        let mut board = Board::new(Mode::Advanced);
        board.fill_row(17, GRAY);
        board.fill_row(18, GRAY);
        board.fill_row(19, GRAY);
        let cleared = board.try_clear_lines(Mode::Advanced);
        assert_eq!(cleared.as_slice(), &[17, 18, 19]);
        for row in 17..20 {
            assert!(!board.is_active(row, 0).unwrap());
        }
    }
}
