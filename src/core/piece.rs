//! Piece geometry and collision.
//!
//! A piece is a mutable copy of a catalog shape: the working matrix is
//! re-derived by 90-degree rotations while the shape id and color stay fixed.
//! The anchor (x, y) addresses the matrix's top-left corner in board
//! coordinates; x goes signed because classic-mode pieces may transiently
//! overhang the left edge before the collision check rejects them.

use crate::core::board::Board;
use crate::core::catalog::ShapeMatrix;
use crate::error::Result;
use crate::types::{Mode, Rgb, MATRIX_SIZE};

#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: usize,
    color: Rgb,
    x: i32,
    y: i32,
    matrix: ShapeMatrix,
}

impl Piece {
    pub(crate) fn new(id: usize, color: Rgb, x: i32, y: i32, matrix: ShapeMatrix) -> Self {
        Self {
            id,
            color,
            x,
            y,
            matrix,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn matrix(&self) -> &ShapeMatrix {
        &self.matrix
    }

    /// Whether every occupied cell sits on a legal, unoccupied board cell.
    ///
    /// Classic mode rejects any horizontal overhang; advanced mode reduces
    /// the column modulo the board width (wrap-around), so only vertical
    /// overflow and occupancy collisions can fail there.
    pub fn check(&self, board: &Board, mode: Mode) -> Result<bool> {
        let width = board.width() as i32;
        let height = board.height() as i32;

        for i in 0..MATRIX_SIZE {
            for j in 0..MATRIX_SIZE {
                if !self.matrix[i][j] {
                    continue;
                }
                let row = self.y + i as i32;
                let col = self.x + j as i32;
                if row >= height {
                    return Ok(false);
                }
                if mode == Mode::Classic && (col < 0 || col >= width) {
                    return Ok(false);
                }
                let wrapped = col.rem_euclid(width) as usize;
                if board.is_active(row as usize, wrapped)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Rotate the working matrix 90 degrees clockwise:
    /// `new[j][N-1-i] = old[i][j]`. Four applications restore the original.
    pub fn rotate(&mut self) {
        let mut rotated = [[false; MATRIX_SIZE]; MATRIX_SIZE];
        for i in 0..MATRIX_SIZE {
            for j in 0..MATRIX_SIZE {
                rotated[j][MATRIX_SIZE - 1 - i] = self.matrix[i][j];
            }
        }
        self.matrix = rotated;
    }

    pub fn move_left(&mut self, mode: Mode, board_width: usize) {
        // Advanced boards wrap at the left edge instead of going negative.
        if mode == Mode::Advanced && self.x == 0 {
            self.x = board_width as i32;
        }
        self.x -= 1;
    }

    pub fn move_right(&mut self) {
        self.x += 1;
    }

    pub fn move_up(&mut self) {
        self.y -= 1;
    }

    pub fn move_down(&mut self) {
        self.y += 1;
    }

    /// Write the piece's occupied cells into the board. Used both to show the
    /// falling piece and to paint the final locked state.
    pub fn stamp(&self, board: &mut Board, active: bool) -> Result<()> {
        let width = board.width() as i32;
        for i in 0..MATRIX_SIZE {
            for j in 0..MATRIX_SIZE {
                if !self.matrix[i][j] {
                    continue;
                }
                let row = (self.y + i as i32) as usize;
                let col = (self.x + j as i32).rem_euclid(width) as usize;
                board.set_active(row, col, active, self.color)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_piece() -> Piece {
        let mut matrix = [[false; MATRIX_SIZE]; MATRIX_SIZE];
        matrix[0][0] = true;
        Piece::new(0, Rgb::new(255, 0, 0), 0, 0, matrix)
    }

    #[test]
    fn rotation_moves_corner_clockwise() {
        let mut piece = corner_piece();
        piece.rotate();
        // (0,0) -> (0,3) under new[j][N-1-i] = old[i][j].
        assert!(piece.matrix()[0][3]);
        assert!(!piece.matrix()[0][0]);
    }

    #[test]
    fn four_rotations_restore_matrix() {
        let mut matrix = [[false; MATRIX_SIZE]; MATRIX_SIZE];
        matrix[0][1] = true;
        matrix[1][1] = true;
        matrix[1][2] = true;
        let mut piece = Piece::new(0, Rgb::default(), 0, 0, matrix);

        let original = *piece.matrix();
        for _ in 0..4 {
            piece.rotate();
        }
        assert_eq!(*piece.matrix(), original);
    }

    #[test]
    fn move_left_wraps_only_in_advanced() {
        let mut piece = corner_piece();
        piece.move_left(Mode::Advanced, 12);
        assert_eq!(piece.x(), 11);

        let mut piece = corner_piece();
        piece.move_left(Mode::Classic, 10);
        assert_eq!(piece.x(), -1);
    }
}
