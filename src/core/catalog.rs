//! Shape catalog - the static tetromino table.
//!
//! Shapes are loaded from a flat stream of `0`/`1` tokens, sixteen per shape,
//! in row-major 4x4 blocks. The catalog is parsed exactly once at startup and
//! handed to the piece factory as a plain value; there is no lazy global.

use crate::error::{GameError, Result};
use crate::types::MATRIX_SIZE;

/// The shape table shipped with the game: the standard seven tetrominoes plus
/// three rare shapes only reachable through the advanced weight table.
pub const BUILTIN_SHAPES: &str = include_str!("../../data/tetrominoes.txt");

/// 4x4 occupancy matrix used by pieces as their rotation seed.
pub type ShapeMatrix = [[bool; MATRIX_SIZE]; MATRIX_SIZE];

/// An immutable shape with its catalog id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    id: usize,
    matrix: ShapeMatrix,
}

impl Shape {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn matrix(&self) -> &ShapeMatrix {
        &self.matrix
    }
}

/// Read-only table of shapes, indexed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    shapes: Vec<Shape>,
}

impl Catalog {
    /// Parse a whitespace-separated stream of `0`/`1` tokens.
    ///
    /// Token `i` lands in shape `i / 16`, row `i % 16 / 4`, col `i % 4`.
    /// Fails with [`GameError::MalformedCatalog`] on a bad token or a token
    /// count that is zero or not a multiple of 16.
    pub fn parse(text: &str) -> Result<Self> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let per_shape = MATRIX_SIZE * MATRIX_SIZE;

        if tokens.is_empty() || tokens.len() % per_shape != 0 {
            return Err(GameError::MalformedCatalog(format!(
                "token count {} is not a positive multiple of {per_shape}",
                tokens.len()
            )));
        }

        let mut shapes: Vec<Shape> = Vec::with_capacity(tokens.len() / per_shape);
        for (i, token) in tokens.iter().enumerate() {
            let value = match *token {
                "0" => false,
                "1" => true,
                other => {
                    return Err(GameError::MalformedCatalog(format!(
                        "token {i} is {other:?}, expected \"0\" or \"1\""
                    )))
                }
            };
            let id = i / per_shape;
            let row = i % per_shape / MATRIX_SIZE;
            let col = i % MATRIX_SIZE;
            if id == shapes.len() {
                shapes.push(Shape {
                    id,
                    matrix: [[false; MATRIX_SIZE]; MATRIX_SIZE],
                });
            }
            shapes[id].matrix[row][col] = value;
        }

        Ok(Self { shapes })
    }

    /// Parse the shipped shape table.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_SHAPES)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shape(&self, id: usize) -> Option<&Shape> {
        self.shapes.get(id)
    }
}
