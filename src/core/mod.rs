//! Core module - pure game logic with no terminal or I/O dependencies.

pub mod board;
pub mod catalog;
pub mod generator;
pub mod piece;
pub mod session;

// Re-export commonly used types
pub use board::Board;
pub use catalog::{Catalog, Shape, ShapeMatrix, BUILTIN_SHAPES};
pub use generator::{PieceFactory, SimpleRng};
pub use piece::Piece;
pub use session::{Phase, Session, TickInput};
