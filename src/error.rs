//! Error types for the simulation core.
//!
//! Invalid moves are not errors; they are `Ok(false)` from the collision check
//! and get reverted by the session. The kinds below cover the two genuinely
//! fatal conditions: bad shape data at startup and a board access that skipped
//! validation.

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors that can occur in the simulation core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Shape catalog data failed to parse (fatal at startup)
    #[error("malformed shape catalog: {0}")]
    MalformedCatalog(String),

    /// Board access outside the grid. Call sites are expected to validate via
    /// the piece collision check first, so this is a programming error.
    #[error("board access out of bounds at row {row}, col {col}")]
    OutOfBounds { row: usize, col: usize },
}
