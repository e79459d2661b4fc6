//! Piece generation - seeded RNG plus the weighted shape draw.
//!
//! The RNG is a small LCG so sessions are reproducible from a seed; the
//! factory layers the mode's weight table and the random display color on top.

use tracing::trace;

use crate::core::catalog::Catalog;
use crate::core::piece::Piece;
use crate::error::{GameError, Result};
use crate::types::{Mode, Rgb};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range `[0, max)`.
    ///
    /// Multiply-high reduction so the draw is fed by the LCG's high bits
    /// (the low bits of a power-of-two LCG have short periods).
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Produces new piece instances for one session: weighted shape id, random
/// display color, and the centered spawn anchor.
#[derive(Debug, Clone)]
pub struct PieceFactory {
    catalog: Catalog,
    mode: Mode,
    rng: SimpleRng,
}

impl PieceFactory {
    /// Build a factory over an already-parsed catalog.
    ///
    /// Fails if the catalog has fewer shapes than the mode's weight table,
    /// which would make some weights point past the table.
    pub fn new(catalog: Catalog, mode: Mode, seed: u32) -> Result<Self> {
        let needed = mode.weights().len();
        if catalog.len() < needed {
            return Err(GameError::MalformedCatalog(format!(
                "{} mode needs {needed} shapes, catalog has {}",
                mode.as_str(),
                catalog.len()
            )));
        }
        Ok(Self {
            catalog,
            mode,
            rng: SimpleRng::new(seed),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Spawn a new piece: weighted shape draw, random hue, centered anchor.
    pub fn spawn(&mut self) -> Piece {
        let color = Rgb::from_hue(self.rng.next_range(360) as f32);
        let id = self.draw_shape_id();
        trace!(id, "spawned piece");

        // Bounds hold by the length check in `new`; fall back to shape 0
        // rather than panic if they ever do not.
        let shape = self
            .catalog
            .shape(id)
            .or_else(|| self.catalog.shape(0));
        let matrix = shape.map(|s| *s.matrix()).unwrap_or_default();

        let x = (self.mode.board_width() / 2) as i32 - 2;
        Piece::new(id, color, x, 0, matrix)
    }

    /// Weighted discrete draw: uniform integer in `[0, total)`, then walk the
    /// table subtracting until the remainder is below the current weight. The
    /// index 0 initialization keeps the draw total even if the walk exhausts.
    fn draw_shape_id(&mut self) -> usize {
        let weights = self.mode.weights();
        let total: u32 = weights.iter().sum();
        let mut remaining = self.rng.next_range(total);

        let mut id = 0;
        for (i, &weight) in weights.iter().enumerate() {
            if remaining < weight {
                id = i;
                break;
            }
            remaining -= weight;
        }
        id
    }
}
