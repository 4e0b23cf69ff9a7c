mod palette;
mod placement;


pub use palette::{Palette, Shade, ShadeId};
pub use placement::{generate, GradientLayout};

use thiserror::Error;

/// Tuning knobs for the randomized warp layout.
///
/// The defaults reproduce the hand-tuned values of the original Purple Dawn
/// warp: a wide gaussian spread, a generous search window for occupied
/// slots, and a patience of 1000 dead draws before giving up on randomness.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientConfig {
    /// Total number of warp ends to place.
    pub threads: u32,
    /// Standard deviation of the draw around each shade's center.
    pub sigma: f64,
    /// How far from a suggested position to look for a free slot.
    pub max_jump: usize,
    /// Consecutive dead draws tolerated before the deterministic fill.
    pub max_tries: u32,
    /// Place the outermost shade pairs before the inner shades.
    pub prefer_edges: bool,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            threads: 1532,
            sigma: 120.0,
            max_jump: 50,
            max_tries: 1000,
            prefer_edges: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum GradientError {
    #[error("palette must contain at least one shade")]
    EmptyPalette,

    #[error("sigma must be positive and finite, got {0}")]
    BadSigma(f64),

    #[error(transparent)]
    Split(#[from] crate::splitter::SplitError),
}
