mod balanced;
mod paired;

#[cfg(test)]
mod tests;

pub use balanced::{non_conforming, split_threads};
pub use paired::split_paired;

use thiserror::Error;

/// Where surplus threads end up when a warp does not split evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasMode {
    /// Concentrate the surplus in the first and last batches.
    EdgesHeavy,
    /// Concentrate the surplus in the central batches.
    CenterHeavy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// `batches < 1` or `divisor < 1`; everything else produces a result.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
