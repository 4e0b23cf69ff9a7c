// Public API exports
pub mod codes;
pub mod gradient;
pub mod project;
pub mod render;
pub mod splitter;

// Re-export main types for convenience
pub use splitter::{non_conforming, split_paired, split_threads, BiasMode, SplitError};

pub use gradient::{
    generate, GradientConfig, GradientError, GradientLayout, Palette, Shade, ShadeId,
};

pub use render::{pattern_grid, ruled_line, separator, warp_card, warp_preview};

pub use project::{estimate, ProjectError, ProjectEstimate, ProjectReport, WarpPlan};

pub use codes::{CodeError, CodeLedger, CodeRecord, CodeStore, MemoryStore, SheetsStore, Wrap};
