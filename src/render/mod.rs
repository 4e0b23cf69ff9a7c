//! Output builders for warp layouts: ruled text, pattern grids, typeset
//! LaTeX cards, and an SVG stripe preview. All pure string assembly.

mod latex;
mod svg;
mod text;

#[cfg(test)]
mod tests;

pub use latex::warp_card;
pub use svg::warp_preview;
pub use text::{pattern_grid, ruled_line, separator};
