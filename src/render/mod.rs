//! Rasterization and shared plot scaffolding.
//!
//! # Algorithms
//!
//! - **Bresenham's line**: one-pixel axes, ticks and outlines
//! - **Wu's anti-aliased line**: data lines and the regression fit
//! - **Coverage discs**: markers with a blended rim
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod axes;
mod primitives;

pub use axes::{blank_canvas, AxisKind, Axes};
pub use primitives::{
    draw_circle, draw_dashed_line, draw_line, draw_line_aa, draw_point, draw_polyline, draw_rect,
    draw_rect_outline,
};
