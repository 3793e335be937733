//! High-level plot types.
//!
//! Every plot follows the same builder shape: configure, `build()` to
//! validate, then `to_framebuffer()` to rasterize.

mod boxplot;
mod histogram;
mod line;
mod number_line;
mod scatter;
mod spiral;
mod trend;

pub use boxplot::{BoxPlot, BoxStats};
pub use histogram::{BinStrategy, Histogram};
pub use line::{LineChart, LineSeries};
pub use number_line::NumberLine;
pub use scatter::PairScatter;
pub use spiral::{spiral_position, SpiralPlot, DEFAULT_MAX_POINTS};
pub use trend::TrendPlot;
