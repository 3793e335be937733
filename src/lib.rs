//! # twinviz
//!
//! Twin prime generation with a Sieve of Eratosthenes, gap statistics,
//! density analysis against the Hardy–Littlewood conjecture, and pure-Rust
//! plots of the results.
//!
//! A twin pair is `(p, p + 2)` with both members prime. For a limit `N`
//! the generator returns every such pair with `p + 2 <= N`, in ascending
//! order; the statistics engine then looks at the gaps between the first
//! members of consecutive pairs.
//!
//! ## Features
//!
//! - **Sieve**: bit-per-integer primality table, resource ceiling and
//!   cooperative cancellation
//! - **Statistics**: mean, median, mode, sample standard deviation,
//!   quartiles, percentiles and a least squares trend over the gaps
//! - **Density**: observed density against `2·C₂·N / ln²N`, windowed
//!   density and twin proportion
//! - **Plots**: number line, trend, spiral, histogram, box plot, density,
//!   proportion and theory curves, written as PNG, SVG or terminal text
//!
//! ## Quick Start
//!
//! ```rust
//! use twinviz::prelude::*;
//!
//! let generation = generate(100)?;
//! assert_eq!(generation.pair_count(), 8);
//! assert_eq!(generation.pairs()[0].as_tuple(), (3, 5));
//!
//! let stats = compute_statistics(generation.pairs())?;
//! assert_eq!(stats.mode, 12);
//! # Ok::<(), twinviz::Error>(())
//! ```
//!
//! ## References
//!
//! - Hardy, G. H., & Littlewood, J. E. (1923). "Some problems of
//!   'Partitio numerorum' III." *Acta Mathematica* 44.
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in numeric and graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Twin prime generation.
pub mod sieve;

/// Trial-division generator used to cross-check the sieve.
pub mod reference;

/// Gap statistics, regression and density metrics.
pub mod stats;

/// Timing the trial-division generator against the sieve.
pub mod performance;

/// Text reports.
pub mod report;

/// CSV export.
pub mod export;

/// YAML configuration.
pub mod config;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Color types and the shared palette.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Pixel-space points and rectangles.
pub mod geometry;

/// Scale functions for data-to-pixel mappings.
pub mod scale;

/// Rasterization primitives and axes.
pub mod render;

/// Plot builders.
pub mod plots;

/// Plot selection and rendering of an analysis.
pub mod visualize;

/// Output encoders (PNG, SVG, terminal).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for twinviz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions.
///
/// ```rust
/// use twinviz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{palette, Rgba};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::plots::{
        BinStrategy, BoxPlot, Histogram, LineChart, LineSeries, NumberLine, PairScatter,
        SpiralPlot, TrendPlot,
    };
    pub use crate::sieve::{
        generate, generate_cancellable, generate_twin_primes, generate_with_max, parse_limit,
        primes_up_to, Generation, PrimalityTable, TwinPair,
    };
    pub use crate::stats::{compute_statistics, gaps, DensityMetrics, GapStatistics, StatSummary};
    pub use crate::visualize::{render, try_render, Analysis, OutputFormat, PlotKind, PlotSettings};
    pub use batuta_common::display::WithDimensions;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_pipeline() {
        let analysis = Analysis::run(100, 1_000).unwrap();
        let summary = analysis.summary().unwrap();
        assert_eq!(summary.gaps.count, 7);
        assert_eq!(summary.density.pair_count, 8);
    }
}
