//! Archimedean spiral of the integers with twin pair members highlighted.
//!
//! Integer `n` sits at angle `θ = √n` and radius `θ`, so the spiral winds
//! outwards while neighbouring integers stay close together.

use crate::color::{palette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;
use crate::render::{blank_canvas, draw_point, Axes};

/// Default cap on background dots.
pub const DEFAULT_MAX_POINTS: usize = 20_000;

/// Cartesian position of `n` on the spiral.
#[must_use]
pub fn spiral_position(n: u64) -> (f64, f64) {
    let theta = (n as f64).sqrt();
    (theta * theta.cos(), theta * theta.sin())
}

/// Builder for the spiral plot.
#[derive(Debug, Clone)]
pub struct SpiralPlot {
    limit: u64,
    members: Vec<u64>,
    max_points: usize,
    highlight: Rgba,
    width: u32,
    height: u32,
    margin: u32,
}

impl Default for SpiralPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl SpiralPlot {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            limit: 0,
            members: Vec::new(),
            max_points: DEFAULT_MAX_POINTS,
            highlight: palette::ACCENT,
            width: 800,
            height: 800,
            margin: 20,
        }
    }

    /// Outermost integer.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Integers to highlight (twin pair members).
    #[must_use]
    pub fn members(mut self, members: &[u64]) -> Self {
        self.members = members.to_vec();
        self
    }

    /// Cap on background dots; larger limits are subsampled evenly.
    #[must_use]
    pub fn max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points.max(1);
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Distance between two consecutive background dots.
    #[must_use]
    pub fn stride(&self) -> u64 {
        let cap = self.max_points.max(1) as u64;
        self.limit.div_ceil(cap).max(1)
    }

    /// Build and validate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a zero limit.
    pub fn build(self) -> Result<Self> {
        if self.limit == 0 {
            return Err(Error::InvalidInput("spiral needs a positive limit".to_string()));
        }
        Ok(self)
    }

    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = blank_canvas(self.width, self.height, palette::BACKGROUND)?;

        let reach = ((self.limit as f32).sqrt() * 1.05).max(1.0);
        let axes = Axes::linear(
            Axes::plot_area(self.width, self.height, self.margin),
            (-reach, reach),
            (-reach, reach),
        )?;
        let place = |n: u64| -> Point {
            let (x, y) = spiral_position(n);
            axes.project(x as f32, y as f32)
        };

        let stride = self.stride();
        let mut n = 1;
        while n <= self.limit {
            draw_point(&mut fb, place(n), 1.5, palette::FAINT);
            n += stride;
        }

        for &m in self.members.iter().filter(|&&m| m <= self.limit) {
            draw_point(&mut fb, place(m), 4.0, self.highlight);
        }

        Ok(fb)
    }
}

impl batuta_common::display::WithDimensions for SpiralPlot {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
