//! Twin pairs on a number line.

use crate::color::{palette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::render::{blank_canvas, draw_line, draw_line_aa, draw_point, Axes};
use crate::sieve::TwinPair;

/// Builder for the number line plot.
///
/// A horizontal axis over `[0, limit]` with a tick every `max(1, limit / 10)`;
/// each pair is two dots joined by a short segment.
#[derive(Debug, Clone)]
pub struct NumberLine {
    pairs: Vec<TwinPair>,
    limit: u64,
    color: Rgba,
    marker_size: f32,
    width: u32,
    height: u32,
    margin: u32,
}

impl Default for NumberLine {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberLine {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pairs: Vec::new(),
            limit: 0,
            color: palette::PAIR,
            marker_size: 5.0,
            width: 1000,
            height: 200,
            margin: 30,
        }
    }

    /// Set the pairs.
    #[must_use]
    pub fn pairs(mut self, pairs: &[TwinPair]) -> Self {
        self.pairs = pairs.to_vec();
        self
    }

    /// Set the right end of the line.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the marker color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set the marker diameter in pixels.
    #[must_use]
    pub fn marker_size(mut self, size: f32) -> Self {
        self.marker_size = size.max(1.0);
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Spacing between ticks.
    #[must_use]
    pub fn tick_step(&self) -> u64 {
        (self.limit / 10).max(1)
    }

    /// Build and validate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a zero limit or a pair beyond it.
    pub fn build(self) -> Result<Self> {
        if self.limit == 0 {
            return Err(Error::InvalidInput("number line needs a positive limit".to_string()));
        }
        if let Some(pair) = self.pairs.iter().find(|p| p.second() > self.limit) {
            return Err(Error::InvalidInput(format!(
                "pair {pair} lies beyond the limit {}",
                self.limit
            )));
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
        let area = Axes::plot_area(self.width, self.height, self.margin);
        let axes = Axes::linear(area, (0.0, self.limit as f32), (-1.0, 1.0))?;

        let left = axes.project(0.0, 0.0);
        let right = axes.project(self.limit as f32, 0.0);
        let (x0, y) = left.to_pixel();
        let (x1, _) = right.to_pixel();
        draw_line(&mut fb, (x0, y), (x1, y), palette::AXIS);

        let step = self.tick_step();
        let mut tick = 0;
        while tick <= self.limit {
            let (x, _) = axes.project(tick as f32, 0.0).to_pixel();
            draw_line(&mut fb, (x, y - 6), (x, y + 6), palette::AXIS);
            tick += step;
        }

        for pair in &self.pairs {
            let a = axes.project(pair.first() as f32, 0.0);
            let b = axes.project(pair.second() as f32, 0.0);
            draw_line_aa(&mut fb, a, b, self.color);
            draw_point(&mut fb, a, self.marker_size, self.color);
            draw_point(&mut fb, b, self.marker_size, self.color);
        }

        Ok(fb)
    }
}

impl batuta_common::display::WithDimensions for NumberLine {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
