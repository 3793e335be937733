//! First member of each pair against the pair's difference.
//!
//! Every difference is 2, so the points sit on one horizontal band; gaps in
//! the band are the stretches without twins.

use crate::color::{palette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::render::{blank_canvas, draw_point, Axes};
use crate::scale::{LinearScale, Scale};
use crate::sieve::TwinPair;

/// Builder for the pair scatter plot.
#[derive(Debug, Clone)]
pub struct PairScatter {
    x_data: Vec<f32>,
    y_data: Vec<f32>,
    color: Rgba,
    point_size: f32,
    width: u32,
    height: u32,
    margin: u32,
}

impl Default for PairScatter {
    fn default() -> Self {
        Self::new()
    }
}

impl PairScatter {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x_data: Vec::new(),
            y_data: Vec::new(),
            color: palette::PAIR,
            point_size: 4.0,
            width: 800,
            height: 600,
            margin: 40,
        }
    }

    /// Set the pairs to show.
    #[must_use]
    pub fn pairs(mut self, pairs: &[TwinPair]) -> Self {
        self.x_data = pairs.iter().map(|p| p.first() as f32).collect();
        self.y_data = pairs.iter().map(|p| (p.second() - p.first()) as f32).collect();
        self
    }

    /// Set the point color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set the point size in pixels.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.point_size = size.max(1.0);
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x_data.len()
    }

    /// Whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_data.is_empty()
    }

    /// Build and validate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] without pairs.
    pub fn build(self) -> Result<Self> {
        if self.x_data.is_empty() {
            return Err(Error::EmptyData);
        }
        Ok(self)
    }

    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions or an empty plot.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = blank_canvas(self.width, self.height, palette::BACKGROUND)?;

        let mut xs = self.x_data.clone();
        xs.push(0.0);
        let x_domain = LinearScale::from_data(&xs, (0.0, 1.0), 0.03)?.domain();
        // Zero up to twice the largest difference keeps the band mid-height.
        let top = self.y_data.iter().copied().fold(0.0_f32, f32::max) * 2.0;
        let y_domain = LinearScale::from_data(&[0.0, top], (0.0, 1.0), 0.0)?.domain();

        let axes = Axes::linear(
            Axes::plot_area(self.width, self.height, self.margin),
            x_domain,
            y_domain,
        )?;
        axes.draw(&mut fb, true);

        for (&x, &y) in self.x_data.iter().zip(&self.y_data) {
            draw_point(&mut fb, axes.project(x, y), self.point_size, self.color);
        }

        Ok(fb)
    }
}

impl batuta_common::display::WithDimensions for PairScatter {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::generate_twin_primes;

    #[test]
    fn test_pairs_map_to_difference_two() {
        let plot = PairScatter::new().pairs(&generate_twin_primes(20).unwrap());
        assert_eq!(plot.len(), 4);
        assert_eq!(plot.x_data, vec![3.0, 5.0, 11.0, 17.0]);
        assert!(plot.y_data.iter().all(|&d| (d - 2.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_empty() {
        assert!(PairScatter::new().is_empty());
        assert!(matches!(PairScatter::new().build(), Err(Error::EmptyData)));
    }

    #[test]
    fn test_render() {
        let fb = PairScatter::new()
            .pairs(&generate_twin_primes(1_000).unwrap())
            .dimensions(200, 150)
            .build()
            .unwrap()
            .to_framebuffer()
            .unwrap();
        assert!(fb.count_color(palette::PAIR) > 0);
    }

    #[test]
    fn test_render_single_pair() {
        let fb = PairScatter::new()
            .pairs(&[TwinPair::new(3)])
            .color(palette::ACCENT)
            .dimensions(100, 80)
            .build()
            .unwrap()
            .to_framebuffer()
            .unwrap();
        assert!(fb.count_color(palette::ACCENT) > 0);
    }
}
