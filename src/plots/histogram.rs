//! Histogram of the gap distribution.
//!
//! Supports the square-root (clamped), Sturges, Scott and Freedman–Diaconis
//! rules, and vertical markers for summary values such as mean, median
//! and mode.

use crate::color::{palette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;
use crate::render::{blank_canvas, draw_dashed_line, draw_rect, draw_rect_outline, Axes};
use crate::stats::descriptive;

/// Binning strategy for histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinStrategy {
    /// `√n`, clamped to `[min, max]`.
    SquareRoot {
        /// Fewest bins.
        min: usize,
        /// Most bins.
        max: usize,
    },
    /// Sturges' rule: `ceil(log2 n) + 1`.
    #[default]
    Sturges,
    /// Scott's rule: width `3.5 σ / n^(1/3)`.
    Scott,
    /// Freedman–Diaconis rule: width `2 IQR / n^(1/3)`.
    FreedmanDiaconis,
    /// Fixed number of bins.
    Fixed(usize),
}

impl BinStrategy {
    /// `√n` clamped to `[10, 30]`, used for gap histograms.
    pub const GAPS: Self = Self::SquareRoot { min: 10, max: 30 };
}

/// Builder for histograms.
#[derive(Debug, Clone)]
pub struct Histogram {
    data: Vec<f32>,
    bin_strategy: BinStrategy,
    color: Rgba,
    markers: Vec<(f32, Rgba)>,
    width: u32,
    height: u32,
    margin: u32,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Create a new histogram builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            bin_strategy: BinStrategy::default(),
            color: palette::FILL,
            markers: Vec::new(),
            width: 800,
            height: 600,
            margin: 40,
        }
    }

    /// Set the data.
    #[must_use]
    pub fn data(mut self, data: &[f32]) -> Self {
        self.data = data.to_vec();
        self
    }

    /// Set the binning strategy.
    #[must_use]
    pub fn bins(mut self, strategy: BinStrategy) -> Self {
        self.bin_strategy = strategy;
        self
    }

    /// Set the bar color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Add a dashed vertical marker at `value`.
    #[must_use]
    pub fn marker(mut self, value: f32, color: Rgba) -> Self {
        self.markers.push((value, color));
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Number of bins the strategy picks for the current data.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        let n = self.data.len();
        if n == 0 {
            return 1;
        }
        let nf = n as f32;
        let (min, max) = self.data_range();
        let range = max - min;
        let from_width = |w: f32| {
            if w > 0.0 && range > 0.0 {
                (range / w).ceil() as usize
            } else {
                sturges(nf)
            }
        };

        match self.bin_strategy {
            BinStrategy::SquareRoot { min, max } => {
                (nf.sqrt().round() as usize).clamp(min.max(1), max.max(min).max(1))
            }
            BinStrategy::Sturges => sturges(nf),
            BinStrategy::Scott => {
                let values = self.as_f64();
                let mean = descriptive::mean(&values);
                let sd = descriptive::sample_std_dev(&values, mean) as f32;
                from_width(3.5 * sd / nf.cbrt())
            }
            BinStrategy::FreedmanDiaconis => {
                let mut sorted = self.as_f64();
                sorted.sort_by(f64::total_cmp);
                let iqr = (descriptive::percentile(&sorted, 75.0)
                    - descriptive::percentile(&sorted, 25.0)) as f32;
                from_width(2.0 * iqr / nf.cbrt())
            }
            BinStrategy::Fixed(bins) => bins,
        }
        .max(1)
    }

    fn as_f64(&self) -> Vec<f64> {
        self.data.iter().map(|&v| f64::from(v)).collect()
    }

    /// `(min, max)` of the data; a single value is widened to `±0.5`.
    fn data_range(&self) -> (f32, f32) {
        let min = self.data.iter().copied().fold(f32::INFINITY, f32::min);
        let max = self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if max - min > 0.0 {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        }
    }

    /// Bin edges (`bins + 1` values) and counts. The last bin is closed.
    #[must_use]
    pub fn bin_counts(&self) -> (Vec<f32>, Vec<usize>) {
        let bins = self.bin_count();
        let (min, max) = self.data_range();
        let width = (max - min) / bins as f32;

        let edges = (0..=bins).map(|i| min + i as f32 * width).collect();
        let mut counts = vec![0usize; bins];
        for &v in &self.data {
            let i = (((v - min) / width).floor().max(0.0) as usize).min(bins - 1);
            counts[i] += 1;
        }
        (edges, counts)
    }

    /// Build and validate the histogram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] if there is no finite value.
    pub fn build(mut self) -> Result<Self> {
        self.data.retain(|v| v.is_finite());
        if self.data.is_empty() {
            return Err(Error::EmptyData);
        }
        Ok(self)
    }

    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions or no data.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        if self.data.is_empty() {
            return Err(Error::EmptyData);
        }
        let mut fb = blank_canvas(self.width, self.height, palette::BACKGROUND)?;

        let (edges, counts) = self.bin_counts();
        let peak = counts.iter().copied().max().unwrap_or(1).max(1) as f32;
        let x_domain = (edges[0], edges[edges.len() - 1]);
        let axes = Axes::linear(
            Axes::plot_area(self.width, self.height, self.margin),
            x_domain,
            (0.0, peak * 1.1),
        )?;
        axes.draw(&mut fb, true);

        for (i, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let top_left = axes.project(edges[i], count as f32);
            let bottom_right = axes.project(edges[i + 1], 0.0);
            let bottom_right = Point::new(bottom_right.x - 1.0, bottom_right.y);
            draw_rect(&mut fb, top_left, bottom_right, self.color);
            draw_rect_outline(&mut fb, top_left, bottom_right, palette::AXIS);
        }

        let area = axes.area();
        for &(value, color) in &self.markers {
            if value < x_domain.0 || value > x_domain.1 || !value.is_finite() {
                continue;
            }
            let top = axes.project(value, peak * 1.1);
            let bottom = Point::new(top.x, area.bottom());
            draw_dashed_line(&mut fb, top, bottom, 6.0, color);
        }

        Ok(fb)
    }
}

fn sturges(n: f32) -> usize {
    (n.log2().ceil() + 1.0) as usize
}

impl batuta_common::display::WithDimensions for Histogram {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_builder() {
        let hist = Histogram::new()
            .data(&[1.0, 2.0, 3.0, 4.0, 5.0])
            .bins(BinStrategy::Fixed(5))
            .build()
            .unwrap();

        assert_eq!(hist.bin_count(), 5);
    }

    #[test]
    fn test_square_root_clamped() {
        let few = Histogram::new().data(&[2.0, 6.0, 6.0]).bins(BinStrategy::GAPS);
        assert_eq!(few.bin_count(), 10);

        let data: Vec<f32> = (0..400).map(|i| i as f32).collect();
        let mid = Histogram::new().data(&data).bins(BinStrategy::GAPS);
        assert_eq!(mid.bin_count(), 20);

        let data: Vec<f32> = (0..10_000).map(|i| i as f32).collect();
        let many = Histogram::new().data(&data).bins(BinStrategy::GAPS);
        assert_eq!(many.bin_count(), 30);
    }

    #[test]
    fn test_histogram_sturges() {
        let data: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let hist = Histogram::new().data(&data).bins(BinStrategy::Sturges).build().unwrap();
        // ceil(log2(100)) + 1 = 8
        assert_eq!(hist.bin_count(), 8);
    }

    #[test]
    fn test_scott_and_fd_positive() {
        let data: Vec<f32> = (0..200).map(|i| (i % 37) as f32).collect();
        for strategy in [BinStrategy::Scott, BinStrategy::FreedmanDiaconis] {
            let hist = Histogram::new().data(&data).bins(strategy);
            assert!(hist.bin_count() >= 1);
        }
    }

    #[test]
    fn test_bin_counts_sum() {
        let hist = Histogram::new()
            .data(&[2.0, 6.0, 6.0, 12.0, 12.0, 18.0, 12.0])
            .bins(BinStrategy::Fixed(4))
            .build()
            .unwrap();
        let (edges, counts) = hist.bin_counts();
        assert_eq!(edges.len(), 5);
        assert_eq!(counts.iter().sum::<usize>(), 7);
        // 18 lands in the closed last bin
        assert_eq!(counts[3], 1);
    }

    #[test]
    fn test_constant_data() {
        let hist = Histogram::new()
            .data(&[6.0, 6.0, 6.0])
            .bins(BinStrategy::Fixed(3))
            .build()
            .unwrap();
        let (_, counts) = hist.bin_counts();
        assert_eq!(counts.iter().sum::<usize>(), 3);
        assert!(hist.to_framebuffer().is_ok());
    }

    #[test]
    fn test_histogram_empty_data() {
        assert!(Histogram::new().build().is_err());
        assert!(Histogram::new().data(&[f32::NAN]).build().is_err());
    }

    #[test]
    fn test_histogram_render_with_markers() {
        let hist = Histogram::new()
            .data(&[2.0, 6.0, 6.0, 12.0, 12.0, 18.0, 12.0])
            .bins(BinStrategy::GAPS)
            .marker(9.71, palette::ACCENT)
            .marker(12.0, palette::SECONDARY)
            .dimensions(200, 150)
            .build()
            .unwrap();
        let fb = hist.to_framebuffer().unwrap();
        assert_eq!(fb.width(), 200);
        assert!(fb.count_color(palette::FILL) > 0);
    }
}
