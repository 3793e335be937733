//! Horizontal box plot of the gap distribution.

use crate::color::{palette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::render::{blank_canvas, draw_line, draw_point, draw_rect, draw_rect_outline, Axes};
use crate::scale::{LinearScale, Scale};
use crate::stats::percentile;

/// Five-number summary with Tukey fences.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// Smallest value inside the lower fence.
    pub lower_whisker: f64,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Largest value inside the upper fence.
    pub upper_whisker: f64,
    /// Values beyond `1.5 * IQR` from the box.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Compute the summary, ignoring non-finite values.
    ///
    /// Returns `None` if nothing finite remains.
    #[must_use]
    pub fn from_data(data: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let (low, high) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside = |v: &&f64| (low..=high).contains(*v);
        let lower_whisker = sorted.iter().find(inside).copied().unwrap_or(q1);
        let upper_whisker = sorted.iter().rev().find(inside).copied().unwrap_or(q3);
        let outliers = sorted.iter().copied().filter(|v| !(low..=high).contains(v)).collect();

        Some(Self {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }

    /// `Q3 - Q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Builder for a single horizontal box plot.
#[derive(Debug, Clone)]
pub struct BoxPlot {
    data: Vec<f64>,
    stats: Option<BoxStats>,
    fill: Rgba,
    width: u32,
    height: u32,
    margin: u32,
}

impl Default for BoxPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxPlot {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            stats: None,
            fill: palette::FILL,
            width: 800,
            height: 300,
            margin: 40,
        }
    }

    /// Set the data from integer gaps.
    #[must_use]
    pub fn gaps(mut self, gaps: &[u64]) -> Self {
        self.data = gaps.iter().map(|&g| g as f64).collect();
        self
    }

    /// Set the data.
    #[must_use]
    pub fn data(mut self, data: &[f64]) -> Self {
        self.data = data.to_vec();
        self
    }

    /// Set the box fill color.
    #[must_use]
    pub fn fill(mut self, color: Rgba) -> Self {
        self.fill = color;
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Summary computed by [`Self::build`].
    #[must_use]
    pub fn stats(&self) -> Option<&BoxStats> {
        self.stats.as_ref()
    }

    /// Compute the summary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] if there is no finite value.
    pub fn build(mut self) -> Result<Self> {
        self.stats = Some(BoxStats::from_data(&self.data).ok_or(Error::EmptyData)?);
        Ok(self)
    }

    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions or an unbuilt plot.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let stats = self.stats.as_ref().ok_or(Error::EmptyData)?;
        let mut fb = blank_canvas(self.width, self.height, palette::BACKGROUND)?;

        let values: Vec<f32> = self
            .data
            .iter()
            .filter(|v| v.is_finite())
            .map(|&v| v as f32)
            .collect();
        let x_domain = LinearScale::from_data(&values, (0.0, 1.0), 0.05)?.domain();
        let axes = Axes::linear(
            Axes::plot_area(self.width, self.height, self.margin),
            x_domain,
            (0.0, 1.0),
        )?;
        axes.draw(&mut fb, true);

        let at = |v: f64, y: f32| axes.project(v as f32, y);
        let (box_top, box_bottom) = (0.7, 0.3);

        let (lw, _) = at(stats.lower_whisker, 0.5).to_pixel();
        let (q1, _) = at(stats.q1, 0.5).to_pixel();
        let (q3, _) = at(stats.q3, 0.5).to_pixel();
        let (uw, mid) = at(stats.upper_whisker, 0.5).to_pixel();
        draw_line(&mut fb, (lw, mid), (q1, mid), palette::AXIS);
        draw_line(&mut fb, (q3, mid), (uw, mid), palette::AXIS);
        for cap in [lw, uw] {
            draw_line(&mut fb, (cap, mid - 8), (cap, mid + 8), palette::AXIS);
        }

        let top_left = at(stats.q1, box_top);
        let bottom_right = at(stats.q3, box_bottom);
        draw_rect(&mut fb, top_left, bottom_right, self.fill);
        draw_rect_outline(&mut fb, top_left, bottom_right, palette::AXIS);

        let median_top = at(stats.median, box_top);
        let median_bottom = at(stats.median, box_bottom);
        let (mx, my0) = median_top.to_pixel();
        let (_, my1) = median_bottom.to_pixel();
        draw_line(&mut fb, (mx, my0), (mx, my1), palette::ACCENT);

        for &o in &stats.outliers {
            draw_point(&mut fb, at(o, 0.5), 5.0, palette::TERTIARY);
        }

        Ok(fb)
    }
}

impl batuta_common::display::WithDimensions for BoxPlot {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_stats_fixture() {
        // gaps below 100
        let stats = BoxStats::from_data(&[2.0, 6.0, 6.0, 12.0, 12.0, 18.0, 12.0]).unwrap();
        assert!((stats.q1 - 6.0).abs() < 1e-12);
        assert!((stats.median - 12.0).abs() < 1e-12);
        assert!((stats.q3 - 12.0).abs() < 1e-12);
        assert!((stats.iqr() - 6.0).abs() < 1e-12);
        assert_eq!(stats.lower_whisker, 2.0);
        assert_eq!(stats.upper_whisker, 18.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn test_box_stats_outlier() {
        let stats = BoxStats::from_data(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.upper_whisker, 5.0);
    }

    #[test]
    fn test_box_stats_empty() {
        assert!(BoxStats::from_data(&[]).is_none());
        assert!(BoxStats::from_data(&[f64::NAN]).is_none());
    }

    #[test]
    fn test_render() {
        let plot = BoxPlot::new()
            .gaps(&[2, 6, 6, 12, 12, 18, 12, 60])
            .dimensions(240, 120)
            .build()
            .unwrap();
        let fb = plot.to_framebuffer().unwrap();
        assert!(fb.count_color(palette::FILL) > 0);
        assert!(!plot.stats().unwrap().outliers.is_empty());
    }

    #[test]
    fn test_render_unbuilt() {
        assert!(BoxPlot::new().gaps(&[2]).to_framebuffer().is_err());
    }
}
