//! Gap against pair index, with the least squares trend line.

use crate::color::{palette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::render::{blank_canvas, draw_line_aa, draw_point, Axes};
use crate::scale::{LinearScale, Scale};
use crate::stats::Regression;

/// Builder for the gap trend scatter plot.
#[derive(Debug, Clone)]
pub struct TrendPlot {
    gaps: Vec<f32>,
    fit: Option<Regression>,
    point_color: Rgba,
    line_color: Rgba,
    point_size: f32,
    width: u32,
    height: u32,
    margin: u32,
}

impl Default for TrendPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendPlot {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gaps: Vec::new(),
            fit: None,
            point_color: palette::PAIR,
            line_color: palette::ACCENT,
            point_size: 4.0,
            width: 800,
            height: 600,
            margin: 40,
        }
    }

    /// Set the gap sequence.
    #[must_use]
    pub fn gaps(mut self, gaps: &[u64]) -> Self {
        self.gaps = gaps.iter().map(|&g| g as f32).collect();
        self
    }

    /// Set the point size.
    #[must_use]
    pub fn point_size(mut self, size: f32) -> Self {
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

    /// The fitted trend, available after [`Self::build`].
    #[must_use]
    pub fn fit(&self) -> Option<&Regression> {
        self.fit.as_ref()
    }

    /// Validate and fit the trend line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] without gaps.
    pub fn build(mut self) -> Result<Self> {
        let values: Vec<f64> = self.gaps.iter().map(|&g| f64::from(g)).collect();
        self.fit = Some(Regression::fit(&values).ok_or(Error::EmptyData)?);
        Ok(self)
    }

    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions or an unbuilt plot.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let fit = self.fit.ok_or(Error::EmptyData)?;
        let mut fb = blank_canvas(self.width, self.height, palette::BACKGROUND)?;

        let n = self.gaps.len();
        let last = (n.max(2) - 1) as f32;
        let x_domain = LinearScale::from_data(&[0.0, last], (0.0, 1.0), 0.03)?.domain();
        let mut y_values = self.gaps.clone();
        y_values.push(0.0);
        let y_domain = LinearScale::from_data(&y_values, (0.0, 1.0), 0.05)?.domain();

        let axes = Axes::linear(
            Axes::plot_area(self.width, self.height, self.margin),
            x_domain,
            y_domain,
        )?;
        axes.draw(&mut fb, true);

        for (i, &gap) in self.gaps.iter().enumerate() {
            draw_point(&mut fb, axes.project(i as f32, gap), self.point_size, self.point_color);
        }

        let x_end = (n - 1) as f32;
        let start = axes.project(0.0, fit.predict(0.0) as f32);
        let end = axes.project(x_end, fit.predict(f64::from(x_end)) as f32);
        if n > 1 {
            draw_line_aa(&mut fb, start, end, self.line_color);
        }

        Ok(fb)
    }
}

impl batuta_common::display::WithDimensions for TrendPlot {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_fits_trend() {
        let plot = TrendPlot::new().gaps(&[2, 6, 6]).build().unwrap();
        let fit = plot.fit().unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_gaps() {
        assert!(matches!(TrendPlot::new().build(), Err(Error::EmptyData)));
        assert!(TrendPlot::new().to_framebuffer().is_err());
    }

    #[test]
    fn test_render() {
        let fb = TrendPlot::new()
            .gaps(&[2, 6, 6, 12, 12, 18, 12])
            .dimensions(200, 150)
            .build()
            .unwrap()
            .to_framebuffer()
            .unwrap();
        assert!(!fb.is_blank());
        assert!(fb.count_color(palette::PAIR) > 0);
    }

    #[test]
    fn test_render_single_gap() {
        let fb = TrendPlot::new()
            .gaps(&[2])
            .dimensions(100, 80)
            .build()
            .unwrap()
            .to_framebuffer()
            .unwrap();
        assert!(fb.count_color(palette::PAIR) > 0);
    }
}
