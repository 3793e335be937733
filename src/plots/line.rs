//! Multi-series line chart with linear or logarithmic axes.
//!
//! Used for the windowed density and proportion curves and for the
//! log-log comparison of actual pair counts against the Hardy–Littlewood
//! estimate.

use crate::color::{palette, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;
use crate::render::{blank_canvas, draw_dashed_line, draw_point, draw_polyline, AxisKind, Axes};
use crate::scale::{LinearScale, LogScale, Scale};

/// One named series.
#[derive(Debug, Clone)]
pub struct LineSeries {
    /// Series name.
    pub name: String,
    /// X values.
    pub x: Vec<f32>,
    /// Y values.
    pub y: Vec<f32>,
    /// Line color.
    pub color: Rgba,
    /// Dashed instead of solid.
    pub dashed: bool,
    /// Draw a marker on every point.
    pub markers: bool,
}

impl LineSeries {
    /// Create an empty series.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x: Vec::new(),
            y: Vec::new(),
            color: palette::PAIR,
            dashed: false,
            markers: false,
        }
    }

    /// Set the data.
    #[must_use]
    pub fn data(mut self, x: &[f32], y: &[f32]) -> Self {
        self.x = x.to_vec();
        self.y = y.to_vec();
        self
    }

    /// Set the color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Draw dashed.
    #[must_use]
    pub fn dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    /// Draw point markers.
    #[must_use]
    pub fn markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }
}

/// Builder for line charts.
#[derive(Debug, Clone)]
pub struct LineChart {
    series: Vec<LineSeries>,
    reference: Option<(f32, Rgba)>,
    x_axis: AxisKind,
    y_axis: AxisKind,
    width: u32,
    height: u32,
    margin: u32,
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new()
    }
}

impl LineChart {
    /// Create a new line chart builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            reference: None,
            x_axis: AxisKind::Linear,
            y_axis: AxisKind::Linear,
            width: 800,
            height: 600,
            margin: 40,
        }
    }

    /// Add a series.
    #[must_use]
    pub fn add_series(mut self, series: LineSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Horizontal dashed reference line at `y`.
    #[must_use]
    pub fn reference_line(mut self, y: f32, color: Rgba) -> Self {
        self.reference = Some((y, color));
        self
    }

    /// Use logarithmic axes.
    #[must_use]
    pub fn log_log(mut self, enabled: bool) -> Self {
        let kind = if enabled { AxisKind::Log } else { AxisKind::Linear };
        self.x_axis = kind;
        self.y_axis = kind;
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the margin.
    #[must_use]
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Number of series.
    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Build and validate the chart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] without series or with an empty one and
    /// [`Error::DataLengthMismatch`] if a series has unequal x and y lengths.
    pub fn build(self) -> Result<Self> {
        if self.series.is_empty() {
            return Err(Error::EmptyData);
        }
        for s in &self.series {
            if s.x.len() != s.y.len() {
                return Err(Error::DataLengthMismatch {
                    x_len: s.x.len(),
                    y_len: s.y.len(),
                });
            }
            if s.x.is_empty() {
                return Err(Error::EmptyData);
            }
        }
        Ok(self)
    }

    fn domain(kind: AxisKind, values: &[f32]) -> Result<(f32, f32)> {
        Ok(match kind {
            AxisKind::Linear => LinearScale::from_data(values, (0.0, 1.0), 0.05)?.domain(),
            AxisKind::Log => LogScale::from_data(values, (0.0, 1.0))?.domain(),
        })
    }

    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions, or if a log axis has no
    /// positive value to show.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = blank_canvas(self.width, self.height, palette::BACKGROUND)?;

        let xs: Vec<f32> = self.series.iter().flat_map(|s| s.x.iter().copied()).collect();
        let mut ys: Vec<f32> = self.series.iter().flat_map(|s| s.y.iter().copied()).collect();
        if let Some((y, _)) = self.reference {
            ys.push(y);
        }

        let axes = Axes::new(
            Axes::plot_area(self.width, self.height, self.margin),
            (self.x_axis, Self::domain(self.x_axis, &xs)?),
            (self.y_axis, Self::domain(self.y_axis, &ys)?),
        )?;
        axes.draw(&mut fb, true);

        if let Some((y, color)) = self.reference {
            let area = axes.area();
            let py = axes.y_scale().scale(y);
            let (from, to) = (Point::new(area.x, py), Point::new(area.right(), py));
            draw_dashed_line(&mut fb, from, to, 6.0, color);
        }

        for series in &self.series {
            let visible =
                |v: f32, kind: AxisKind| v.is_finite() && (kind == AxisKind::Linear || v > 0.0);
            let points: Vec<Point> = series
                .x
                .iter()
                .zip(&series.y)
                .filter(|&(&x, &y)| visible(x, self.x_axis) && visible(y, self.y_axis))
                .map(|(&x, &y)| axes.project(x, y))
                .collect();

            if series.dashed {
                for pair in points.windows(2) {
                    draw_dashed_line(&mut fb, pair[0], pair[1], 5.0, series.color);
                }
            } else {
                draw_polyline(&mut fb, &points, series.color);
            }
            if series.markers || points.len() == 1 {
                for &p in &points {
                    draw_point(&mut fb, p, 5.0, series.color);
                }
            }
        }

        Ok(fb)
    }
}

impl batuta_common::display::WithDimensions for LineChart {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batuta_common::display::WithDimensions;

    fn series() -> LineSeries {
        LineSeries::new("density").data(&[5.0, 15.0, 25.0, 35.0], &[0.2, 0.2, 0.1, 0.0])
    }

    #[test]
    fn test_line_chart_build() {
        let chart = LineChart::new().add_series(series()).build().unwrap();
        assert_eq!(chart.series_count(), 1);
    }

    #[test]
    fn test_line_chart_errors() {
        assert!(matches!(LineChart::new().build(), Err(Error::EmptyData)));
        let bad = LineSeries::new("bad").data(&[1.0, 2.0], &[1.0]);
        assert!(matches!(
            LineChart::new().add_series(bad).build(),
            Err(Error::DataLengthMismatch { x_len: 2, y_len: 1 })
        ));
    }

    #[test]
    fn test_line_chart_render() {
        let chart = LineChart::new()
            .add_series(series().color(palette::ACCENT))
            .reference_line(0.1, palette::SECONDARY)
            .dimensions(200, 120)
            .build()
            .unwrap();
        let fb = chart.to_framebuffer().unwrap();
        assert_eq!((fb.width(), fb.height()), (200, 120));
        assert!(!fb.is_blank());
    }

    #[test]
    fn test_log_log_skips_zero() {
        let chart = LineChart::new()
            .add_series(
                LineSeries::new("actual").data(&[100.0, 1000.0, 10000.0], &[8.0, 35.0, 205.0]),
            )
            .add_series(LineSeries::new("zero").data(&[100.0], &[0.0]).dashed(true))
            .log_log(true)
            .dimensions(150, 100)
            .build()
            .unwrap();
        assert!(!chart.to_framebuffer().unwrap().is_blank());
    }

    #[test]
    fn test_set_dimensions() {
        let mut chart = LineChart::new().add_series(series());
        chart.set_dimensions(64, 48);
        let fb = chart.build().unwrap().to_framebuffer().unwrap();
        assert_eq!((fb.width(), fb.height()), (64, 48));
    }
}
