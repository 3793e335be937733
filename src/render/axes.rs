//! Plot area with a pair of scales, grid and tick marks.

use crate::color::{palette, Rgba};
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::scale::{AxisScale, LinearScale, LogScale, Scale};

use super::primitives::draw_line;

/// Length of a tick mark in pixels.
const TICK_LEN: i32 = 5;

/// Target number of ticks on a linear axis.
const TICK_COUNT: usize = 6;

/// How an axis maps its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisKind {
    /// Linear mapping.
    #[default]
    Linear,
    /// Base-10 logarithmic mapping.
    Log,
}

/// Rectangle of pixels and the scales projecting data into it.
#[derive(Debug, Clone, Copy)]
pub struct Axes {
    area: Rect,
    x: AxisScale,
    y: AxisScale,
}

impl Axes {
    /// Inner plot area of a `width x height` image with `margin` on each side.
    #[must_use]
    pub fn plot_area(width: u32, height: u32, margin: u32) -> Rect {
        Rect::new(0.0, 0.0, width as f32, height as f32).inset(margin as f32)
    }

    /// Axes over `area` for the given data domains.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ScaleDomain`] for an empty domain or a
    /// non-positive log domain.
    pub fn new(
        area: Rect,
        (x_kind, x_domain): (AxisKind, (f32, f32)),
        (y_kind, y_domain): (AxisKind, (f32, f32)),
    ) -> Result<Self> {
        let x = make_scale(x_kind, x_domain, (area.x, area.right()))?;
        // Screen y grows downwards.
        let y = make_scale(y_kind, y_domain, (area.bottom(), area.y))?;
        Ok(Self { area, x, y })
    }

    /// Linear axes, the common case.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ScaleDomain`] for an empty domain.
    pub fn linear(area: Rect, x_domain: (f32, f32), y_domain: (f32, f32)) -> Result<Self> {
        Self::new(area, (AxisKind::Linear, x_domain), (AxisKind::Linear, y_domain))
    }

    /// Pixel rectangle of the plot.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Horizontal scale.
    #[must_use]
    pub fn x_scale(&self) -> &AxisScale {
        &self.x
    }

    /// Vertical scale.
    #[must_use]
    pub fn y_scale(&self) -> &AxisScale {
        &self.y
    }

    /// Pixel position of the data point `(x, y)`.
    #[must_use]
    pub fn project(&self, x: f32, y: f32) -> Point {
        Point::new(self.x.scale(x), self.y.scale(y))
    }

    /// Draw the grid (optional), the left and bottom axis lines and ticks.
    pub fn draw(&self, fb: &mut Framebuffer, grid: bool) {
        let left = self.area.x.round() as i32;
        let right = self.area.right().round() as i32;
        let top = self.area.y.round() as i32;
        let bottom = self.area.bottom().round() as i32;

        let x_ticks: Vec<i32> = self
            .x
            .ticks(TICK_COUNT)
            .into_iter()
            .map(|t| self.x.scale(t).round() as i32)
            .collect();
        let y_ticks: Vec<i32> = self
            .y
            .ticks(TICK_COUNT)
            .into_iter()
            .map(|t| self.y.scale(t).round() as i32)
            .collect();

        if grid {
            for &x in &x_ticks {
                draw_line(fb, (x, top), (x, bottom), palette::GRID);
            }
            for &y in &y_ticks {
                draw_line(fb, (left, y), (right, y), palette::GRID);
            }
        }

        draw_line(fb, (left, bottom), (right, bottom), palette::AXIS);
        draw_line(fb, (left, top), (left, bottom), palette::AXIS);
        for &x in &x_ticks {
            draw_line(fb, (x, bottom), (x, bottom + TICK_LEN), palette::AXIS);
        }
        for &y in &y_ticks {
            draw_line(fb, (left - TICK_LEN, y), (left, y), palette::AXIS);
        }
    }
}

fn make_scale(kind: AxisKind, domain: (f32, f32), range: (f32, f32)) -> Result<AxisScale> {
    Ok(match kind {
        AxisKind::Linear => AxisScale::Linear(LinearScale::new(domain, range)?),
        AxisKind::Log => AxisScale::Log(LogScale::new(domain, range)?),
    })
}

/// New framebuffer cleared to `background`.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidDimensions`] if a side is zero.
pub fn blank_canvas(width: u32, height: u32, background: Rgba) -> Result<Framebuffer> {
    let mut fb = Framebuffer::new(width, height)?;
    fb.clear(background);
    Ok(fb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_corners() {
        let area = Axes::plot_area(200, 100, 10);
        let axes = Axes::linear(area, (0.0, 10.0), (0.0, 5.0)).unwrap();
        let origin = axes.project(0.0, 0.0);
        assert!((origin.x - 10.0).abs() < 1e-4);
        assert!((origin.y - 90.0).abs() < 1e-4);
        let corner = axes.project(10.0, 5.0);
        assert!((corner.x - 190.0).abs() < 1e-4);
        assert!((corner.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_log_axes_reject_zero() {
        let area = Axes::plot_area(100, 100, 10);
        let result = Axes::new(area, (AxisKind::Log, (0.0, 10.0)), (AxisKind::Linear, (0.0, 1.0)));
        assert!(result.is_err());
    }

    #[test]
    fn test_draw_axes() {
        let mut fb = blank_canvas(120, 80, Rgba::WHITE).unwrap();
        let axes = Axes::linear(Axes::plot_area(120, 80, 15), (0.0, 1.0), (0.0, 1.0)).unwrap();
        axes.draw(&mut fb, true);
        assert_eq!(fb.get_pixel(15, 65), Some(palette::AXIS));
        assert!(fb.count_color(palette::GRID) > 0);
    }
}
