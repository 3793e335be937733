//! Rasterization of lines, rectangles and discs.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;

// ============================================================================
// Lines
// ============================================================================

/// Draw a one-pixel line with Bresenham's algorithm.
pub fn draw_line(fb: &mut Framebuffer, from: (i32, i32), to: (i32, i32), color: Rgba) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        fb.set_pixel(x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw an anti-aliased line with Wu's algorithm.
///
/// Each step along the major axis splits the intensity between the two
/// pixels straddling the ideal line.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, from: Point, to: Point, color: Rgba) {
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return;
    }

    let steep = (to.y - from.y).abs() > (to.x - from.x).abs();
    // Work in a frame where x is the major axis and increases.
    let (mut a, mut b) = if steep {
        ((from.y, from.x), (to.y, to.x))
    } else {
        ((from.x, from.y), (to.x, to.y))
    };
    if a.0 > b.0 {
        std::mem::swap(&mut a, &mut b);
    }

    let dx = b.0 - a.0;
    let gradient = if dx < f32::EPSILON { 0.0 } else { (b.1 - a.1) / dx };

    let mut plot = |major: i32, minor: i32, coverage: f32| {
        if steep {
            fb.blend_pixel(minor, major, color, coverage);
        } else {
            fb.blend_pixel(major, minor, color, coverage);
        }
    };

    let start = a.0.round() as i32;
    let end = b.0.round() as i32;
    for major in start..=end {
        let minor = a.1 + gradient * (major as f32 - a.0);
        let base = minor.floor();
        let frac = minor - base;
        plot(major, base as i32, 1.0 - frac);
        plot(major, base as i32 + 1, frac);
    }
}

/// Draw a dashed line; `dash` pixels on, `dash` pixels off.
pub fn draw_dashed_line(fb: &mut Framebuffer, from: Point, to: Point, dash: f32, color: Rgba) {
    let length = from.distance(to);
    if length < f32::EPSILON || dash <= 0.0 {
        return;
    }
    let steps = (length / dash).ceil() as usize;
    for i in (0..steps).step_by(2) {
        let t0 = i as f32 * dash / length;
        let t1 = ((i + 1) as f32 * dash / length).min(1.0);
        let p0 = Point::new(from.x + (to.x - from.x) * t0, from.y + (to.y - from.y) * t0);
        let p1 = Point::new(from.x + (to.x - from.x) * t1, from.y + (to.y - from.y) * t1);
        draw_line_aa(fb, p0, p1, color);
    }
}

/// Draw a connected polyline through `points`.
pub fn draw_polyline(fb: &mut Framebuffer, points: &[Point], color: Rgba) {
    for segment in points.windows(2) {
        draw_line_aa(fb, segment[0], segment[1], color);
    }
}

// ============================================================================
// Rectangles
// ============================================================================

/// Fill the rectangle with corners `top_left` and `bottom_right` (inclusive).
pub fn draw_rect(fb: &mut Framebuffer, top_left: Point, bottom_right: Point, color: Rgba) {
    let (x0, y0) = top_left.to_pixel();
    let (x1, y1) = bottom_right.to_pixel();
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    let (y0, y1) = (y0.min(y1), y0.max(y1));
    fb.fill_rect(x0, y0, (x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32, color);
}

/// Outline the rectangle with corners `top_left` and `bottom_right`.
pub fn draw_rect_outline(fb: &mut Framebuffer, top_left: Point, bottom_right: Point, color: Rgba) {
    let (x0, y0) = top_left.to_pixel();
    let (x1, y1) = bottom_right.to_pixel();
    draw_line(fb, (x0, y0), (x1, y0), color);
    draw_line(fb, (x1, y0), (x1, y1), color);
    draw_line(fb, (x1, y1), (x0, y1), color);
    draw_line(fb, (x0, y1), (x0, y0), color);
}

// ============================================================================
// Discs
// ============================================================================

/// Fill a disc of `radius` pixels around `center`, blending the rim.
///
/// A radius below one pixel paints a single blended dot.
pub fn draw_circle(fb: &mut Framebuffer, center: Point, radius: f32, color: Rgba) {
    if !center.x.is_finite() || !center.y.is_finite() {
        return;
    }
    if radius < 1.0 {
        let (x, y) = center.to_pixel();
        fb.blend_pixel(x, y, color, radius.max(0.5));
        return;
    }

    let reach = radius.ceil() as i32 + 1;
    let (cx, cy) = center.to_pixel();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let px = Point::new((cx + dx) as f32, (cy + dy) as f32);
            // Coverage fades linearly over the outermost pixel.
            let coverage = (radius + 0.5 - px.distance(center)).clamp(0.0, 1.0);
            if coverage > 0.0 {
                fb.blend_pixel(cx + dx, cy + dy, color, coverage);
            }
        }
    }
}

/// Draw a marker of diameter `size` at `center`.
pub fn draw_point(fb: &mut Framebuffer, center: Point, size: f32, color: Rgba) {
    draw_circle(fb, center, size / 2.0, color);
}
