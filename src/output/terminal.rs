//! Plots rendered as terminal text.
//!
//! Each character cell averages the block of pixels it covers. ASCII mode
//! picks a glyph from a darkness ramp; the two color modes emit 24-bit
//! ANSI escapes, half-block mode packing two pixel rows into one line.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use std::fmt::Write as _;

/// Glyphs from lightest to darkest, for dark ink on a light page.
const RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Monospace cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// Plain ASCII, works everywhere.
    #[default]
    Ascii,
    /// `▀` with foreground and background colors, two rows per line.
    HalfBlock,
    /// One colored space per cell.
    TrueColor,
}

/// Terminal encoder configuration.
#[derive(Debug, Clone, Copy)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    columns: u32,
}

impl Default for TerminalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEncoder {
    /// Eighty columns of ASCII.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: TerminalMode::default(),
            columns: 80,
        }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the output width in characters.
    #[must_use]
    pub fn columns(mut self, columns: u32) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Character grid `(columns, rows)` for `fb`, where a half-block row
    /// counts as two.
    #[must_use]
    pub fn grid(&self, fb: &Framebuffer) -> (u32, u32) {
        let cols = self.columns.min(fb.width());
        let aspect = match self.mode {
            TerminalMode::HalfBlock => CELL_ASPECT / 2.0,
            TerminalMode::Ascii | TerminalMode::TrueColor => CELL_ASPECT,
        };
        let rows = (fb.height() as f32 * cols as f32 / fb.width() as f32 / aspect).round() as u32;
        let rows = rows.clamp(1, fb.height());
        match self.mode {
            TerminalMode::HalfBlock => (cols, rows + rows % 2),
            TerminalMode::Ascii | TerminalMode::TrueColor => (cols, rows),
        }
    }

    /// Render `fb` to a string, one line per text row.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer) -> String {
        let (cols, rows) = self.grid(fb);
        let cell = |cx: u32, cy: u32| average(fb, cx, cy, cols, rows);
        let mut out = String::new();

        match self.mode {
            TerminalMode::Ascii => {
                for cy in 0..rows {
                    out.extend((0..cols).map(|cx| glyph(cell(cx, cy))));
                    out.push('\n');
                }
            }
            TerminalMode::HalfBlock => {
                for cy in (0..rows).step_by(2) {
                    for cx in 0..cols {
                        let (top, bottom) = (cell(cx, cy), cell(cx, cy + 1));
                        let _ = write!(
                            out,
                            "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m\u{2580}",
                            top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                        );
                    }
                    out.push_str("\x1b[0m\n");
                }
            }
            TerminalMode::TrueColor => {
                for cy in 0..rows {
                    for cx in 0..cols {
                        let c = cell(cx, cy);
                        let _ = write!(out, "\x1b[48;2;{};{};{}m ", c.r, c.g, c.b);
                    }
                    out.push_str("\x1b[0m\n");
                }
            }
        }
        out
    }
}

/// Mean color of the pixels under cell `(cx, cy)` of a `cols x rows` grid.
fn average(fb: &Framebuffer, cx: u32, cy: u32, cols: u32, rows: u32) -> Rgba {
    let span = |i: u32, cells: u32, pixels: u32| {
        let start = (u64::from(i) * u64::from(pixels) / u64::from(cells)) as u32;
        let end = (u64::from(i + 1) * u64::from(pixels) / u64::from(cells)) as u32;
        (start.min(pixels - 1), end.max(start + 1).min(pixels))
    };
    let (x0, x1) = span(cx, cols, fb.width());
    let (y0, y1) = span(cy, rows, fb.height());

    let mut sum = [0u64; 3];
    let mut n = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            if let Some(p) = fb.get_pixel(x, y) {
                sum[0] += u64::from(p.r);
                sum[1] += u64::from(p.g);
                sum[2] += u64::from(p.b);
                n += 1;
            }
        }
    }
    let n = n.max(1);
    Rgba::rgb((sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8)
}

fn glyph(color: Rgba) -> char {
    let darkness = 1.0 - color.luminance() / 255.0;
    let idx = (darkness * (RAMP.len() - 1) as f32).round() as usize;
    RAMP[idx.min(RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Framebuffer {
        let mut fb = Framebuffer::new(40, 20).unwrap();
        fb.clear(Rgba::WHITE);
        fb.fill_rect(0, 0, 20, 20, Rgba::BLACK);
        fb
    }

    #[test]
    fn test_ascii_dark_left_light_right() {
        let text = TerminalEncoder::new().columns(4).render(&canvas());
        let first = text.lines().next().unwrap();
        assert_eq!(first.chars().count(), 4);
        assert!(first.starts_with('@'));
        assert!(first.ends_with(' '));
    }

    #[test]
    fn test_grid_aspect() {
        let fb = canvas();
        assert_eq!(TerminalEncoder::new().columns(40).grid(&fb), (40, 10));
        assert_eq!(
            TerminalEncoder::new().mode(TerminalMode::HalfBlock).columns(40).grid(&fb),
            (40, 20)
        );
    }

    #[test]
    fn test_color_modes_reset() {
        for mode in [TerminalMode::HalfBlock, TerminalMode::TrueColor] {
            let text = TerminalEncoder::new().mode(mode).columns(8).render(&canvas());
            assert!(text.contains("\x1b[48;2;"));
            assert!(text.lines().all(|line| line.ends_with("\x1b[0m")));
        }
    }

    #[test]
    fn test_columns_capped_by_width() {
        let fb = Framebuffer::new(10, 10).unwrap();
        let (cols, rows) = TerminalEncoder::new().columns(200).grid(&fb);
        assert_eq!(cols, 10);
        assert!(rows >= 1);
    }
}
