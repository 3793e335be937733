//! RGBA pixel buffer every plot renders into.
//!
//! Pixels are stored tightly packed in row-major order, four bytes each, so
//! the buffer can be handed straight to the PNG encoder. Whole-buffer
//! reductions go through trueno's SIMD vectors.

use crate::color::Rgba;
use crate::error::{Error, Result};
use trueno::{Backend, Vector};

/// Tightly packed RGBA framebuffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either side is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use twinviz::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.pixel_count(), 480_000);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let len = (width as usize) * (height as usize) * 4;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// `width * height`.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Raw RGBA bytes, row-major, no padding.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Fill the whole buffer with one color.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + x as usize) * 4)
    }

    /// Color at `(x, y)`, `None` outside the buffer.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let i = self.index(i32::try_from(x).ok()?, i32::try_from(y).ok()?)?;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[i..i + 4]);
        Some(Rgba::from_array(px))
    }

    /// Overwrite `(x, y)`. Coordinates outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Composite `color` over `(x, y)` with its alpha scaled by `coverage`.
    ///
    /// `coverage` is clamped to `[0, 1]`; anti-aliased primitives pass the
    /// fraction of the pixel they cover.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        let Some(i) = self.index(x, y) else {
            return;
        };

        let src_a = f32::from(color.a) / 255.0 * coverage.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst_a = f32::from(self.pixels[i + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let src = [color.r, color.g, color.b];
        for (c, &s) in src.iter().enumerate() {
            let d = f32::from(self.pixels[i + c]);
            let out = (f32::from(s) * src_a + d * dst_a * (1.0 - src_a)) / out_a;
            self.pixels[i + c] = out.round().clamp(0.0, 255.0) as u8;
        }
        self.pixels[i + 3] = (out_a * 255.0).round() as u8;
    }

    /// Fill the rectangle `[x, x + w) x [y, y + h)`, clipped to the buffer.
    ///
    /// Opaque colors overwrite; translucent ones are blended.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        let x1 = x.saturating_add(clamp(w)).min(clamp(self.width));
        let y1 = y.saturating_add(clamp(h)).min(clamp(self.height));

        for py in y0..y1 {
            for px in x0..x1 {
                if color.a == 255 {
                    self.set_pixel(px, py, color);
                } else {
                    self.blend_pixel(px, py, color, 1.0);
                }
            }
        }
    }

    /// Number of pixels exactly equal to `color`.
    #[must_use]
    pub fn count_color(&self, color: Rgba) -> usize {
        let rgba = color.to_array();
        self.pixels.chunks_exact(4).filter(|px| *px == rgba).count()
    }

    /// `(min, max, mean)` BT.709 luminance, reduced with SIMD vectors.
    #[must_use]
    pub fn luminance_stats(&self) -> (f32, f32, f32) {
        let lum: Vec<f32> = self
            .pixels
            .chunks_exact(4)
            .map(|px| Rgba::from_array([px[0], px[1], px[2], px[3]]).luminance())
            .collect();
        let v = Vector::from_vec(lum);
        (
            v.min().unwrap_or(0.0),
            v.max().unwrap_or(0.0),
            v.mean().unwrap_or(0.0),
        )
    }

    /// Whether the buffer holds a single flat shade.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        let (min, max, _) = self.luminance_stats();
        max - min < 1.0
    }

    /// SIMD backend trueno selected for this machine.
    #[must_use]
    pub fn backend() -> Backend {
        Backend::select_best()
    }
}
