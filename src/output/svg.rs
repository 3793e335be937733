//! SVG output.
//!
//! The rendered framebuffer is embedded as a base64 PNG so every plot
//! looks the same in both formats; titles and captions are real SVG text.

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt::Write as _;
use std::path::Path;

use super::PngEncoder;

/// Height reserved above the image for the title.
const TITLE_BAND: u32 = 28;

/// Text placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Left aligned.
    #[default]
    Start,
    /// Centered.
    Middle,
    /// Right aligned.
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// A drawable SVG element.
#[derive(Debug, Clone)]
pub enum SvgElement {
    /// Raster image given as a data URI.
    Image {
        /// Top edge.
        y: u32,
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
        /// `data:image/png;base64,...`
        href: String,
    },
    /// A line of text.
    Text {
        /// Anchor x.
        x: f32,
        /// Baseline y.
        y: f32,
        /// Content, escaped on output.
        text: String,
        /// Font size in pixels.
        size: f32,
        /// Fill color.
        fill: Rgba,
        /// Alignment.
        anchor: TextAnchor,
    },
}

/// SVG document wrapping a rendered plot.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    background: Rgba,
    elements: Vec<SvgElement>,
}

impl SvgEncoder {
    /// Wrap `fb`, optionally with a title band above it.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn from_framebuffer(fb: &Framebuffer, title: Option<&str>) -> Result<Self> {
        let band = if title.is_some() { TITLE_BAND } else { 0 };
        let png = PngEncoder::new().to_bytes(fb)?;

        let mut svg = Self {
            width: fb.width(),
            height: fb.height() + band,
            background: Rgba::WHITE,
            elements: vec![SvgElement::Image {
                y: band,
                width: fb.width(),
                height: fb.height(),
                href: format!("data:image/png;base64,{}", STANDARD.encode(png)),
            }],
        };
        if let Some(title) = title {
            svg.elements.push(SvgElement::Text {
                x: fb.width() as f32 / 2.0,
                y: band as f32 - 8.0,
                text: title.to_string(),
                size: 16.0,
                fill: Rgba::BLACK,
                anchor: TextAnchor::Middle,
            });
        }
        Ok(svg)
    }

    /// Set the page background.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Add a line of text.
    #[must_use]
    pub fn text(mut self, x: f32, y: f32, text: &str, size: f32, anchor: TextAnchor) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            size,
            fill: Rgba::BLACK,
            anchor,
        });
        self
    }

    /// Document width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Document height, title band included.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Serialize the document.
    #[must_use]
    pub fn render(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mut out = String::with_capacity(1024);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        let _ = writeln!(out, r#"  <rect width="100%" height="100%" fill="{}"/>"#, css(self.background));

        for element in &self.elements {
            match element {
                SvgElement::Image {
                    y,
                    width,
                    height,
                    href,
                } => {
                    let _ = writeln!(
                        out,
                        r#"  <image x="0" y="{y}" width="{width}" height="{height}" href="{href}"/>"#
                    );
                }
                SvgElement::Text {
                    x,
                    y,
                    text,
                    size,
                    fill,
                    anchor,
                } => {
                    let _ = writeln!(
                        out,
                        r#"  <text x="{x:.1}" y="{y:.1}" font-family="sans-serif" font-size="{size}" fill="{}" text-anchor="{}">{}</text>"#,
                        css(*fill),
                        anchor.as_str(),
                        escape(text)
                    );
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }

    /// Write the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render())?;
        tracing::debug!(path = %path.display(), "wrote svg");
        Ok(())
    }
}

fn css(color: Rgba) -> String {
    if color.a == u8::MAX {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    } else {
        format!(
            "rgba({},{},{},{:.3})",
            color.r,
            color.g,
            color.b,
            f32::from(color.a) / 255.0
        )
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeds_png() {
        let fb = Framebuffer::new(20, 10).unwrap();
        let svg = SvgEncoder::from_framebuffer(&fb, None).unwrap();
        let doc = svg.render();
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains("data:image/png;base64,"));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert_eq!(svg.height(), 10);
    }

    #[test]
    fn test_title_band() {
        let fb = Framebuffer::new(20, 10).unwrap();
        let svg = SvgEncoder::from_framebuffer(&fb, Some("Gaps < 100")).unwrap();
        assert_eq!(svg.height(), 10 + TITLE_BAND);
        let doc = svg.render();
        assert!(doc.contains("Gaps &lt; 100"));
        assert!(doc.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_css_colors() {
        assert_eq!(css(Rgba::WHITE), "#ffffff");
        assert_eq!(css(Rgba::TRANSPARENT), "rgba(0,0,0,0.000)");
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let fb = Framebuffer::new(4, 4).unwrap();
        SvgEncoder::from_framebuffer(&fb, None)
            .unwrap()
            .text(2.0, 2.0, "x", 8.0, TextAnchor::Start)
            .write_to_file(&path)
            .unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("<text"));
    }
}
