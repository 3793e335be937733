//! PNG output through the `png` crate.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Eight bytes every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Encodes framebuffers as 8-bit RGBA PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder {
    compression: png::Compression,
}

impl PngEncoder {
    /// Encoder with default compression.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Trade file size for speed.
    #[must_use]
    pub fn fast(mut self) -> Self {
        self.compression = png::Compression::Fast;
        self
    }

    /// Encode `fb` into any writer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PngEncoding`] if encoding or writing fails.
    pub fn encode<W: Write>(&self, fb: &Framebuffer, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(self.compression);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(fb.pixels())?;
        writer.finish()?;
        Ok(())
    }

    /// Encode to an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PngEncoding`] if encoding fails.
    pub fn to_bytes(&self, fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.encode(fb, &mut buffer)?;
        Ok(buffer)
    }

    /// Write to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, fb: &Framebuffer, path: P) -> Result<()> {
        let path = path.as_ref();
        self.encode(fb, BufWriter::new(File::create(path)?))?;
        tracing::debug!(
            path = %path.display(),
            width = fb.width(),
            height = fb.height(),
            "wrote png"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn test_png_signature() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::BLACK);

        let bytes = PngEncoder::new().to_bytes(&fb).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_png_roundtrip_dimensions() {
        let fb = Framebuffer::new(7, 3).unwrap();
        let bytes = PngEncoder::new().fast().to_bytes(&fb).unwrap();

        let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 7);
        assert_eq!(reader.info().height, 3);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        let fb = Framebuffer::new(4, 4).unwrap();
        PngEncoder::new().write_to_file(&fb, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 8);
    }
}
