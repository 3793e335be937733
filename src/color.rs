//! Colors and the plot palette.

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Opaque color from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// `[r, g, b, a]`.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Inverse of [`Self::to_array`].
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Linear interpolation, `t` clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// ITU-R BT.709 relative luminance in `[0, 255]`.
    #[must_use]
    pub fn luminance(self) -> f32 {
        0.2126 * f32::from(self.r) + 0.7152 * f32::from(self.g) + 0.0722 * f32::from(self.b)
    }
}

/// Colors shared by every plot.
pub mod palette {
    use super::Rgba;

    /// Twin pair markers and primary series.
    pub const PAIR: Rgba = Rgba::from_hex(0x1F_77_B4);
    /// Regression line, mean marker, highlighted members.
    pub const ACCENT: Rgba = Rgba::from_hex(0xD6_27_28);
    /// Median marker and secondary series.
    pub const SECONDARY: Rgba = Rgba::from_hex(0x2C_A0_2C);
    /// Mode marker and tertiary series.
    pub const TERTIARY: Rgba = Rgba::from_hex(0xFF_7F_0E);
    /// Axes and tick marks.
    pub const AXIS: Rgba = Rgba::from_hex(0x33_33_33);
    /// Grid lines.
    pub const GRID: Rgba = Rgba::from_hex(0xDD_DD_DD);
    /// Spiral background dots.
    pub const FAINT: Rgba = Rgba::new(0x99, 0x99, 0x99, 0x60);
    /// Histogram bars and box fill.
    pub const FILL: Rgba = Rgba::from_hex(0x87_CE_EB);
    /// Plot background.
    pub const BACKGROUND: Rgba = Rgba::WHITE;

    /// Series colors in drawing order.
    pub const SERIES: [Rgba; 4] = [PAIR, ACCENT, SECONDARY, TERTIARY];

    /// Color of series `index`, cycling.
    #[must_use]
    pub fn series(index: usize) -> Rgba {
        SERIES[index % SERIES.len()]
    }
}
