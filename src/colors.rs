//! Color type and palette constants.
//!
//! Colors travel through the pipeline as normalized floating-point RGB so they
//! can be interpolated across lines and triangles. They are quantized to 8 bits
//! per channel only when written into the frame buffer.

/// Linear RGB color with channels in the [0.0, 1.0] range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Same intensity on all three channels.
    pub const fn gray(intensity: f32) -> Self {
        Self::new(intensity, intensity, intensity)
    }

    /// Build a color from 8-bit channels (0-255).
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Quantize to 8-bit channels, clamping out-of-range values.
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Linear interpolation between two colors.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Barycentric blend of three colors.
    #[inline]
    pub fn blend(colors: [Color; 3], lambda: [f32; 3]) -> Self {
        Self::new(
            lambda[0] * colors[0].r + lambda[1] * colors[1].r + lambda[2] * colors[2].r,
            lambda[0] * colors[0].g + lambda[1] * colors[1].g + lambda[2] * colors[2].g,
            lambda[0] * colors[0].b + lambda[1] * colors[1].b + lambda[2] * colors[2].b,
        )
    }
}

pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

/// Frame clear color.
pub const BACKGROUND: Color = WHITE;

/// Returned by [`crate::FrameBuffer::get_pixel`] for coordinates outside the buffer.
pub const OUT_OF_BOUNDS: [u8; 3] = [250, 250, 250];

/// Fallback face colors for geometry that carries none.
pub const PALETTE: [[u8; 3]; 6] = [
    [214, 69, 65],
    [65, 131, 215],
    [46, 204, 113],
    [241, 196, 15],
    [155, 89, 182],
    [230, 126, 34],
];
