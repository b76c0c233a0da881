//! Owned color and depth planes with bounds-checked, depth-tested access.
//!
//! The depth plane stores normalized device z in `[-1, 1]`: -1 at the near
//! plane, +1 at the far plane. Smaller values are closer to the camera, and a
//! cleared buffer holds 1.0 everywhere ("nothing drawn yet").

use crate::colors::{self, Color};

/// Depth value of a cleared sample.
pub const FAR_DEPTH: f32 = 1.0;

/// Channels per color sample (RGB24).
pub const CHANNELS: usize = 3;

/// A single sample read back from the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub color: [u8; 3],
    pub depth: f32,
}

/// Color plane (RGB24, row-major, top-left origin) paired 1:1 with a depth plane.
pub struct FrameBuffer {
    color_buffer: Vec<u8>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        let [r, g, b] = colors::BACKGROUND.to_rgb8();
        Self {
            color_buffer: [r, g, b].repeat(size),
            depth_buffer: vec![FAR_DEPTH; size],
            width,
            height,
        }
    }

    /// Reallocate both planes for new dimensions. Contents are reset.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Set every color sample to `color` and every depth sample to far (1.0).
    pub fn clear(&mut self, color: Color) {
        let rgb = color.to_rgb8();
        for sample in self.color_buffer.chunks_exact_mut(CHANNELS) {
            sample.copy_from_slice(&rgb);
        }
        self.depth_buffer.fill(FAR_DEPTH);
    }

    /// Write a pixel with depth testing.
    ///
    /// Out-of-bounds coordinates and depths outside `[-1, 1]` are ignored. The
    /// write happens only when `z` is strictly nearer than the stored depth, so
    /// the first of two equal-depth writes wins.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, z: f32, color: Color) {
        if !(-1.0..=1.0).contains(&z) {
            return;
        }
        let Some(idx) = self.index(x, y) else {
            return;
        };
        if z < self.depth_buffer[idx] {
            self.depth_buffer[idx] = z;
            self.color_buffer[idx * CHANNELS..(idx + 1) * CHANNELS]
                .copy_from_slice(&color.to_rgb8());
        }
    }

    /// Write a color without touching or testing depth (lines, overlays).
    #[inline]
    pub fn set_pixel_overlay(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx * CHANNELS..(idx + 1) * CHANNELS]
                .copy_from_slice(&color.to_rgb8());
        }
    }

    /// Read back a sample, or the out-of-bounds sentinel at far depth.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Pixel {
        match self.index(x, y) {
            Some(idx) => {
                let c = &self.color_buffer[idx * CHANNELS..(idx + 1) * CHANNELS];
                Pixel {
                    color: [c[0], c[1], c[2]],
                    depth: self.depth_buffer[idx],
                }
            }
            None => Pixel {
                color: colors::OUT_OF_BOUNDS,
                depth: FAR_DEPTH,
            },
        }
    }

    /// Raw RGB24 bytes, `width * 3` bytes per row.
    pub fn as_bytes(&self) -> &[u8] {
        &self.color_buffer
    }

    /// Copy the color plane into an [`image::RgbImage`].
    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(self.get_pixel(x as i32, y as i32).color)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(1.0, 0.0, 0.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    #[test]
    fn clear_resets_color_and_depth_everywhere() {
        let mut fb = FrameBuffer::new(8, 6);
        fb.set_pixel(3, 2, -0.5, RED);
        fb.clear(Color::from_rgb8(10, 20, 30));

        for y in 0..6 {
            for x in 0..8 {
                let p = fb.get_pixel(x, y);
                assert_eq!(p.color, [10, 20, 30]);
                assert_eq!(p.depth, FAR_DEPTH);
            }
        }
    }

    #[test]
    fn nearer_write_wins_regardless_of_order() {
        let mut first_near = FrameBuffer::new(4, 4);
        first_near.set_pixel(1, 1, -0.2, RED);
        first_near.set_pixel(1, 1, 0.4, BLUE);

        let mut first_far = FrameBuffer::new(4, 4);
        first_far.set_pixel(1, 1, 0.4, BLUE);
        first_far.set_pixel(1, 1, -0.2, RED);

        assert_eq!(first_near.get_pixel(1, 1).color, [255, 0, 0]);
        assert_eq!(first_far.get_pixel(1, 1).color, [255, 0, 0]);
        assert_eq!(first_near.get_pixel(1, 1).depth, -0.2);
        assert_eq!(first_far.get_pixel(1, 1).depth, -0.2);
    }

    #[test]
    fn equal_depth_keeps_first_write() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(0, 0, 0.0, RED);
        fb.set_pixel(0, 0, 0.0, BLUE);
        assert_eq!(fb.get_pixel(0, 0).color, [255, 0, 0]);
    }

    #[test]
    fn out_of_range_depth_is_ignored() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(0, 0, -1.5, RED);
        fb.set_pixel(1, 0, 1.01, RED);
        assert_eq!(fb.get_pixel(0, 0).color, [255, 255, 255]);
        assert_eq!(fb.get_pixel(1, 0).depth, FAR_DEPTH);
    }

    #[test]
    fn out_of_bounds_access_is_harmless() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(-1, 0, 0.0, RED);
        fb.set_pixel(2, 1, 0.0, RED);
        fb.set_pixel_overlay(0, 5, RED);

        let p = fb.get_pixel(7, -3);
        assert_eq!(p.color, colors::OUT_OF_BOUNDS);
        assert_eq!(p.depth, FAR_DEPTH);
        assert!(fb.as_bytes().iter().all(|&b| b == 255));
    }

    #[test]
    fn overlay_ignores_depth() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(0, 0, -0.9, RED);
        fb.set_pixel_overlay(0, 0, BLUE);
        let p = fb.get_pixel(0, 0);
        assert_eq!(p.color, [0, 0, 255]);
        assert_eq!(p.depth, -0.9);
    }

    #[test]
    fn image_export_matches_buffer() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.set_pixel(2, 1, 0.0, RED);
        let img = fb.to_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn planes_are_sized_in_usize() {
        let mut fb = FrameBuffer::new(70_000, 2);
        assert_eq!(fb.as_bytes().len(), 70_000 * 2 * CHANNELS);

        fb.set_pixel_overlay(69_999, 1, RED);
        let bytes = fb.as_bytes();
        assert_eq!(&bytes[bytes.len() - CHANNELS..], &[255, 0, 0]);
        assert_eq!(fb.get_pixel(69_999, 0).color, [255, 255, 255]);
    }

    #[test]
    fn zero_sized_buffer_reads_the_sentinel() {
        let mut fb = FrameBuffer::new(0, 5);
        fb.set_pixel(0, 0, 0.0, RED);
        assert!(fb.as_bytes().is_empty());
        assert_eq!(fb.get_pixel(0, 0).color, colors::OUT_OF_BOUNDS);
    }
}
