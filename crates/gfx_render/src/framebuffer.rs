//! Color and depth targets

use std::path::Path;

use gfx_math::{color, Rgba};
use image::{ImageFormat, RgbaImage};

use crate::error::RenderError;

/// An RGBA float color buffer with a matching depth buffer
///
/// Row 0 is the top of the image. Depth clears to infinity so the first
/// fragment at a pixel always passes a "less" test.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    color: Vec<Rgba>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidViewport { width, height });
        }
        let count = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            color: vec![color::BLACK; count],
            depth: vec![f32::INFINITY; count],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    /// Fill the color buffer and reset depth
    pub fn clear(&mut self, clear_color: Rgba) {
        self.color.fill(clear_color);
        self.depth.fill(f32::INFINITY);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.color[i])
    }

    /// Overwrite a pixel; out-of-bounds writes are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, c: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.color[i] = c;
        }
    }

    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Store `z` if it is nearer than the current depth
    ///
    /// Returns whether the test passed.
    pub fn depth_test(&mut self, x: u32, y: u32, z: f32) -> bool {
        match self.index(x, y) {
            Some(i) if z < self.depth[i] => {
                self.depth[i] = z;
                true
            }
            _ => false,
        }
    }

    /// Quantize to an 8-bit image
    pub fn to_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        for (pixel, c) in img.pixels_mut().zip(&self.color) {
            pixel.0 = color::to_rgba8(*c);
        }
        img
    }

    /// Write the color buffer as a PNG, creating parent directories
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.to_image().save_with_format(path, ImageFormat::Png)?;
        log::debug!("Saved {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfx_math::color::{RED, WHITE};

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            Framebuffer::new(0, 4),
            Err(RenderError::InvalidViewport { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_clear_and_pixel() {
        let mut fb = Framebuffer::new(3, 2).unwrap();
        assert_eq!(fb.pixel(0, 0), Some(color::BLACK));
        fb.clear(WHITE);
        assert_eq!(fb.pixel(2, 1), Some(WHITE));
        assert_eq!(fb.pixel(3, 0), None);
        assert_eq!(fb.depth_at(1, 1), Some(f32::INFINITY));
    }

    #[test]
    fn test_depth_test_less() {
        let mut fb = Framebuffer::new(2, 2).unwrap();
        assert!(fb.depth_test(0, 0, 0.5));
        assert!(!fb.depth_test(0, 0, 0.5));
        assert!(fb.depth_test(0, 0, -0.2));
        assert_eq!(fb.depth_at(0, 0), Some(-0.2));
        assert!(!fb.depth_test(5, 5, 0.0));

        fb.clear(WHITE);
        assert!(fb.depth_test(0, 0, 0.9));
    }

    #[test]
    fn test_to_image_row_order() {
        let mut fb = Framebuffer::new(2, 2).unwrap();
        fb.set_pixel(1, 0, RED);
        let img = fb.to_image();
        assert_eq!(img.get_pixel(1, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(0, 1).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_save_png_creates_directories() {
        let dir = std::env::temp_dir().join(format!("gfx_render_fb_{}", std::process::id()));
        let path = dir.join("nested").join("0000.png");
        let mut fb = Framebuffer::new(4, 3).unwrap();
        fb.clear(RED);
        fb.save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.get_pixel(2, 2).0, [255, 0, 0, 255]);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
