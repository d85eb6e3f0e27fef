//! Software canvas: alpha-blends sprites into an RGBA image

use std::path::Path;

use glam::Vec2;
use image::{Rgba, RgbaImage, imageops};

use super::Canvas;
use crate::assets::Sprite;

/// An in-memory frame
#[derive(Debug, Clone)]
pub struct Framebuffer {
    image: RgbaImage,
    frames: u64,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            frames: 0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn save(&self, path: &Path) -> Result<(), image::ImageError> {
        self.image.save(path)
    }

    /// Source-over blend of one pixel, used by the rotated path
    fn blend(&mut self, x: i64, y: i64, src: Rgba<u8>) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let a = src[3] as f32 / 255.0;
        if a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            dst[c] = (src[c] as f32 * a + dst[c] as f32 * (1.0 - a)).round() as u8;
        }
        dst[3] = 255;
    }

    /// Nearest-neighbour rotated blit around the sprite center
    fn blit_rotated(&mut self, src: &RgbaImage, pos: Vec2, degrees: f32) {
        let half = Vec2::new(src.width() as f32, src.height() as f32) / 2.0;
        let center = pos + half;
        let (sin, cos) = degrees.to_radians().sin_cos();

        let ext = Vec2::new(
            (half.x * cos).abs() + (half.y * sin).abs(),
            (half.x * sin).abs() + (half.y * cos).abs(),
        );
        let min = (center - ext).floor();
        let max = (center + ext).ceil();

        for y in min.y as i64..max.y as i64 {
            for x in min.x as i64..max.x as i64 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                // Inverse rotation back into sprite space
                let s = Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos) + half;
                if s.x < 0.0 || s.y < 0.0 {
                    continue;
                }
                let (sx, sy) = (s.x as u32, s.y as u32);
                if sx < src.width() && sy < src.height() {
                    self.blend(x, y, *src.get_pixel(sx, sy));
                }
            }
        }
    }
}

impl Canvas for Framebuffer {
    fn clear(&mut self) {
        for px in self.image.pixels_mut() {
            *px = Rgba([0, 0, 0, 255]);
        }
    }

    fn draw(&mut self, sprite: &Sprite, pos: Vec2, rotation: f32) {
        if rotation.abs() < f32::EPSILON {
            imageops::overlay(
                &mut self.image,
                &sprite.image,
                pos.x.floor() as i64,
                pos.y.floor() as i64,
            );
        } else {
            self.blit_rotated(&sprite.image, pos, rotation);
        }
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}
