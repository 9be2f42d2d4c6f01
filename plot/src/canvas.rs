//! Minimal raster canvas over an RGB image.

use std::io::Cursor;

use image::DynamicImage;
use image::ImageFormat;
use image::Rgb;
use image::RgbImage;

use crate::error::Result;
use crate::font;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const GREY: Rgb<u8> = Rgb([128, 128, 128]);
pub const LIGHT_GREY: Rgb<u8> = Rgb([225, 225, 225]);
pub const BLUE: Rgb<u8> = Rgb([31, 119, 180]);
pub const RED: Rgb<u8> = Rgb([214, 39, 40]);
pub const GREEN: Rgb<u8> = Rgb([44, 160, 44]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePattern {
    Solid,
    /// Long dashes with equal gaps.
    Dashed,
    /// Short dots with wide gaps.
    Dotted,
}

impl LinePattern {
    /// `(on, off)` lengths in pixels.
    const fn dash(&self) -> Option<(f32, f32)> {
        match self {
            LinePattern::Solid => None,
            LinePattern::Dashed => Some((8.0, 8.0)),
            LinePattern::Dotted => Some((2.0, 10.0)),
        }
    }
}

pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, WHITE),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Alpha-blend `color` onto one pixel. Out-of-bounds writes are dropped.
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for (dst, src) in pixel.0.iter_mut().zip(color.0) {
            *dst = (f32::from(src) * alpha + f32::from(*dst) * (1.0 - alpha)).round() as u8;
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb<u8>, alpha: f32) {
        let r2 = radius * radius;
        let (x0, x1) = ((cx - radius).floor() as i64, (cx + radius).ceil() as i64);
        let (y0, y1) = ((cy - radius).floor() as i64, (cy + radius).ceil() as i64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let (dx, dy) = (x as f32 - cx, y as f32 - cy);
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// Upward-pointing triangle centred on `(cx, cy)`.
    pub fn fill_triangle(&mut self, cx: f32, cy: f32, size: f32, color: Rgb<u8>, alpha: f32) {
        let top = cy - size;
        let bottom = cy + size;
        for y in top.floor() as i64..=bottom.ceil() as i64 {
            let progress = ((y as f32 - top) / (bottom - top)).clamp(0.0, 1.0);
            let half = size * progress;
            for x in (cx - half).floor() as i64..=(cx + half).ceil() as i64 {
                self.blend(x, y, color, alpha);
            }
        }
    }

    /// Two pixel wide line.
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb<u8>, pattern: LinePattern) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = (dx * dx + dy * dy).sqrt();
        let steps = length.ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let travelled = t * length;
            let gap = pattern
                .dash()
                .is_some_and(|(on, off)| travelled % (on + off) >= on);
            if gap {
                continue;
            }
            let x = (from.0 + dx * t).round() as i64;
            let y = (from.1 + dy * t).round() as i64;
            self.blend(x, y, color, 1.0);
            self.blend(x + 1, y, color, 1.0);
            self.blend(x, y + 1, color, 1.0);
        }
    }

    pub fn hline(&mut self, x0: f32, x1: f32, y: f32, color: Rgb<u8>) {
        let y = y.round() as i64;
        for x in x0.round() as i64..=x1.round() as i64 {
            self.blend(x, y, color, 1.0);
        }
    }

    pub fn vline(&mut self, x: f32, y0: f32, y1: f32, color: Rgb<u8>) {
        let x = x.round() as i64;
        for y in y0.round() as i64..=y1.round() as i64 {
            self.blend(x, y, color, 1.0);
        }
    }

    pub fn rect_outline(&mut self, left: f32, top: f32, right: f32, bottom: f32, color: Rgb<u8>) {
        self.hline(left, right, top, color);
        self.hline(left, right, bottom, color);
        self.vline(left, top, bottom, color);
        self.vline(right, top, bottom, color);
    }

    /// Draw `text` with its top-left corner at `(x, y)`; each font pixel
    /// becomes a `scale`×`scale` block.
    pub fn text(&mut self, x: f32, y: f32, text: &str, scale: u32, color: Rgb<u8>, alpha: f32) {
        let (x, y) = (x.round() as i64, y.round() as i64);
        let scale_i = i64::from(scale);
        for (i, c) in text.chars().enumerate() {
            let glyph = font::glyph(c);
            let origin = x + i as i64 * i64::from(font::ADVANCE) * scale_i;
            for gy in 0..font::GLYPH_HEIGHT {
                for gx in 0..font::GLYPH_WIDTH {
                    if !font::is_set(&glyph, gx, gy) {
                        continue;
                    }
                    for sy in 0..scale_i {
                        for sx in 0..scale_i {
                            self.blend(
                                origin + i64::from(gx) * scale_i + sx,
                                y + i64::from(gy) * scale_i + sy,
                                color,
                                alpha,
                            );
                        }
                    }
                }
            }
        }
    }

    pub fn text_width(text: &str, scale: u32) -> f32 {
        (font::text_width(text) * scale) as f32
    }

    pub fn text_height(scale: u32) -> f32 {
        (font::GLYPH_HEIGHT * scale) as f32
    }

    pub fn into_png(self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(self.image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blending_mixes_towards_color() {
        let mut canvas = Canvas::new(4, 4);
        canvas.blend(1, 1, BLACK, 0.5);
        assert_eq!(canvas.pixel(1, 1), Rgb([128, 128, 128]));
        canvas.blend(-1, 9, BLACK, 1.0);
        assert_eq!(canvas.pixel(0, 0), WHITE);
    }

    #[test]
    fn dotted_lines_leave_gaps() {
        let mut canvas = Canvas::new(60, 5);
        canvas.line((0.0, 2.0), (59.0, 2.0), BLACK, LinePattern::Dotted);
        let inked = (0..60).filter(|&x| canvas.pixel(x, 2) == BLACK).count();
        assert!(inked > 5);
        assert!(inked < 30);
    }

    #[test]
    fn text_draws_pixels() {
        let mut canvas = Canvas::new(20, 10);
        canvas.text(0.0, 0.0, "I", 1, BLACK, 1.0);
        assert_eq!(canvas.pixel(2, 3), BLACK);
        assert_eq!(canvas.pixel(0, 3), WHITE);
    }

    #[test]
    fn encodes_png() {
        let png = Canvas::new(8, 8).into_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
