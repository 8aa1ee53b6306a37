use image::RgbaImage;

use super::font::Glyph;
use crate::color::space::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Drawing operations the sprite renderer needs from a raster backend.
pub trait Canvas {
    fn dimensions(&self) -> (u32, u32);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Stroke the outline of `rect` with a line centered on its edges.
    fn stroke_rect(&mut self, rect: Rect, line_width: u32, color: Rgb);

    /// Draw `glyph` with its left edge at `x` and its last row just above
    /// `baseline`.
    fn draw_glyph(&mut self, glyph: &Glyph, x: u32, baseline: u32, color: Rgb);
}

/// Canvas backed by an RGBA pixel buffer. Drawing is clipped to the buffer.
pub struct PixelCanvas {
    image: RgbaImage,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height) }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn put(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color.to_rgba());
        }
    }
}

impl Canvas for PixelCanvas {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let x_end = rect.x.saturating_add(rect.width).min(self.image.width());
        let y_end = rect.y.saturating_add(rect.height).min(self.image.height());
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                self.put(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, line_width: u32, color: Rgb) {
        if line_width == 0 {
            return;
        }

        // Work in doubled coordinates so pixel centers and half-width line
        // edges are integers.
        let center = |p: u32| i64::from(p) * 2 + 1;
        let half = i64::from(line_width);
        let (left, top) = (i64::from(rect.x) * 2, i64::from(rect.y) * 2);
        let right = i64::from(rect.x.saturating_add(rect.width)) * 2;
        let bottom = i64::from(rect.y.saturating_add(rect.height)) * 2;

        let (width, height) = self.image.dimensions();
        for y in 0..height {
            for x in 0..width {
                let (cx, cy) = (center(x), center(y));
                let in_outer = cx > left - half
                    && cx < right + half
                    && cy > top - half
                    && cy < bottom + half;
                let in_inner = cx > left + half
                    && cx < right - half
                    && cy > top + half
                    && cy < bottom - half;
                if in_outer && !in_inner {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn draw_glyph(&mut self, glyph: &Glyph, x: u32, baseline: u32, color: Rgb) {
        let Some(top) = baseline.checked_sub(glyph.height()) else {
            return;
        };

        for (row, line) in glyph.rows().iter().enumerate() {
            for (column, bit) in line.bytes().enumerate() {
                if bit == b'#' {
                    self.put(x + column as u32, top + row as u32, color);
                }
            }
        }
    }
}
