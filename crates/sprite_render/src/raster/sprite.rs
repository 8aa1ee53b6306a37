use std::io::Cursor;

use image::{ImageOutputFormat, RgbaImage};

use super::canvas::{Canvas, PixelCanvas, Rect};
use super::font::FontHandle;
use crate::color::palette::ColorPair;
use crate::color::space::Rgb;
use crate::text::layout::{GlyphPlacement, TextLayout};
use crate::SpriteError;

/// Width of the border stroke, centered on the canvas edge.
pub const BORDER_WIDTH: u32 = 2;
/// Color of the foreground glyph pass.
pub const FOREGROUND: Rgb = Rgb::WHITE;

/// Composites label sprites with a registered font.
#[derive(Clone, Debug)]
pub struct SpriteRenderer {
    font: FontHandle,
}

impl SpriteRenderer {
    pub fn new(font: FontHandle) -> Self {
        Self { font }
    }

    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    /// Draw one sprite onto `canvas`, which must match the layout geometry.
    pub fn render_canvas<C: Canvas>(
        &self,
        canvas: &mut C,
        layout: &TextLayout,
        colors: &ColorPair,
    ) {
        let geometry = layout.geometry;
        debug_assert_eq!(canvas.dimensions(), (geometry.width, geometry.height));

        let main = colors.main.to_rgb();
        let shadow = colors.shadow.to_rgb();
        let bounds = Rect::new(0, 0, geometry.width, geometry.height);

        canvas.fill_rect(bounds, main);
        canvas.stroke_rect(bounds, BORDER_WIDTH, shadow);
        self.draw_pass(canvas, &layout.shadow_pass, geometry.baseline(), shadow);
        self.draw_pass(canvas, &layout.foreground_pass, geometry.baseline(), FOREGROUND);
    }

    pub fn render_image(&self, layout: &TextLayout, colors: &ColorPair) -> RgbaImage {
        let mut canvas = PixelCanvas::new(layout.geometry.width, layout.geometry.height);
        self.render_canvas(&mut canvas, layout, colors);
        canvas.into_image()
    }

    /// Render and encode one sprite as PNG.
    pub fn render(&self, layout: &TextLayout, colors: &ColorPair) -> Result<Vec<u8>, SpriteError> {
        let image = self.render_image(layout, colors);
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageOutputFormat::Png)?;
        Ok(bytes.into_inner())
    }

    fn draw_pass<C: Canvas>(
        &self,
        canvas: &mut C,
        placements: &[GlyphPlacement],
        baseline: u32,
        color: Rgb,
    ) {
        let font = self.font.font();
        for placement in placements {
            canvas.draw_glyph(font.glyph_or_missing(placement.ch), placement.x, baseline, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use image::GenericImageView;

    use super::*;
    use crate::color::palette::{ColorModel, PaletteSpec};
    use crate::raster::font::{FontRegistry, Glyph, BUILTIN_FAMILY};
    use crate::text::word::Word;

    #[derive(Debug, PartialEq)]
    enum Op {
        Fill(Rect, Rgb),
        Stroke(Rect, u32, Rgb),
        Glyph(u32, u32, u32, Rgb),
    }

    struct Recorder {
        size: (u32, u32),
        ops: Vec<Op>,
    }

    impl Canvas for Recorder {
        fn dimensions(&self) -> (u32, u32) {
            self.size
        }

        fn fill_rect(&mut self, rect: Rect, color: Rgb) {
            self.ops.push(Op::Fill(rect, color));
        }

        fn stroke_rect(&mut self, rect: Rect, line_width: u32, color: Rgb) {
            self.ops.push(Op::Stroke(rect, line_width, color));
        }

        fn draw_glyph(&mut self, glyph: &Glyph, x: u32, baseline: u32, color: Rgb) {
            self.ops.push(Op::Glyph(glyph.width(), x, baseline, color));
        }
    }

    fn fixture(raw: &str) -> (SpriteRenderer, TextLayout, ColorPair) {
        let font = FontRegistry::with_builtin().resolve(BUILTIN_FAMILY).unwrap();
        let palette = PaletteSpec::new(1, ColorModel::Hsl).generate().unwrap();
        let layout = TextLayout::new(&Word::new(raw).unwrap());
        (SpriteRenderer::new(font), layout, palette.pairs()[0])
    }

    #[test]
    fn draw_order() {
        let (renderer, layout, colors) = fixture("Go");
        let mut canvas = Recorder { size: (16, 9), ops: Vec::new() };
        renderer.render_canvas(&mut canvas, &layout, &colors);

        let main = Rgb::new(255, 0, 0);
        let shadow = Rgb::new(153, 0, 0);
        let bounds = Rect::new(0, 0, 16, 9);
        assert_eq!(canvas.ops, [
            Op::Fill(bounds, main),
            Op::Stroke(bounds, 2, shadow),
            Op::Glyph(5, 2, 7, shadow),
            Op::Glyph(5, 8, 7, shadow),
            Op::Glyph(5, 3, 7, FOREGROUND),
            Op::Glyph(5, 9, 7, FOREGROUND),
        ]);
    }

    #[test]
    fn pixels_show_border_shadow_and_foreground() {
        let (renderer, layout, colors) = fixture("I");
        let image = renderer.render_image(&layout, &colors);
        assert_eq!(image.dimensions(), (8, 9));

        let main = colors.main.to_rgb().to_rgba();
        let shadow = colors.shadow.to_rgb().to_rgba();
        let white = FOREGROUND.to_rgba();

        assert_eq!(*image.get_pixel(0, 0), shadow);
        assert_eq!(*image.get_pixel(7, 8), shadow);
        assert_eq!(*image.get_pixel(1, 1), main);
        // Top bar of "I": shadow pass covers x 2..=4, foreground x 3..=5.
        assert_eq!(*image.get_pixel(2, 2), shadow);
        assert_eq!(*image.get_pixel(3, 2), white);
        assert_eq!(*image.get_pixel(5, 2), white);
        // Stem: the shadow shows one pixel left of the foreground.
        assert_eq!(*image.get_pixel(3, 3), shadow);
        assert_eq!(*image.get_pixel(4, 3), white);
        assert_eq!(*image.get_pixel(6, 3), main);
    }

    #[test]
    fn encodes_png() {
        let (renderer, layout, colors) = fixture("A!");
        let bytes = renderer.render(&layout, &colors).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (12, 9));
        assert_eq!(decoded.to_rgba8(), renderer.render_image(&layout, &colors));
    }
}
