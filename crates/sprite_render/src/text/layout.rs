use super::metrics::{text_width, width_of};
use super::word::Word;

/// Fixed sprite height in pixels.
pub const SPRITE_HEIGHT: u32 = 9;
/// Horizontal pixels reserved around the text for border and shadow.
pub const MARGIN: u32 = 4;
/// X offset of the first glyph of the shadow pass.
pub const SHADOW_ORIGIN: u32 = 2;
/// X offset of the first glyph of the foreground pass.
pub const FOREGROUND_ORIGIN: u32 = SHADOW_ORIGIN + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteGeometry {
    pub width: u32,
    pub height: u32,
}

impl SpriteGeometry {
    pub fn for_text_width(total_width: u32) -> Self {
        Self { width: MARGIN + total_width, height: SPRITE_HEIGHT }
    }

    /// Y coordinate shared by both glyph passes.
    pub fn baseline(&self) -> u32 {
        self.height - 2
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphPlacement {
    pub ch: char,
    pub x: u32,
}

/// Glyph positions of a word for the shadow and foreground passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLayout {
    pub total_width: u32,
    pub geometry: SpriteGeometry,
    pub shadow_pass: Vec<GlyphPlacement>,
    pub foreground_pass: Vec<GlyphPlacement>,
}

impl TextLayout {
    pub fn new(word: &Word) -> Self {
        let shadow_pass = place(word, SHADOW_ORIGIN);
        let foreground_pass = place(word, FOREGROUND_ORIGIN);
        let total_width = text_width(word.as_str());

        Self {
            total_width,
            geometry: SpriteGeometry::for_text_width(total_width),
            shadow_pass,
            foreground_pass,
        }
    }
}

fn place(word: &Word, origin: u32) -> Vec<GlyphPlacement> {
    let mut x = origin;
    word.chars()
        .map(|ch| {
            let placement = GlyphPlacement { ch, x };
            x += width_of(ch);
            placement
        })
        .collect()
}
