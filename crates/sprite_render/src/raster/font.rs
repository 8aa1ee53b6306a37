use std::collections::HashMap;
use std::sync::Arc;

use crate::ConfigError;

/// Family name of the built-in small caps font.
pub const BUILTIN_FAMILY: &str = "SmallCaps";

/// One bitmap glyph, stored as rows of `#` (ink) and `.` (blank).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    rows: &'static [&'static str],
}

impl Glyph {
    pub const fn new(rows: &'static [&'static str]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &'static [&'static str] {
        self.rows
    }

    pub fn width(&self) -> u32 {
        self.rows.iter().map(|row| row.len()).max().unwrap_or(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }
}

/// A fixed-height bitmap font with case-folded lookup.
#[derive(Debug)]
pub struct BitmapFont {
    glyphs: HashMap<char, Glyph>,
    missing: Glyph,
}

impl BitmapFont {
    pub fn new(glyphs: impl IntoIterator<Item = (char, Glyph)>, missing: Glyph) -> Self {
        Self { glyphs: glyphs.into_iter().collect(), missing }
    }

    /// The 5px small caps font shipped with the crate.
    pub fn small_caps() -> Self {
        Self::new(SMALL_CAPS.iter().copied(), MISSING)
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch).or_else(|| {
            let mut upper = ch.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(upper), None) => self.glyphs.get(&upper),
                _ => None,
            }
        })
    }

    /// Glyph for `ch`, or the substitute box when the font lacks it.
    pub fn glyph_or_missing(&self, ch: char) -> &Glyph {
        self.glyph(ch).unwrap_or(&self.missing)
    }
}

/// Shared, read-only access to a registered font.
#[derive(Clone, Debug)]
pub struct FontHandle {
    family: Arc<str>,
    font: Arc<BitmapFont>,
}

impl FontHandle {
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn font(&self) -> &BitmapFont {
        &self.font
    }
}

/// Fonts available to the renderer, keyed by logical family name.
#[derive(Debug, Default)]
pub struct FontRegistry {
    fonts: HashMap<String, FontHandle>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in font under [`BUILTIN_FAMILY`].
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(BUILTIN_FAMILY, BitmapFont::small_caps());
        registry
    }

    /// Register `font` under `family`, replacing any previous entry.
    pub fn register(&mut self, family: &str, font: BitmapFont) -> FontHandle {
        let handle = FontHandle { family: Arc::from(family), font: Arc::new(font) };
        self.fonts.insert(family.to_owned(), handle.clone());
        handle
    }

    pub fn resolve(&self, family: &str) -> Result<FontHandle, ConfigError> {
        self.fonts.get(family).cloned().ok_or_else(|| ConfigError::FontNotFound(family.to_owned()))
    }
}

const MISSING: Glyph = Glyph::new(&["#####", "#...#", "#...#", "#...#", "#####"]);

#[rustfmt::skip]
const SMALL_CAPS: &[(char, Glyph)] = &[
    (' ', Glyph::new(&["..", "..", "..", "..", ".."])),
    ('A', Glyph::new(&[".###.", "#...#", "#####", "#...#", "#...#"])),
    ('B', Glyph::new(&["####.", "#...#", "####.", "#...#", "####."])),
    ('C', Glyph::new(&[".####", "#....", "#....", "#....", ".####"])),
    ('D', Glyph::new(&["####.", "#...#", "#...#", "#...#", "####."])),
    ('E', Glyph::new(&["#####", "#....", "####.", "#....", "#####"])),
    ('F', Glyph::new(&["#####", "#....", "####.", "#....", "#...."])),
    ('G', Glyph::new(&[".####", "#....", "#..##", "#...#", ".####"])),
    ('H', Glyph::new(&["#...#", "#...#", "#####", "#...#", "#...#"])),
    ('I', Glyph::new(&["###", ".#.", ".#.", ".#.", "###"])),
    ('J', Glyph::new(&["....#", "....#", "....#", "#...#", ".###."])),
    ('K', Glyph::new(&["#...#", "#..#.", "###..", "#..#.", "#...#"])),
    ('L', Glyph::new(&["#....", "#....", "#....", "#....", "#####"])),
    ('M', Glyph::new(&["#...#", "##.##", "#.#.#", "#...#", "#...#"])),
    ('N', Glyph::new(&["#...#", "##..#", "#.#.#", "#..##", "#...#"])),
    ('O', Glyph::new(&[".###.", "#...#", "#...#", "#...#", ".###."])),
    ('P', Glyph::new(&["####.", "#...#", "####.", "#....", "#...."])),
    ('Q', Glyph::new(&[".###.", "#...#", "#...#", "#..#.", ".##.#"])),
    ('R', Glyph::new(&["####.", "#...#", "####.", "#..#.", "#...#"])),
    ('S', Glyph::new(&[".####", "#....", ".###.", "....#", "####."])),
    ('T', Glyph::new(&["#####", "..#..", "..#..", "..#..", "..#.."])),
    ('U', Glyph::new(&["#...#", "#...#", "#...#", "#...#", ".###."])),
    ('V', Glyph::new(&["#...#", "#...#", "#...#", ".#.#.", "..#.."])),
    ('W', Glyph::new(&["#...#", "#...#", "#.#.#", "##.##", "#...#"])),
    ('X', Glyph::new(&["#...#", ".#.#.", "..#..", ".#.#.", "#...#"])),
    ('Y', Glyph::new(&["#...#", ".#.#.", "..#..", "..#..", "..#.."])),
    ('Z', Glyph::new(&["#####", "...#.", "..#..", ".#...", "#####"])),
    ('0', Glyph::new(&[".###.", "#..##", "#.#.#", "##..#", ".###."])),
    ('1', Glyph::new(&["..#..", ".##..", "..#..", "..#..", ".###."])),
    ('2', Glyph::new(&[".###.", "#...#", "..##.", ".#...", "#####"])),
    ('3', Glyph::new(&["####.", "....#", ".###.", "....#", "####."])),
    ('4', Glyph::new(&["#..#.", "#..#.", "#####", "...#.", "...#."])),
    ('5', Glyph::new(&["#####", "#....", "####.", "....#", "####."])),
    ('6', Glyph::new(&[".###.", "#....", "####.", "#...#", ".###."])),
    ('7', Glyph::new(&["#####", "....#", "...#.", "..#..", "..#.."])),
    ('8', Glyph::new(&[".###.", "#...#", ".###.", "#...#", ".###."])),
    ('9', Glyph::new(&[".###.", "#...#", ".####", "....#", ".###."])),
    ('!', Glyph::new(&["#", "#", "#", ".", "#"])),
    ('?', Glyph::new(&[".###.", "#...#", "..##.", ".....", "..#.."])),
    ('.', Glyph::new(&[".", ".", ".", ".", "#"])),
    (',', Glyph::new(&[".", ".", ".", "#", "#"])),
    ('"', Glyph::new(&["#.#", "#.#", "...", "...", "..."])),
    (':', Glyph::new(&[".", "#", ".", "#", "."])),
    (';', Glyph::new(&[".", "#", ".", "#", "#"])),
    ('(', Glyph::new(&[".#", "#.", "#.", "#.", ".#"])),
    (')', Glyph::new(&["#.", ".#", ".#", ".#", "#."])),
    ('[', Glyph::new(&["##", "#.", "#.", "#.", "##"])),
    (']', Glyph::new(&["##", ".#", ".#", ".#", "##"])),
    ('{', Glyph::new(&[".#", ".#", "#.", ".#", ".#"])),
    ('}', Glyph::new(&["#.", "#.", ".#", "#.", "#."])),
    ('<', Glyph::new(&["..#", ".#.", "#..", ".#.", "..#"])),
    ('>', Glyph::new(&["#..", ".#.", "..#", ".#.", "#.."])),
    ('+', Glyph::new(&[".....", "..#..", "#####", "..#..", "....."])),
    ('-', Glyph::new(&[".....", ".....", "#####", ".....", "....."])),
    ('*', Glyph::new(&[".....", "#.#.#", ".###.", "#.#.#", "....."])),
    ('/', Glyph::new(&["....#", "...#.", "..#..", ".#...", "#...."])),
];
