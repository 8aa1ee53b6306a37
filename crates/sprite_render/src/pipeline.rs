use std::path::PathBuf;

use log::{debug, info, warn};

use crate::color::palette::{ColorPair, Palette, PaletteSpec};
use crate::output::sink::{FsSink, SpriteSink, DEFAULT_OUTPUT_ROOT};
use crate::raster::font::{FontRegistry, BUILTIN_FAMILY};
use crate::raster::sprite::SpriteRenderer;
use crate::text::layout::TextLayout;
use crate::text::word::Word;
use crate::{ConfigError, SpriteError};

/// Everything a batch run depends on, passed in explicitly.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub font_family: String,
    pub output_root: PathBuf,
    pub palette: PaletteSpec,
    /// Leave sprites that already exist on disk untouched.
    pub skip_existing: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            font_family: BUILTIN_FAMILY.to_owned(),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            palette: PaletteSpec::default(),
            skip_existing: false,
        }
    }
}

impl PipelineConfig {
    pub fn sink(&self) -> FsSink {
        FsSink::new(&self.output_root)
    }
}

/// Progress callbacks for a batch run.
pub trait BatchObserver {
    fn sprite_finished(&mut self, _word: &Word, _colors: &ColorPair) {}

    fn word_finished(&mut self, _word: &Word) {}
}

impl BatchObserver for () {}

#[derive(Debug)]
pub struct SpriteFailure {
    pub word: String,
    pub index: usize,
    pub error: SpriteError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub words: usize,
    pub written: usize,
    pub skipped: usize,
    pub rejected: Vec<SpriteError>,
    pub failures: Vec<SpriteFailure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.failures.is_empty()
    }
}

/// Renders every word in every palette color.
#[derive(Debug)]
pub struct BatchPipeline {
    renderer: SpriteRenderer,
    palette: Palette,
    skip_existing: bool,
}

impl BatchPipeline {
    /// Resolve the font and build the palette. Fails before any rendering.
    pub fn new(config: &PipelineConfig, fonts: &FontRegistry) -> Result<Self, ConfigError> {
        let font = fonts.resolve(&config.font_family)?;
        let palette = config.palette.generate()?;
        debug!("palette has {} colors, font {}", palette.len(), font.family());

        Ok(Self { renderer: SpriteRenderer::new(font), palette, skip_existing: config.skip_existing })
    }

    /// Number of sprites a run over `words` accepted words produces.
    pub fn sprite_count(&self, words: usize) -> usize {
        words * self.palette.len()
    }

    /// Normalize raw vocabulary entries, splitting off those that can't be
    /// used as words.
    pub fn prepare_words<S: AsRef<str>>(raw: &[S]) -> (Vec<Word>, Vec<SpriteError>) {
        let mut words = Vec::with_capacity(raw.len());
        let mut rejected = Vec::new();
        for entry in raw {
            match Word::new(entry.as_ref()) {
                Ok(word) => words.push(word),
                Err(err) => {
                    warn!("skipping vocabulary entry: {err}");
                    rejected.push(err);
                },
            }
        }
        (words, rejected)
    }

    /// Normalize `raw_words`, then render and write all sprites.
    pub fn run<S, W, O>(&self, raw_words: &[W], sink: &mut S, observer: &mut O) -> BatchReport
    where
        S: SpriteSink,
        W: AsRef<str>,
        O: BatchObserver,
    {
        let (words, rejected) = Self::prepare_words(raw_words);
        BatchReport { rejected, ..self.run_words(&words, sink, observer) }
    }

    /// Render and write all sprites of already normalized words. Per-sprite
    /// failures are logged and collected in the report; they never stop the
    /// run.
    pub fn run_words<S, O>(&self, words: &[Word], sink: &mut S, observer: &mut O) -> BatchReport
    where
        S: SpriteSink,
        O: BatchObserver,
    {
        let mut report = BatchReport { words: words.len(), ..Default::default() };

        for word in words {
            let layout = TextLayout::new(word);

            for colors in &self.palette {
                if self.skip_existing && sink.exists(word, colors.index) {
                    report.skipped += 1;
                } else {
                    let result = self
                        .renderer
                        .render(&layout, colors)
                        .and_then(|bytes| sink.write(word, colors.index, &bytes));
                    match result {
                        Ok(()) => report.written += 1,
                        Err(error) => {
                            warn!("failed to write sprite {word}-{}: {error}", colors.index);
                            report.failures.push(SpriteFailure {
                                word: word.to_string(),
                                index: colors.index,
                                error,
                            });
                        },
                    }
                }
                observer.sprite_finished(word, colors);
            }

            info!("generated sprites for {word}");
            observer.word_finished(word);
        }

        report
    }
}
