mod color;
mod output;
mod pipeline;
mod raster;
mod text;
mod vocabulary;

use std::path::PathBuf;

pub use color::{
    palette::{ColorModel, ColorPair, LightnessTier, Palette, PaletteSpec},
    space::{Color, Rgb},
};
pub use output::sink::{sprite_path, FsSink, SpriteSink, DEFAULT_OUTPUT_ROOT};
pub use pipeline::{BatchObserver, BatchPipeline, BatchReport, PipelineConfig, SpriteFailure};
pub use raster::{
    canvas::{Canvas, PixelCanvas, Rect},
    font::{BitmapFont, FontHandle, FontRegistry, Glyph, BUILTIN_FAMILY},
    sprite::{SpriteRenderer, BORDER_WIDTH, FOREGROUND},
};
pub use text::{
    layout::{GlyphPlacement, SpriteGeometry, TextLayout, SPRITE_HEIGHT},
    metrics::{is_mapped, text_width, width_of, DEFAULT_ADVANCE},
    word::{strip_diacritics, Word},
};
pub use vocabulary::Vocabulary;

/// Problems with the run's inputs. Any of these aborts before rendering.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed vocabulary: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("font family {0:?} is not registered")]
    FontNotFound(String),
    #[error("invalid palette: {0}")]
    InvalidPalette(String),
}

/// Problems producing a single sprite.
#[derive(Debug, thiserror::Error)]
pub enum SpriteError {
    #[error("{0:?} cannot be used as a sprite name")]
    InvalidWord(String),
    #[error("failed to encode sprite: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
