use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::text::word::Word;
use crate::SpriteError;

/// Default directory all sprites are written under.
pub const DEFAULT_OUTPUT_ROOT: &str = "generated";

/// Destination for encoded sprites.
pub trait SpriteSink {
    /// Persist `bytes` as the sprite of `word` with the 1-based `index`.
    fn write(&mut self, word: &Word, index: usize, bytes: &[u8]) -> Result<(), SpriteError>;

    /// Whether the sprite already exists and may be skipped.
    fn exists(&self, _word: &Word, _index: usize) -> bool {
        false
    }
}

/// `<root>/<FIRST>/<word>/<word>-<index>.png`
pub fn sprite_path(root: &Path, word: &Word, index: usize) -> PathBuf {
    root.join(word.shard()).join(word.as_str()).join(format!("{word}-{index}.png"))
}

/// Writes sprites to the sharded directory layout on disk.
#[derive(Clone, Debug)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for FsSink {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_ROOT)
    }
}

impl SpriteSink for FsSink {
    fn write(&mut self, word: &Word, index: usize, bytes: &[u8]) -> Result<(), SpriteError> {
        let path = sprite_path(&self.root, word, index);
        let io_error = |source| SpriteError::Io { path: path.clone(), source };

        let directory = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(directory).map_err(io_error)?;

        // Staged in the target directory so the rename stays on one filesystem.
        let mut staged = NamedTempFile::new_in(directory).map_err(io_error)?;
        staged.write_all(bytes).map_err(io_error)?;
        staged.persist(&path).map_err(|err| io_error(err.error))?;

        debug!("wrote {}", path.display());
        Ok(())
    }

    fn exists(&self, word: &Word, index: usize) -> bool {
        sprite_path(&self.root, word, index).is_file()
    }
}
