use std::fmt;

use unicode_normalization::UnicodeNormalization;

use crate::SpriteError;

/// A vocabulary entry with its combining diacritics stripped.
///
/// The normalized text is both what gets drawn and what names the output
/// files, so it must be usable as a single path component.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
}

impl Word {
    pub fn new(raw: &str) -> Result<Self, SpriteError> {
        let text = strip_diacritics(raw);

        let invalid = text.is_empty()
            || text == "."
            || text == ".."
            || text.contains(|ch| matches!(ch, '/' | '\\' | '\0'));
        if invalid {
            return Err(SpriteError::InvalidWord(raw.to_owned()));
        }

        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.text.chars()
    }

    /// Upper-cased first character, used as the output shard directory.
    ///
    /// Not restricted to letters: `.NET` shards under `.`, which resolves to
    /// the output root itself.
    pub fn shard(&self) -> String {
        self.text.chars().next().map(|ch| ch.to_uppercase().collect()).unwrap_or_default()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Decompose to NFD and drop the combining diacritical marks block.
pub fn strip_diacritics(raw: &str) -> String {
    raw.nfd().filter(|ch| !('\u{0300}'..='\u{036f}').contains(ch)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_are_removed() {
        assert_eq!(Word::new("CAFÉ").unwrap().as_str(), "CAFE");
        assert_eq!(Word::new("Crème brûlée").unwrap().as_str(), "Creme brulee");
        assert_eq!(strip_diacritics("Ångström"), "Angstrom");
    }

    #[test]
    fn unaccented_text_is_untouched() {
        let word = Word::new("Go!").unwrap();
        assert_eq!(word.as_str(), "Go!");
        assert_eq!(word.to_string(), "Go!");
    }

    #[test]
    fn shard_is_uppercased_first_char() {
        assert_eq!(Word::new("go").unwrap().shard(), "G");
        assert_eq!(Word::new("éclair").unwrap().shard(), "E");
        assert_eq!(Word::new("42").unwrap().shard(), "4");
        assert_eq!(Word::new("ßig").unwrap().shard(), "SS");
        assert_eq!(Word::new(".NET").unwrap().shard(), ".");
    }

    #[test]
    fn rejects_words_that_are_not_path_components() {
        for raw in ["", "\u{0301}", ".", "..", "a/b", "a\\b"] {
            assert!(matches!(Word::new(raw), Err(SpriteError::InvalidWord(_))), "{raw:?}");
        }
        assert!(Word::new("...").is_ok());
    }
}
