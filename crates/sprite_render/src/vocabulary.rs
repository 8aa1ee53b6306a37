use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Word list read from a YAML document with a top-level `words` key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Vocabulary {
    pub words: Vec<String>,
}

impl Vocabulary {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_word_list() {
        let vocabulary = Vocabulary::from_yaml_str("words:\n  - Go\n  - CAFÉ\n  - 'A!'\n").unwrap();
        assert_eq!(vocabulary.words, ["Go", "CAFÉ", "A!"]);
    }

    #[test]
    fn extra_keys_are_ignored() {
        let vocabulary = Vocabulary::from_yaml_str("title: demo\nwords: [one]\n").unwrap();
        assert_eq!(vocabulary.len(), 1);
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = Vocabulary::from_yaml_str("verbs: [run]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)), "{err}");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(Vocabulary::from_yaml_str("words: [unterminated\n").is_err());
        assert!(Vocabulary::from_yaml_str("words: 12\n").is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Vocabulary::load(dir.path().join("words.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "{err}");
    }
}
