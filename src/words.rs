use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

pub const DEFAULT_WORD_LIST: &str = "english";

/// Errors that can occur while loading a word list.
#[derive(Debug, Error)]
pub enum WordListError {
    /// The word list file could not be read.
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The contents are not a `{"words": [...]}` document.
    #[error("invalid word list: {0}")]
    Parse(#[from] serde_json::Error),

    /// The list parsed but has no usable words.
    #[error("word list contains no words")]
    Empty,

    /// No word list with this name is bundled.
    #[error("unknown bundled word list: {0}")]
    UnknownEmbedded(String),
}

pub type Result<T> = std::result::Result<T, WordListError>;

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct WordList {
    #[serde(default)]
    pub name: Option<String>,
    pub words: Vec<String>,
}

impl WordList {
    /// Load one of the word lists compiled into the binary.
    pub fn embedded(name: &str) -> Result<Self> {
        let file = LANG_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| WordListError::UnknownEmbedded(name.to_string()))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| WordListError::UnknownEmbedded(name.to_string()))?;

        Self::from_json(contents)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut list: WordList = serde_json::from_str(json)?;

        list.words = list
            .words
            .iter()
            .flat_map(|w| w.split_whitespace())
            .map(String::from)
            .collect();

        if list.words.is_empty() {
            return Err(WordListError::Empty);
        }

        Ok(list)
    }

    /// Either the file at `path` or the bundled default list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::embedded(DEFAULT_WORD_LIST),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
