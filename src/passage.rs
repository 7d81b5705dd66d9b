use rand::seq::SliceRandom;
use rand::Rng;

use crate::words::WordList;

pub const DEFAULT_PASSAGE_WORDS: usize = 100;

/// The target words for one session. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passage {
    words: Vec<String>,
}

impl Passage {
    /// Draw `count` words uniformly from `list`, with replacement.
    pub fn generate<R: Rng + ?Sized>(list: &WordList, count: usize, rng: &mut R) -> Self {
        let words = (0..count)
            .filter_map(|_| list.words.choose(&mut *rng).cloned())
            .collect();

        Self { words }
    }

    /// A fixed passage from user supplied text, split on whitespace.
    pub fn from_text(text: &str) -> Self {
        Self {
            words: text.split_whitespace().map(String::from).collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word(&self, idx: usize) -> Option<&str> {
        self.words.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}
