use itertools::{EitherOrBoth, Itertools};

/// Display class of a single passage word
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum WordClass {
    Correct,
    Incorrect,
    Current,
}

/// Everything derived from (passage, input) at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub typed_words: usize,
    pub current_word_index: usize,
    pub correct_words: usize,
    pub mistakes: usize,
    pub total_typed: usize,
    pub accuracy: u8,
}

impl Score {
    pub fn compute(target: &[String], input: &str) -> Self {
        let mistakes = count_mistakes(target, input);
        let total_typed = input.chars().count();

        Self {
            typed_words: typed_words(input).len(),
            current_word_index: current_word_index(input, target.len()),
            correct_words: correct_words(target, input),
            mistakes,
            total_typed,
            accuracy: accuracy(total_typed, mistakes),
        }
    }
}

/// Words the user has typed so far; runs of spaces never produce empty words.
pub fn typed_words(input: &str) -> Vec<&str> {
    input.split(' ').filter(|w| !w.is_empty()).collect()
}

pub fn current_word_index(input: &str, passage_len: usize) -> usize {
    input.matches(' ').count().min(passage_len)
}

pub fn correct_words(target: &[String], input: &str) -> usize {
    typed_words(input)
        .into_iter()
        .zip(target)
        .filter(|(typed, expected)| *typed == expected.as_str())
        .count()
}

/// Hamming-style distance between two words: differing chars on the shared
/// prefix plus the length difference. Not an edit distance.
pub fn word_mistakes(typed: &str, expected: &str) -> usize {
    typed
        .chars()
        .zip_longest(expected.chars())
        .filter(|pair| match pair {
            EitherOrBoth::Both(a, b) => a != b,
            EitherOrBoth::Left(_) | EitherOrBoth::Right(_) => true,
        })
        .count()
}

/// Mistakes across the whole input, aligned word by word against the target.
///
/// The input is split on every space without dropping empty pieces, so a
/// trailing space pairs an empty word with the next target word.
pub fn count_mistakes(target: &[String], input: &str) -> usize {
    input
        .split(' ')
        .zip(target)
        .map(|(typed, expected)| word_mistakes(typed, expected))
        .sum()
}

/// Percentage of typed chars that were not mistakes, in [0, 100].
pub fn accuracy(total_typed: usize, mistakes: usize) -> u8 {
    if total_typed == 0 {
        return 100;
    }

    let good = total_typed.saturating_sub(mistakes) as f64;
    ((good / total_typed as f64) * 100.0).round() as u8
}

pub fn word_class(target: &[String], input: &str, word_index: usize) -> Option<WordClass> {
    let typed = typed_words(input);

    if let Some(word) = typed.get(word_index) {
        return match target.get(word_index) {
            Some(expected) if expected == word => Some(WordClass::Correct),
            _ => Some(WordClass::Incorrect),
        };
    }

    if word_index == current_word_index(input, target.len()) {
        return Some(WordClass::Current);
    }

    None
}

/// Classes for every passage word, in order.
pub fn word_classes(target: &[String], input: &str) -> Vec<Option<WordClass>> {
    let typed = typed_words(input);
    let current = current_word_index(input, target.len());

    target
        .iter()
        .enumerate()
        .map(|(idx, expected)| match typed.get(idx) {
            Some(word) if *word == expected.as_str() => Some(WordClass::Correct),
            Some(_) => Some(WordClass::Incorrect),
            None if idx == current => Some(WordClass::Current),
            None => None,
        })
        .collect()
}

/// Correct words per minute of elapsed time.
pub fn wpm(correct_words: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }

    (correct_words as f64 * 60.0 / elapsed_secs).round()
}
