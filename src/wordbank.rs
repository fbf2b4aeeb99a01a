use crate::debug_log;
use crate::error::WordBankError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

pub const MIN_WORD_LEN: usize = 5;
pub const MAX_WORD_LEN: usize = 12;

/// A usable secret: non-empty and lowercase ASCII letters only.
pub(crate) fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase())
}

fn normalize(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    is_valid_word(&word).then_some(word)
}

/// Parse a newline-delimited word list. Lines that are not a single word of
/// ASCII letters are skipped; everything is lowercased.
pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, WordBankError> {
    let path = path.as_ref();
    let unavailable = |source| WordBankError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(unavailable)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize(&line.map_err(unavailable)?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// The words a secret can be drawn from. Fixed once built.
#[derive(Debug, Clone)]
pub struct WordBank {
    words: Vec<String>,
    min_len: usize,
    max_len: usize,
}

impl WordBank {
    /// Keep the lowercase words whose length lies in `min_len..=max_len`.
    /// Anything else is dropped; use [`load_wordbank_from_str`] to normalize
    /// raw text first.
    pub fn new<I, S>(words: I, min_len: usize, max_len: usize) -> Result<Self, WordBankError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|w| is_valid_word(w) && (min_len..=max_len).contains(&w.len()))
            .collect();
        if words.is_empty() {
            return Err(WordBankError::EmptyBank {
                min: min_len,
                max: max_len,
            });
        }
        debug_log!(
            "WordBank::new() - {} words between {} and {} letters",
            words.len(),
            min_len,
            max_len
        );
        Ok(Self {
            words,
            min_len,
            max_len,
        })
    }

    pub fn load<P: AsRef<Path>>(
        path: P,
        min_len: usize,
        max_len: usize,
    ) -> Result<Self, WordBankError> {
        Self::new(load_wordbank_from_file(path)?, min_len, max_len)
    }

    /// The built-in list with the default length bounds.
    pub fn embedded() -> Result<Self, WordBankError> {
        Self::new(
            load_wordbank_from_str(EMBEDDED_WORDBANK),
            MIN_WORD_LEN,
            MAX_WORD_LEN,
        )
    }

    pub fn random_word(&self) -> Result<&str, WordBankError> {
        self.random_word_with(&mut rand::thread_rng())
    }

    pub fn random_word_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&str, WordBankError> {
        self.words
            .choose(rng)
            .map(String::as_str)
            .ok_or(WordBankError::EmptyBank {
                min: self.min_len,
                max: self.max_len,
            })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}
