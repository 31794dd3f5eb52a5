use crate::debug_log;
use crate::session::SecretWord;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Errors that prevent a round from ever starting.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum WordListError {
    #[display("could not read word list: {}", _0)]
    Io(io::Error),

    #[display("word list contains no usable words")]
    #[from(skip)]
    EmptySource,
}

impl std::error::Error for WordListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::EmptySource => None,
        }
    }
}

/// Normalizes one raw line. Returns `None` for entries that could never be
/// played: blank lines, single characters, and anything but `a-z` and spaces.
fn normalize_word(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    if SecretWord::new(&word).is_ok() {
        Some(word)
    } else {
        if !word.is_empty() {
            debug_log!("normalize_word() - skipping unusable entry '{}'", word);
        }
        None
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize_word).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_word(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Picks one word uniformly at random.
pub fn pick_word<'a, T, R: Rng + ?Sized>(
    words: &'a [T],
    rng: &mut R,
) -> Result<&'a T, WordListError> {
    words.choose(rng).ok_or(WordListError::EmptySource)
}

/// The non-empty pool of secret words shared by every round.
#[derive(Debug, Clone)]
pub struct WordSource {
    words: Vec<SecretWord>,
}

impl WordSource {
    /// Wraps an already-normalized word list. Entries that are not valid secret
    /// words are dropped; an empty result is an error.
    pub fn new(words: Vec<String>) -> Result<Self, WordListError> {
        let words: Vec<SecretWord> = words
            .iter()
            .filter_map(|w| SecretWord::new(w).ok())
            .collect();
        if words.is_empty() {
            return Err(WordListError::EmptySource);
        }
        Ok(Self { words })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WordListError> {
        Self::new(load_wordbank_from_file(path)?)
    }

    pub fn words(&self) -> &[SecretWord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SecretWord, WordListError> {
        pick_word(&self.words, rng).cloned()
    }
}
