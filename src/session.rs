//! Round state machine.
//!
//! A [`GameSession`] owns one round of play: the secret word and the letters
//! guessed so far. The outcome of a round is never stored; it is recomputed from
//! the secret word and the guess history every time it is asked for.

use crate::debug_log;
use std::collections::BTreeSet;
use std::fmt;

/// Number of wrong guesses that ends a round.
pub const GUESS_BUDGET: usize = 6;

/// Character shown in place of a letter that has not been guessed yet.
pub const MASK_CHAR: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GameOutcome {
    #[display("in progress")]
    InProgress,
    #[display("won")]
    Won,
    #[display("lost")]
    Lost,
}

impl GameOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Contract breaches between the I/O shell and the state machine.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    #[display("Secret word '{}' must be at least 2 characters long", _0)]
    WordTooShort(String),

    #[display("Secret word '{}' contains '{}' (only a-z and spaces are allowed)", _0, _1)]
    InvalidCharacter(String, char),

    #[display("Secret word '{}' has no letters to guess", _0)]
    NoGuessableLetters(String),

    /// A guess arrived after the round reached a terminal state.
    #[display("The round is already over ({})", _0)]
    RoundOver(GameOutcome),

    /// A guess repeated a letter that should have been rejected by validation.
    #[display("Letter '{}' was already guessed", _0)]
    AlreadyGuessed(char),

    #[display("'{}' is not a lowercase letter", _0)]
    NotALetter(char),
}

impl std::error::Error for SessionError {}

/// The word being guessed. Always lowercase, at least two characters long, and
/// made of `a-z` and spaces with at least one letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretWord(String);

impl SecretWord {
    pub fn new(word: &str) -> Result<Self, SessionError> {
        if word.chars().count() < 2 {
            return Err(SessionError::WordTooShort(word.to_string()));
        }
        if let Some(c) = word.chars().find(|&c| !(c.is_ascii_lowercase() || c == ' ')) {
            return Err(SessionError::InvalidCharacter(word.to_string(), c));
        }
        if !word.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(SessionError::NoGuessableLetters(word.to_string()));
        }
        Ok(Self(word.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains(&self, letter: char) -> bool {
        letter != ' ' && self.0.contains(letter)
    }

    /// Characters that must be guessed (everything except spaces).
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().filter(|&c| c != ' ')
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Letters guessed during a round, split by whether they were in the word.
///
/// The two sets are disjoint and only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessHistory {
    missed: BTreeSet<char>,
    correct: BTreeSet<char>,
}

impl GuessHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missed(&self) -> &BTreeSet<char> {
        &self.missed
    }

    pub fn correct(&self) -> &BTreeSet<char> {
        &self.correct
    }

    pub fn contains(&self, letter: char) -> bool {
        self.missed.contains(&letter) || self.correct.contains(&letter)
    }

    /// Number of distinct letters guessed so far.
    pub fn len(&self) -> usize {
        self.missed.len() + self.correct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missed.is_empty() && self.correct.is_empty()
    }

    fn record(&mut self, letter: char, hit: bool) {
        if hit {
            self.correct.insert(letter);
        } else {
            self.missed.insert(letter);
        }
    }
}

/// Masks every letter of `secret` that is not in `correct`. Spaces pass through.
pub fn revealed_pattern(secret: &SecretWord, correct: &BTreeSet<char>) -> String {
    secret
        .as_str()
        .chars()
        .map(|c| {
            if c == ' ' || correct.contains(&c) {
                c
            } else {
                MASK_CHAR
            }
        })
        .collect()
}

pub fn is_won(secret: &SecretWord, history: &GuessHistory) -> bool {
    secret.letters().all(|c| history.correct.contains(&c))
}

pub fn is_lost(history: &GuessHistory) -> bool {
    history.missed.len() >= GUESS_BUDGET
}

/// Derives the round outcome. A completed word takes precedence, but the
/// session never lets both conditions hold at once.
pub fn outcome(secret: &SecretWord, history: &GuessHistory) -> GameOutcome {
    if is_won(secret, history) {
        GameOutcome::Won
    } else if is_lost(history) {
        GameOutcome::Lost
    } else {
        GameOutcome::InProgress
    }
}

/// End-of-round report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub outcome: GameOutcome,
    pub secret: String,
    pub correct_guesses: usize,
    pub missed_guesses: usize,
}

/// What changed after one accepted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub letter: char,
    pub hit: bool,
    pub outcome: GameOutcome,
    pub pattern: String,
    pub missed_count: usize,
    /// Present only when the guess ended the round.
    pub summary: Option<RoundSummary>,
}

/// One round of play.
#[derive(Debug, Clone)]
pub struct GameSession {
    secret: SecretWord,
    history: GuessHistory,
}

impl GameSession {
    pub fn new(secret: SecretWord) -> Self {
        debug_log!("GameSession::new() - {} letters", secret.letters().count());
        Self {
            secret,
            history: GuessHistory::new(),
        }
    }

    pub fn secret(&self) -> &SecretWord {
        &self.secret
    }

    pub fn history(&self) -> &GuessHistory {
        &self.history
    }

    pub fn outcome(&self) -> GameOutcome {
        outcome(&self.secret, &self.history)
    }

    pub fn pattern(&self) -> String {
        revealed_pattern(&self.secret, &self.history.correct)
    }

    pub fn missed_count(&self) -> usize {
        self.history.missed.len()
    }

    pub fn remaining_guesses(&self) -> usize {
        GUESS_BUDGET.saturating_sub(self.missed_count())
    }

    /// Summary of the round, once it has ended.
    pub fn summary(&self) -> Option<RoundSummary> {
        let outcome = self.outcome();
        outcome.is_terminal().then(|| RoundSummary {
            outcome,
            secret: self.secret.to_string(),
            correct_guesses: self.history.correct.len(),
            missed_guesses: self.history.missed.len(),
        })
    }

    /// Applies a validated guess.
    ///
    /// Fails without touching the history if the round is over or the letter
    /// could not have passed validation.
    pub fn submit_guess(&mut self, letter: char) -> Result<GuessResult, SessionError> {
        let current = self.outcome();
        if current.is_terminal() {
            return Err(SessionError::RoundOver(current));
        }
        if !letter.is_ascii_lowercase() {
            return Err(SessionError::NotALetter(letter));
        }
        if self.history.contains(letter) {
            return Err(SessionError::AlreadyGuessed(letter));
        }

        let hit = self.secret.contains(letter);
        self.history.record(letter, hit);
        let outcome = self.outcome();
        debug_log!(
            "submit_guess() - '{}' hit={} missed={} outcome={}",
            letter,
            hit,
            self.missed_count(),
            outcome
        );

        Ok(GuessResult {
            letter,
            hit,
            outcome,
            pattern: self.pattern(),
            missed_count: self.missed_count(),
            summary: self.summary(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(word: &str) -> GameSession {
        GameSession::new(SecretWord::new(word).unwrap())
    }

    #[test]
    fn test_secret_word_rejects_short_words() {
        assert_eq!(
            SecretWord::new("a"),
            Err(SessionError::WordTooShort("a".to_string()))
        );
        assert!(SecretWord::new("").is_err());
    }

    #[test]
    fn test_secret_word_rejects_all_spaces() {
        assert_eq!(
            SecretWord::new("   "),
            Err(SessionError::NoGuessableLetters("   ".to_string()))
        );
    }

    #[test]
    fn test_secret_word_rejects_uppercase_and_symbols() {
        assert!(matches!(
            SecretWord::new("Cat"),
            Err(SessionError::InvalidCharacter(_, 'C'))
        ));
        assert!(matches!(
            SecretWord::new("t-rex"),
            Err(SessionError::InvalidCharacter(_, '-'))
        ));
    }

    #[test]
    fn test_secret_word_space_is_not_a_letter() {
        let word = SecretWord::new("a b").unwrap();
        assert!(!word.contains(' '));
        assert_eq!(word.letters().collect::<String>(), "ab");
    }

    #[test]
    fn test_new_session_starts_in_progress() {
        let game = session("cat");
        assert_eq!(game.outcome(), GameOutcome::InProgress);
        assert_eq!(game.pattern(), "---");
        assert!(game.history().is_empty());
        assert_eq!(game.summary(), None);
        assert_eq!(game.remaining_guesses(), GUESS_BUDGET);
    }

    #[test]
    fn test_cat_scenario() {
        let mut game = session("cat");

        let r = game.submit_guess('c').unwrap();
        assert_eq!(r.pattern, "c--");
        assert_eq!(r.outcome, GameOutcome::InProgress);
        assert!(r.hit);
        assert_eq!(r.summary, None);

        let r = game.submit_guess('a').unwrap();
        assert_eq!(r.pattern, "ca-");
        assert_eq!(r.outcome, GameOutcome::InProgress);

        let r = game.submit_guess('t').unwrap();
        assert_eq!(r.pattern, "cat");
        assert_eq!(r.outcome, GameOutcome::Won);
        assert_eq!(r.missed_count, 0);
        assert_eq!(
            r.summary,
            Some(RoundSummary {
                outcome: GameOutcome::Won,
                secret: "cat".to_string(),
                correct_guesses: 3,
                missed_guesses: 0,
            })
        );
    }

    #[test]
    fn test_dog_scenario_lost_after_budget() {
        let mut game = session("dog");
        let wrong = ['x', 'y', 'z', 'q', 'w', 'v'];

        for (i, letter) in wrong.iter().enumerate() {
            let r = game.submit_guess(*letter).unwrap();
            assert!(!r.hit);
            assert_eq!(r.missed_count, i + 1);
            if i + 1 < GUESS_BUDGET {
                assert_eq!(r.outcome, GameOutcome::InProgress);
            } else {
                assert_eq!(r.outcome, GameOutcome::Lost);
                let summary = r.summary.unwrap();
                assert_eq!(summary.secret, "dog");
                assert_eq!(summary.missed_guesses, 6);
                assert_eq!(summary.correct_guesses, 0);
            }
        }

        let expected: BTreeSet<char> = wrong.into_iter().collect();
        assert_eq!(game.history().missed(), &expected);
        assert!(game.history().correct().is_empty());
        assert_eq!(game.remaining_guesses(), 0);
    }

    #[test]
    fn test_spaces_are_revealed_and_not_required() {
        let mut game = session("a b");
        assert_eq!(game.pattern(), "- -");

        let r = game.submit_guess('a').unwrap();
        assert_eq!(r.pattern, "a -");
        assert_eq!(r.outcome, GameOutcome::InProgress);

        let r = game.submit_guess('b').unwrap();
        assert_eq!(r.pattern, "a b");
        assert_eq!(r.outcome, GameOutcome::Won);
    }

    #[test]
    fn test_repeated_letters_revealed_together() {
        let mut game = session("llama");
        let r = game.submit_guess('l').unwrap();
        assert_eq!(r.pattern, "ll---");
        let r = game.submit_guess('a').unwrap();
        assert_eq!(r.pattern, "lla-a");
    }

    #[test]
    fn test_guess_after_win_is_rejected() {
        let mut game = session("ox");
        game.submit_guess('o').unwrap();
        game.submit_guess('x').unwrap();
        let before = game.history().clone();

        assert_eq!(
            game.submit_guess('z'),
            Err(SessionError::RoundOver(GameOutcome::Won))
        );
        assert_eq!(game.history(), &before);
    }

    #[test]
    fn test_guess_after_loss_is_rejected() {
        let mut game = session("ox");
        for letter in ['a', 'b', 'c', 'd', 'e', 'f'] {
            game.submit_guess(letter).unwrap();
        }
        assert_eq!(
            game.submit_guess('o'),
            Err(SessionError::RoundOver(GameOutcome::Lost))
        );
        assert!(game.history().correct().is_empty());
    }

    #[test]
    fn test_repeated_guess_does_not_change_history() {
        let mut game = session("cat");
        game.submit_guess('c').unwrap();
        game.submit_guess('z').unwrap();
        let before = game.history().clone();

        assert_eq!(game.submit_guess('c'), Err(SessionError::AlreadyGuessed('c')));
        assert_eq!(game.submit_guess('z'), Err(SessionError::AlreadyGuessed('z')));
        assert_eq!(game.history(), &before);
    }

    #[test]
    fn test_non_letters_are_rejected() {
        let mut game = session("cat");
        assert_eq!(game.submit_guess('C'), Err(SessionError::NotALetter('C')));
        assert_eq!(game.submit_guess(' '), Err(SessionError::NotALetter(' ')));
        assert_eq!(game.submit_guess('1'), Err(SessionError::NotALetter('1')));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_history_counts_and_disjointness() {
        let mut game = session("hangman");
        let guesses = ['h', 'e', 'a', 'i', 'n', 'o', 'g'];
        for (i, letter) in guesses.iter().enumerate() {
            game.submit_guess(*letter).unwrap();
            let history = game.history();
            assert_eq!(history.len(), i + 1);
            assert!(history.missed().is_disjoint(history.correct()));
        }
    }

    #[test]
    fn test_outcome_is_derived_from_history() {
        let secret = SecretWord::new("hi").unwrap();
        let mut history = GuessHistory::new();
        assert_eq!(outcome(&secret, &history), GameOutcome::InProgress);

        history.record('h', true);
        history.record('i', true);
        assert_eq!(outcome(&secret, &history), GameOutcome::Won);
        assert!(!is_lost(&history));
    }

    #[test]
    fn test_win_on_last_available_guess() {
        let mut game = session("ab");
        for letter in ['c', 'd', 'e', 'f', 'g'] {
            game.submit_guess(letter).unwrap();
        }
        game.submit_guess('a').unwrap();
        let r = game.submit_guess('b').unwrap();
        assert_eq!(r.outcome, GameOutcome::Won);
        assert_eq!(r.missed_count, 5);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(GameOutcome::InProgress.to_string(), "in progress");
        assert_eq!(GameOutcome::Won.to_string(), "won");
        assert_eq!(GameOutcome::Lost.to_string(), "lost");
    }
}
