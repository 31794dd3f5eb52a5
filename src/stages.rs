//! Gallows drawings, one per number of missed guesses.

use crate::session::GUESS_BUDGET;

pub const STAGES: [&str; GUESS_BUDGET + 1] = [
    r"
  +---+
      |
      |
      |
     ===",
    r"
  +---+
  O   |
      |
      |
     ===",
    r"
  +---+
  O   |
  |   |
      |
     ===",
    r"
  +---+
  O   |
 /|   |
      |
     ===",
    r"
  +---+
  O   |
 /|\  |
      |
     ===",
    r"
  +---+
  O   |
 /|\  |
 /    |
     ===",
    r"
  +---+
  O   |
 /|\  |
 / \  |
     ===",
];

/// Drawing for `missed` wrong guesses, clamped to the final stage.
pub fn stage(missed: usize) -> &'static str {
    STAGES[missed.min(GUESS_BUDGET)]
}
