use crate::session::GuessHistory;

/// Why a line of player input was not accepted as a guess.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GuessError {
    #[display("Please enter a single letter.")]
    NotSingleLetter,

    #[display("Space is not a valid entry. Please enter a single letter.")]
    WhitespaceNotAllowed,

    #[display("Already guessed the letter '{}'. Choose again.", _0)]
    AlreadyGuessed(char),

    #[display("Please enter a LETTER.")]
    NotALetter,
}

impl std::error::Error for GuessError {}

/// Turns one line of input into a guess letter.
///
/// Only the line terminator is stripped, so `" "` reaches the whitespace rule
/// instead of collapsing to an empty string. Rules are checked in order and the
/// first failure wins.
pub fn validate_guess(raw: &str, history: &GuessHistory) -> Result<char, GuessError> {
    let input = raw.trim_end_matches(['\r', '\n']).to_lowercase();
    let mut chars = input.chars();

    let (Some(letter), None) = (chars.next(), chars.next()) else {
        return Err(GuessError::NotSingleLetter);
    };

    if letter == ' ' {
        return Err(GuessError::WhitespaceNotAllowed);
    }
    if history.contains(letter) {
        return Err(GuessError::AlreadyGuessed(letter));
    }
    if !letter.is_ascii_lowercase() {
        return Err(GuessError::NotALetter);
    }
    Ok(letter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{GameSession, SecretWord};

    fn history_with(word: &str, guesses: &[char]) -> GuessHistory {
        let mut game = GameSession::new(SecretWord::new(word).unwrap());
        for letter in guesses {
            game.submit_guess(*letter).unwrap();
        }
        game.history().clone()
    }

    #[test]
    fn test_rejects_empty_input() {
        let history = GuessHistory::new();
        assert_eq!(validate_guess("", &history), Err(GuessError::NotSingleLetter));
        assert_eq!(validate_guess("\n", &history), Err(GuessError::NotSingleLetter));
    }

    #[test]
    fn test_rejects_multiple_characters() {
        let history = GuessHistory::new();
        assert_eq!(validate_guess("ab", &history), Err(GuessError::NotSingleLetter));
        assert_eq!(validate_guess("a ", &history), Err(GuessError::NotSingleLetter));
        assert_eq!(validate_guess(" a\n", &history), Err(GuessError::NotSingleLetter));
    }

    #[test]
    fn test_rejects_space() {
        let history = GuessHistory::new();
        assert_eq!(
            validate_guess(" ", &history),
            Err(GuessError::WhitespaceNotAllowed)
        );
        assert_eq!(
            validate_guess(" \n", &history),
            Err(GuessError::WhitespaceNotAllowed)
        );
    }

    #[test]
    fn test_rejects_digits_and_symbols() {
        let history = GuessHistory::new();
        assert_eq!(validate_guess("1", &history), Err(GuessError::NotALetter));
        assert_eq!(validate_guess("-", &history), Err(GuessError::NotALetter));
        assert_eq!(validate_guess("\t", &history), Err(GuessError::NotALetter));
        assert_eq!(validate_guess("é", &history), Err(GuessError::NotALetter));
    }

    #[test]
    fn test_rejects_already_guessed_letters() {
        let history = history_with("cat", &['c', 'z']);
        assert_eq!(
            validate_guess("c", &history),
            Err(GuessError::AlreadyGuessed('c'))
        );
        assert_eq!(
            validate_guess("z\n", &history),
            Err(GuessError::AlreadyGuessed('z'))
        );
    }

    #[test]
    fn test_case_folds_before_checking() {
        let history = history_with("cat", &['c']);
        assert_eq!(validate_guess("A", &history), Ok('a'));
        assert_eq!(
            validate_guess("C", &history),
            Err(GuessError::AlreadyGuessed('c'))
        );
    }

    #[test]
    fn test_strips_line_terminators() {
        let history = GuessHistory::new();
        assert_eq!(validate_guess("q\n", &history), Ok('q'));
        assert_eq!(validate_guess("q\r\n", &history), Ok('q'));
    }

    #[test]
    fn test_accepts_exactly_unguessed_letters() {
        let history = history_with("hangman", &['h', 'x', 'a']);
        let accepted: Vec<char> = ('a'..='z')
            .filter(|c| validate_guess(&c.to_string(), &history).is_ok())
            .collect();

        assert_eq!(accepted.len(), 23);
        assert!(!accepted.contains(&'h'));
        assert!(!accepted.contains(&'x'));
        assert!(!accepted.contains(&'a'));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GuessError::AlreadyGuessed('e').to_string(),
            "Already guessed the letter 'e'. Choose again."
        );
        assert_eq!(GuessError::NotALetter.to_string(), "Please enter a LETTER.");
    }
}
