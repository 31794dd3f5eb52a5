// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod game_state;
pub mod guess;
pub mod logging;
pub mod session;
pub mod stages;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use game_state::{
    GameError, GameInterface, RoundEnd, RoundView, game_loop, run_round, start_game,
};
pub use guess::{GuessError, validate_guess};
pub use session::{
    GUESS_BUDGET, GameOutcome, GameSession, GuessHistory, GuessResult, RoundSummary, SecretWord,
    SessionError,
};
pub use wordbank::{
    WordListError, WordSource, load_wordbank_from_file, load_wordbank_from_str, pick_word,
};
