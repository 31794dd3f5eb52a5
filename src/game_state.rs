use crate::guess::{GuessError, validate_guess};
use crate::session::{GameSession, RoundSummary, SessionError};
use crate::wordbank::{WordListError, WordSource};
use crate::{debug_log, info_log};
use rand::Rng;
use std::collections::BTreeSet;

const DEFAULT_PLAYER_NAME: &str = "Player";

/// Failures that abort the game loop.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum GameError {
    #[display("{}", _0)]
    WordList(WordListError),
    #[display("{}", _0)]
    Session(SessionError),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WordList(e) => Some(e),
            Self::Session(e) => Some(e),
        }
    }
}

/// Snapshot of a round for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundView {
    /// Number of missed guesses, which is also the gallows stage.
    pub stage: usize,
    pub missed: BTreeSet<char>,
    pub pattern: String,
}

impl RoundView {
    pub fn of(session: &GameSession) -> Self {
        Self {
            stage: session.missed_count(),
            missed: session.history().missed().clone(),
            pattern: session.pattern(),
        }
    }
}

/// How a call to [`run_round`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEnd {
    Finished(RoundSummary),
    /// Input closed or the player quit mid-round.
    Abandoned,
}

/// The I/O seam between the game loop and a front end.
///
/// Methods returning `Option` yield `None` when input is closed or the player
/// asked to quit.
pub trait GameInterface {
    fn read_player_name(&mut self) -> Option<String>;
    fn display_welcome(&mut self, player: &str);
    fn display_round(&mut self, view: &RoundView);
    fn read_guess(&mut self) -> Option<String>;
    fn display_invalid_guess(&mut self, error: &GuessError);
    fn display_outcome(&mut self, player: &str, summary: &RoundSummary, view: &RoundView);
    fn ask_play_again(&mut self) -> bool;
    fn display_exit_message(&mut self);
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Capitalized, trimmed name; blank names become "Player".
pub fn display_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        capitalize(name)
    }
}

/// Plays one round with a freshly drawn secret word.
pub fn run_round<I, R>(
    player: &str,
    words: &WordSource,
    interface: &mut I,
    rng: &mut R,
) -> Result<RoundEnd, GameError>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut session = GameSession::new(words.pick(rng)?);
    info_log!(
        "run_round() - new round for '{}', {} characters",
        player,
        session.secret().as_str().len()
    );

    loop {
        interface.display_round(&RoundView::of(&session));

        let letter = loop {
            let Some(raw) = interface.read_guess() else {
                info_log!("run_round() - input closed, abandoning round");
                return Ok(RoundEnd::Abandoned);
            };
            match validate_guess(&raw, session.history()) {
                Ok(letter) => break letter,
                Err(e) => {
                    debug_log!("run_round() - rejected guess {:?}: {}", raw, e);
                    interface.display_invalid_guess(&e);
                }
            }
        };

        let result = session.submit_guess(letter)?;
        if let Some(summary) = result.summary {
            info_log!(
                "run_round() - round {} after {} correct / {} missed",
                summary.outcome,
                summary.correct_guesses,
                summary.missed_guesses
            );
            interface.display_outcome(player, &summary, &RoundView::of(&session));
            return Ok(RoundEnd::Finished(summary));
        }
    }
}

/// Plays rounds until the player declines another one or input closes.
/// Returns the number of rounds played to the end.
pub fn game_loop<I, R>(
    player: &str,
    words: &WordSource,
    interface: &mut I,
    rng: &mut R,
) -> Result<usize, GameError>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut finished = 0;

    loop {
        match run_round(player, words, interface, rng)? {
            RoundEnd::Abandoned => break,
            RoundEnd::Finished(_) => {
                finished += 1;
                if !interface.ask_play_again() {
                    break;
                }
            }
        }
    }

    interface.display_exit_message();
    Ok(finished)
}

/// Greets the player and runs the game loop. `player` overrides the name prompt.
pub fn start_game<I, R>(
    player: Option<&str>,
    words: &WordSource,
    interface: &mut I,
    rng: &mut R,
) -> Result<usize, GameError>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let name = match player {
        Some(name) => name.to_string(),
        None => match interface.read_player_name() {
            Some(name) => name,
            None => return Ok(0),
        },
    };
    let name = display_name(&name);
    interface.display_welcome(&name);
    game_loop(&name, words, interface, rng)
}
