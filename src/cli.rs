use crate::debug_log;
use crate::game_state::{GameInterface, RoundView, capitalize};
use crate::guess::GuessError;
use crate::session::{GameOutcome, RoundSummary};
use crate::stages::stage;
use clap::Parser;
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

const TITLE: &str = "HANGMAN";
const WELCOME_LETTER_DELAY: Duration = Duration::from_millis(500);

/// Hangman: guess the secret word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(value_name = "WORD_LIST")]
    pub word_list: PathBuf,

    /// Player name (prompted for when omitted)
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Skip the pause between letters of the welcome banner
    #[arg(long = "no-animation")]
    pub no_animation: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

/// Reads one line. `None` only at end of input or on a failing reader.
///
/// Bytes that are not UTF-8 become U+FFFD, so a garbled line still reaches
/// validation and gets rejected there.
fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut bytes = Vec::new();
    match reader.read_until(b'\n', &mut bytes) {
        Ok(0) => None,
        Ok(_) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            debug_log!("read_line() - input error: {}", e);
            None
        }
    }
}

/// Letters separated by single spaces, the way the board is printed.
pub fn spaced(text: impl IntoIterator<Item = char>) -> String {
    let mut out = String::new();
    for c in text {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

pub fn format_missed(missed: &BTreeSet<char>) -> String {
    spaced(missed.iter().copied())
}

pub fn read_player_name<R: BufRead>(reader: &mut R) -> Option<String> {
    print!("Please enter your name... ");
    let _ = io::stdout().flush();
    read_line(reader).map(|name| name.trim().to_string())
}

pub fn display_welcome(player: &str, delay: Duration) {
    println!("Hello {player}! Let's play...");
    let mut out = io::stdout();
    for ch in TITLE.chars() {
        let _ = write!(out, "{ch} ");
        let _ = out.flush();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    println!();
}

pub fn display_round(view: &RoundView) {
    println!("{}", stage(view.stage));
    println!();
    println!("Missed letters: {}", format_missed(&view.missed));
    println!("{}", spaced(view.pattern.chars()));
}

pub fn read_guess<R: BufRead>(reader: &mut R) -> Option<String> {
    println!("Guess a letter.");
    read_line(reader)
}

pub fn display_invalid_guess(error: &GuessError) {
    println!("{error}");
}

pub fn outcome_message(player: &str, summary: &RoundSummary) -> String {
    match summary.outcome {
        GameOutcome::Won => format!(
            "Yes! The secret word is \"{}\"! {player}, you won!",
            summary.secret
        ),
        GameOutcome::Lost => format!(
            "{player}, you ran out of guesses!\nAfter {} missed guesses and {} correct guesses, the word was \"{}\"",
            summary.missed_guesses,
            summary.correct_guesses,
            capitalize(&summary.secret)
        ),
        GameOutcome::InProgress => String::new(),
    }
}

pub fn display_outcome(player: &str, summary: &RoundSummary, view: &RoundView) {
    if summary.outcome == GameOutcome::Lost {
        display_round(view);
    }
    println!("{}", outcome_message(player, summary));
}

/// Any reply starting with `y` counts as yes.
pub fn is_yes(answer: &str) -> bool {
    answer.trim_start().to_lowercase().starts_with('y')
}

pub fn read_play_again<R: BufRead>(reader: &mut R) -> bool {
    println!("Do you want to play again? (yes or no)");
    read_line(reader).is_some_and(|answer| is_yes(&answer))
}

pub fn display_exit_message() {
    println!("Thanks for playing!");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
    welcome_delay: Duration,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            welcome_delay: WELCOME_LETTER_DELAY,
        }
    }

    /// Prints the welcome banner without pausing between letters.
    #[must_use]
    pub fn without_animation(mut self) -> Self {
        self.welcome_delay = Duration::ZERO;
        self
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_player_name(&mut self) -> Option<String> {
        read_player_name(&mut self.reader)
    }

    fn display_welcome(&mut self, player: &str) {
        display_welcome(player, self.welcome_delay);
    }

    fn display_round(&mut self, view: &RoundView) {
        display_round(view);
    }

    fn read_guess(&mut self) -> Option<String> {
        read_guess(&mut self.reader)
    }

    fn display_invalid_guess(&mut self, error: &GuessError) {
        display_invalid_guess(error);
    }

    fn display_outcome(&mut self, player: &str, summary: &RoundSummary, view: &RoundView) {
        display_outcome(player, summary, view);
    }

    fn ask_play_again(&mut self) -> bool {
        read_play_again(&mut self.reader)
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
