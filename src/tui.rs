//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! The UI moves through these input states:
//! - `EnteringName` → `Welcome` → `EnteringGuess` → `AskingPlayAgain` → back to `EnteringGuess`
//! - Terminal state: `GameOver`
//!
//! While guessing, every key press is one guess; validation happens in the game
//! loop exactly as it does for typed lines.

use crate::cli::{format_missed, outcome_message, spaced};
use crate::game_state::{GameInterface, RoundView};
use crate::guess::GuessError;
use crate::session::{GUESS_BUDGET, GameOutcome, RoundSummary};
use crate::stages::stage;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::thread;
use std::time::Duration;

const TITLE: &str = "HANGMAN";
const MAX_NAME_LEN: usize = 24;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const WELCOME_LETTER_DELAY: Duration = Duration::from_millis(150);
const GALLOWS_WIDTH: u16 = 16;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringName,
    Welcome,
    EnteringGuess,
    AskingPlayAgain,
    GameOver,
}

/// What a key press meant in the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum InputAction {
    Submit(String),
    Answer(bool),
    Quit,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    state: TuiState,
    banner: &'a str,
    input: &'a str,
    view: Option<&'a RoundView>,
    last_outcome: Option<GameOutcome>,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    banner: String,
    input: String,
    view: Option<RoundView>,
    last_outcome: Option<GameOutcome>,
    message: String,
    error_message: String,
    status: String,
    welcome_delay: Duration,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            state: TuiState::EnteringName,
            banner: TITLE.to_string(),
            input: String::new(),
            view: None,
            last_outcome: None,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
            welcome_delay: WELCOME_LETTER_DELAY,
        })
    }

    /// Shows the welcome banner all at once instead of letter by letter.
    #[must_use]
    pub fn without_animation(mut self) -> Self {
        self.welcome_delay = Duration::ZERO;
        self
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: self.state,
            banner: &self.banner,
            input: &self.input,
            view: self.view.as_ref(),
            last_outcome: self.last_outcome,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(9),  // Gallows and word
                Constraint::Min(4),     // Messages
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        let board = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GALLOWS_WIDTH), Constraint::Min(20)])
            .split(chunks[1]);

        Self::render_title(f, chunks[0], ctx.banner);
        Self::render_gallows(f, board[0], ctx.view, ctx.last_outcome);
        Self::render_word(f, board[1], ctx);
        Self::render_messages(f, chunks[2], ctx.message, ctx.error_message);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect, banner: &str) {
        let title = Paragraph::new(banner.to_string())
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(
        f: &mut Frame,
        area: Rect,
        view: Option<&RoundView>,
        last_outcome: Option<GameOutcome>,
    ) {
        let missed = view.map_or(0, |v| v.stage);
        let style = match last_outcome {
            Some(GameOutcome::Lost) => ERROR_STYLE,
            Some(GameOutcome::Won) => SUCCESS_STYLE,
            _ => Style::default(),
        };
        let lines: Vec<Line> = stage(missed)
            .lines()
            .skip(1)
            .map(|line| Line::styled(line.to_string(), style))
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_word(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if ctx.state == TuiState::EnteringName {
            lines.push(Line::from(vec![Span::styled("Your name:", HEADER_STYLE)]));
            lines.push(Line::from(format!("  {}_", ctx.input)));
        } else if let Some(view) = ctx.view {
            lines.push(Line::from(vec![
                Span::styled("Word: ", HEADER_STYLE),
                Span::styled(spaced(view.pattern.chars()), SUCCESS_STYLE),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Missed letters: ", INFO_STYLE),
                Span::raw(format_missed(&view.missed)),
            ]));
            lines.push(Line::from(format!(
                "Guesses left: {}",
                GUESS_BUDGET.saturating_sub(view.stage)
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Round").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_messages(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
        let mut lines = Vec::new();
        for line in message.lines() {
            lines.push(Line::from(vec![Span::styled(line.to_string(), MESSAGE_STYLE)]));
        }
        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Messages").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringName => "Type your name | ENTER: Start | ESC: Quit",
            TuiState::Welcome => "Get ready...",
            TuiState::EnteringGuess => "Press a letter to guess it | ESC: Quit",
            TuiState::AskingPlayAgain => "Play again? Y: Yes | N: No",
            TuiState::GameOver => "Goodbye!",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn handle_input(&mut self) -> Result<Option<InputAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info_log!("handle_input() - Ctrl-C pressed, quitting");
            return Ok(Some(InputAction::Quit));
        }

        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - Ignoring control character: {:?}", c);
            return Ok(None);
        }

        debug_log!(
            "handle_input() - Key event: code={:?}, state={:?}",
            key.code,
            self.state
        );
        Ok(match self.state {
            TuiState::EnteringName => self.handle_name_input(key),
            TuiState::EnteringGuess => Self::handle_guess_input(key),
            TuiState::AskingPlayAgain => Self::handle_play_again_input(key),
            TuiState::Welcome | TuiState::GameOver => None,
        })
    }

    fn handle_name_input(&mut self, key: KeyEvent) -> Option<InputAction> {
        match key.code {
            KeyCode::Char(c) if !Self::has_modifier_keys(&key) => {
                if self.input.chars().count() < MAX_NAME_LEN {
                    self.input.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Enter => Some(InputAction::Submit(std::mem::take(&mut self.input))),
            KeyCode::Esc => Some(InputAction::Quit),
            _ => None,
        }
    }

    fn handle_guess_input(key: KeyEvent) -> Option<InputAction> {
        match key.code {
            KeyCode::Char(c) if !Self::has_modifier_keys(&key) => {
                Some(InputAction::Submit(c.to_string()))
            }
            KeyCode::Esc => Some(InputAction::Quit),
            _ => None,
        }
    }

    fn handle_play_again_input(key: KeyEvent) -> Option<InputAction> {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(InputAction::Answer(true)),
            KeyCode::Char('n' | 'N') => Some(InputAction::Answer(false)),
            KeyCode::Esc => Some(InputAction::Quit),
            _ => None,
        }
    }

    /// Draws and waits until a key press produces an action. I/O errors end
    /// the session the same way ESC does.
    fn wait_for_action(&mut self) -> InputAction {
        loop {
            if self.draw().is_err() {
                info_log!("wait_for_action() - Draw failed, quitting");
                return InputAction::Quit;
            }
            match self.handle_input() {
                Ok(Some(action)) => return action,
                Ok(None) => {}
                Err(e) => {
                    info_log!("wait_for_action() - Input error: {}", e);
                    return InputAction::Quit;
                }
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn read_player_name(&mut self) -> Option<String> {
        self.state = TuiState::EnteringName;
        self.status = "Enter your name".to_string();
        loop {
            match self.wait_for_action() {
                InputAction::Submit(name) => return Some(name),
                InputAction::Quit => return None,
                InputAction::Answer(_) => {}
            }
        }
    }

    fn display_welcome(&mut self, player: &str) {
        self.state = TuiState::Welcome;
        self.message = format!("Hello {player}! Let's play...");
        self.status = "Starting".to_string();
        self.banner.clear();
        for ch in TITLE.chars() {
            if !self.banner.is_empty() {
                self.banner.push(' ');
            }
            self.banner.push(ch);
            self.draw_or_log();
            if !self.welcome_delay.is_zero() {
                thread::sleep(self.welcome_delay);
            }
        }
    }

    fn display_round(&mut self, view: &RoundView) {
        if self.state != TuiState::EnteringGuess {
            // First board of a new round.
            self.last_outcome = None;
            self.message.clear();
        }
        self.view = Some(view.clone());
        self.state = TuiState::EnteringGuess;
        self.status = "Guess a letter".to_string();
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Option<String> {
        loop {
            match self.wait_for_action() {
                InputAction::Submit(guess) => {
                    self.error_message.clear();
                    return Some(guess);
                }
                InputAction::Quit => return None,
                InputAction::Answer(_) => {}
            }
        }
    }

    fn display_invalid_guess(&mut self, error: &GuessError) {
        self.error_message = error.to_string();
        self.draw_or_log();
    }

    fn display_outcome(&mut self, player: &str, summary: &RoundSummary, view: &RoundView) {
        self.view = Some(view.clone());
        self.last_outcome = Some(summary.outcome);
        self.error_message.clear();
        self.message = outcome_message(player, summary);
        self.status = format!("Round {}", summary.outcome);
        self.draw_or_log();
    }

    fn ask_play_again(&mut self) -> bool {
        self.state = TuiState::AskingPlayAgain;
        self.status = "Do you want to play again?".to_string();
        loop {
            match self.wait_for_action() {
                InputAction::Answer(answer) => return answer,
                InputAction::Quit => return false,
                InputAction::Submit(_) => {}
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.state = TuiState::GameOver;
        self.status = "Thanks for playing!".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
