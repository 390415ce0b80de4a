//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `EnteringLetter` → (round over) → `EnteringName` (only for a ranking win)
//!   → `ConfirmingReplay` → back to `EnteringLetter`
//! - ESC in any state ends the session.

use crate::cli::{gallows_lines, guessed_list, spaced_pattern};
use crate::error::GameError;
use crate::game_state::{GameInterface, RoundSummary};
use crate::highscores::ScoreEntry;
use crate::round::{GuessOutcome, MAX_ATTEMPTS, Round};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
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

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_NAME_LENGTH: usize = 24;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug)]
enum TuiState {
    EnteringLetter,
    EnteringName,
    ConfirmingReplay,
    Exiting,
}

/// What the player did in response to a key press.
#[derive(Debug)]
enum TuiAction {
    Letter(char),
    Name(String),
    Replay(bool),
    Quit,
}

/// Snapshot of the round shown on screen.
#[derive(Debug, Default)]
struct RoundView {
    pattern: String,
    guessed: String,
    wrong_guesses: u32,
    attempts_left: u32,
}

impl RoundView {
    fn from_round(round: &Round) -> Self {
        Self {
            pattern: spaced_pattern(round),
            guessed: guessed_list(round),
            wrong_guesses: round.wrong_guesses(),
            attempts_left: round.attempts_left(),
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    round: &'a RoundView,
    high_scores: &'a [ScoreEntry],
    name_input: &'a str,
    state: &'a TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    round: RoundView,
    high_scores: Vec<ScoreEntry>,
    name_input: String,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            round: RoundView::default(),
            high_scores: Vec::new(),
            name_input: String::new(),
            state: TuiState::EnteringLetter,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
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

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            round: &self.round,
            high_scores: &self.high_scores,
            name_input: &self.name_input,
            state: &self.state,
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

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(12), // Gallows and leaderboard
                Constraint::Min(5),     // Messages
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        Self::render_title(f, chunks[0]);
        Self::render_board(f, columns[0], ctx.round);
        Self::render_high_scores(f, columns[1], ctx.high_scores);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, round: &RoundView) {
        let mut lines: Vec<Line> = gallows_lines(round.wrong_guesses)
            .into_iter()
            .map(Line::from)
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Word: "),
            Span::styled(round.pattern.clone(), SUCCESS_STYLE),
        ]));
        lines.push(Line::from(format!(
            "Attempts left: {}/{MAX_ATTEMPTS}",
            round.attempts_left
        )));
        lines.push(Line::from(format!("Guessed: {}", round.guessed)));

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Round").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_high_scores(f: &mut Frame, area: Rect, entries: &[ScoreEntry]) {
        let mut lines = Vec::new();
        if entries.is_empty() {
            lines.push(Line::from("(no scores yet)"));
        }
        for (i, entry) in entries.iter().enumerate() {
            lines.push(Line::from(format!(
                "{:>2}. {} - {}",
                i + 1,
                entry.name,
                entry.score
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("High Scores").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }

        if matches!(ctx.state, TuiState::EnteringName) {
            lines.push(Line::from(vec![
                Span::styled("Your name: ", INFO_STYLE),
                Span::raw(format!("{}_", ctx.name_input)),
            ]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                ctx.error_message,
                ERROR_STYLE,
            )]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::EnteringLetter => "Type a letter to guess | ESC: Quit",
            TuiState::EnteringName => "Type your name | ENTER: Save | BACKSPACE: Delete | ESC: Quit",
            TuiState::ConfirmingReplay => "Y: Play again | N: Quit",
            TuiState::Exiting => "Goodbye!",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Wait for the next key press and translate it for the current state.
    fn handle_input(&mut self) -> Result<Option<TuiAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press || Self::has_modifier_keys(&key) {
            debug_log!("handle_input() - Ignoring key event: {:?}", key);
            return Ok(None);
        }

        if key.code == KeyCode::Esc {
            info_log!("handle_input() - ESC pressed, quitting");
            return Ok(Some(TuiAction::Quit));
        }

        let action = match self.state {
            TuiState::EnteringLetter => self.handle_letter_input(key),
            TuiState::EnteringName => self.handle_name_input(key),
            TuiState::ConfirmingReplay => Self::handle_replay_input(key),
            TuiState::Exiting => None,
        };
        Ok(action)
    }

    fn handle_letter_input(&mut self, key: KeyEvent) -> Option<TuiAction> {
        match key.code {
            KeyCode::Char(c) if c.is_alphabetic() => {
                self.error_message.clear();
                Some(TuiAction::Letter(c))
            }
            KeyCode::Char(c) if !c.is_whitespace() => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                None
            }
            _ => None,
        }
    }

    fn handle_name_input(&mut self, key: KeyEvent) -> Option<TuiAction> {
        match key.code {
            KeyCode::Char(c) if !c.is_control() && self.name_input.chars().count() < MAX_NAME_LENGTH => {
                self.name_input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.name_input.pop();
                None
            }
            KeyCode::Enter if self.name_input.trim().is_empty() => {
                self.error_message = "Name cannot be empty.".to_string();
                None
            }
            KeyCode::Enter => {
                let name = self.name_input.trim().to_string();
                self.name_input.clear();
                self.error_message.clear();
                Some(TuiAction::Name(name))
            }
            _ => None,
        }
    }

    fn handle_replay_input(key: KeyEvent) -> Option<TuiAction> {
        match key.code {
            KeyCode::Char('y' | 'Y' | 't' | 'T') | KeyCode::Enter => Some(TuiAction::Replay(true)),
            KeyCode::Char('n' | 'N') => Some(TuiAction::Replay(false)),
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    /// Redraw and read keys until an action arrives. Quit and I/O errors map to `None`.
    fn next_action(&mut self) -> Option<TuiAction> {
        loop {
            if self.draw().is_err() {
                info_log!("next_action() - Draw failed, quitting");
                return None;
            }
            match self.handle_input() {
                Ok(Some(TuiAction::Quit)) => return None,
                Ok(Some(action)) => return Some(action),
                Ok(None) => {}
                Err(e) => {
                    info_log!("next_action() - Input error: {}", e);
                    return None;
                }
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_high_scores(&mut self, entries: &[ScoreEntry]) {
        self.high_scores = entries.to_vec();
        self.draw_or_log();
    }

    fn display_round_start(&mut self, round: &Round) {
        self.round = RoundView::from_round(round);
        self.state = TuiState::EnteringLetter;
        self.message = format!(
            "New round! The word has {} letters.",
            round.pattern().chars().count()
        );
        self.error_message.clear();
        self.status = "Guess a letter".to_string();
        self.draw_or_log();
    }

    fn read_letter(&mut self, round: &Round) -> Option<char> {
        self.round = RoundView::from_round(round);
        self.state = TuiState::EnteringLetter;
        loop {
            match self.next_action()? {
                TuiAction::Letter(letter) => return Some(letter),
                other => {
                    debug_log!("read_letter() - Unexpected action {:?}", other);
                }
            }
        }
    }

    fn display_guess_outcome(&mut self, round: &Round, letter: char, outcome: GuessOutcome) {
        self.round = RoundView::from_round(round);
        self.message = match outcome {
            GuessOutcome::Hit => format!("Yes! '{letter}' is in the word."),
            GuessOutcome::Miss => format!("No '{letter}' in the word."),
            GuessOutcome::Repeat => format!("You already guessed '{letter}'."),
            GuessOutcome::Finished => "The round is already over.".to_string(),
        };
        self.draw_or_log();
    }

    fn display_round_result(&mut self, summary: &RoundSummary) {
        if summary.won {
            self.message = format!(
                "You guessed '{}'! Score: {} pts ({}s)",
                summary.word, summary.score, summary.elapsed_secs
            );
            self.status = "Round won".to_string();
        } else {
            self.message = format!("Out of attempts. The word was '{}'.", summary.word);
            self.status = "Round lost".to_string();
        }
        self.draw_or_log();
    }

    fn read_name(&mut self, score: i64) -> Option<String> {
        self.state = TuiState::EnteringName;
        self.name_input.clear();
        self.status = format!("{score} pts makes the high score table!");
        loop {
            match self.next_action()? {
                TuiAction::Name(name) => return Some(name),
                other => {
                    debug_log!("read_name() - Unexpected action {:?}", other);
                }
            }
        }
    }

    fn display_rank(&mut self, name: &str, rank: usize) {
        self.message = format!("{name} is now #{rank} on the high score table.");
        self.draw_or_log();
    }

    fn display_save_error(&mut self, error: &GameError) {
        // stderr is hidden behind the alternate screen; keep a record in the log
        log::error!("{error}");
        self.error_message = error.to_string();
        self.draw_or_log();
    }

    fn read_replay(&mut self) -> Option<bool> {
        self.state = TuiState::ConfirmingReplay;
        self.status = "Play again?".to_string();
        loop {
            match self.next_action()? {
                TuiAction::Replay(again) => return Some(again),
                other => {
                    debug_log!("read_replay() - Unexpected action {:?}", other);
                }
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.state = TuiState::Exiting;
        self.message = "Thanks for playing Hangman!".to_string();
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
