use crate::error::GameError;
use crate::game_state::{GameInterface, RoundSummary};
use crate::highscores::ScoreEntry;
use crate::debug_log;
use crate::round::{GuessOutcome, MAX_ATTEMPTS, Round};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Hangman CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a whitespace-delimited word list
    #[arg(short = 'w', long = "words", default_value = "words.txt")]
    pub words_path: PathBuf,

    /// Path to the high score file
    #[arg(short = 's', long = "scores", default_value = "high_scores.txt")]
    pub scores_path: PathBuf,

    /// Seed for word selection (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Write log records to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Gallows drawing for the given number of wrong guesses.
#[must_use]
pub fn gallows_lines(wrong_guesses: u32) -> [String; 6] {
    let part = |n: u32, drawn: &'static str| if wrong_guesses >= n { drawn } else { " " };
    [
        "  +---+".to_string(),
        "  |   |".to_string(),
        format!("  {}   |", part(1, "O")),
        format!(" {}{}{}  |", part(3, "/"), part(2, "|"), part(4, "\\")),
        format!(" {} {}  |", part(5, "/"), part(6, "\\")),
        "=======".to_string(),
    ]
}

/// Pattern with spaces between letters, e.g. `c _ t`.
#[must_use]
pub fn spaced_pattern(round: &Round) -> String {
    let letters: Vec<String> = round.pattern().chars().map(String::from).collect();
    letters.join(" ")
}

#[must_use]
pub fn guessed_list(round: &Round) -> String {
    let letters: Vec<String> = round.guessed_letters().iter().map(char::to_string).collect();
    letters.join(", ")
}

// UI Input/Output functions

pub enum LetterInput {
    Valid(char),
    Invalid,
    Closed,
}

pub enum ReplayInput {
    Yes,
    No,
    Invalid,
    Closed,
}

fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            debug_log!("read_trimmed_line() - Read error: {}", e);
            None
        }
    }
}

// First non-whitespace character of the line; the rest is ignored.
fn parse_letter(input: &str) -> Option<char> {
    input.trim_start().chars().next().filter(|c| c.is_alphabetic())
}

fn parse_replay(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "y" | "yes" | "t" | "tak" => Some(true),
        "" => None,
        _ => Some(false),
    }
}

pub fn display_high_scores(entries: &[ScoreEntry]) {
    println!("\n=== High Scores ===");
    if entries.is_empty() {
        println!("(no scores yet)");
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("{}. {} - {} pts", i + 1, entry.name, entry.score);
    }
    println!("===================");
}

pub fn display_round_start(round: &Round) {
    println!("\nNew round! The word has {} letters.", round.pattern().chars().count());
}

pub fn display_round(round: &Round) {
    for line in gallows_lines(round.wrong_guesses()) {
        println!("{line}");
    }
    println!("Word: {}", spaced_pattern(round));
    if !round.guessed_letters().is_empty() {
        println!("Guessed: {}", guessed_list(round));
    }
}

pub fn read_letter<R: BufRead>(reader: &mut R, attempts_left: u32) -> LetterInput {
    println!("Attempts left: {attempts_left}/{MAX_ATTEMPTS}. Enter a letter:");
    let Some(input) = read_trimmed_line(reader) else {
        return LetterInput::Closed;
    };
    match parse_letter(&input) {
        Some(letter) => LetterInput::Valid(letter),
        None => {
            println!("Invalid guess. Please enter a letter.");
            LetterInput::Invalid
        }
    }
}

pub fn display_guess_outcome(round: &Round, letter: char, outcome: GuessOutcome) {
    match outcome {
        GuessOutcome::Hit => println!("Yes! '{letter}' is in the word: {}", spaced_pattern(round)),
        GuessOutcome::Miss => println!("No '{letter}' in the word."),
        GuessOutcome::Repeat => println!("You already guessed '{letter}'."),
        GuessOutcome::Finished => println!("The round is already over."),
    }
}

pub fn display_round_result(summary: &RoundSummary) {
    if summary.won {
        println!("\nCongratulations! You guessed the word: {}", summary.word);
        println!("Your score: {} pts ({}s)", summary.score, summary.elapsed_secs);
    } else {
        println!("\nOut of attempts. The word was: {}", summary.word);
    }
}

pub fn read_name<R: BufRead>(reader: &mut R, score: i64) -> Option<String> {
    loop {
        println!("You made the high score table with {score} pts! Enter your name:");
        let input = read_trimmed_line(reader)?;
        if input.is_empty() {
            println!("Name cannot be empty.");
            continue;
        }
        return Some(input);
    }
}

pub fn display_rank(name: &str, rank: usize) {
    println!("{name} is now #{rank} on the high score table.");
}

#[must_use]
pub fn save_error_message(error: &GameError) -> String {
    format!("Error: {error} (scores kept for this session)")
}

pub fn display_save_error(error: &GameError) {
    eprintln!("{}", save_error_message(error));
}

pub fn read_replay<R: BufRead>(reader: &mut R) -> ReplayInput {
    println!("Play again? (y/n):");
    let Some(input) = read_trimmed_line(reader) else {
        return ReplayInput::Closed;
    };
    match parse_replay(&input) {
        Some(true) => ReplayInput::Yes,
        Some(false) => ReplayInput::No,
        None => ReplayInput::Invalid,
    }
}

pub fn display_exit_message() {
    println!("Thanks for playing Hangman!");
}

/// CLI implementation of the `GameInterface` trait
/// This struct wraps a `BufRead` reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_high_scores(&mut self, entries: &[ScoreEntry]) {
        display_high_scores(entries);
    }

    fn display_round_start(&mut self, round: &Round) {
        display_round_start(round);
    }

    fn read_letter(&mut self, round: &Round) -> Option<char> {
        loop {
            display_round(round);
            match read_letter(&mut self.reader, round.attempts_left()) {
                LetterInput::Valid(letter) => return Some(letter),
                LetterInput::Invalid => {}
                LetterInput::Closed => return None,
            }
        }
    }

    fn display_guess_outcome(&mut self, round: &Round, letter: char, outcome: GuessOutcome) {
        display_guess_outcome(round, letter, outcome);
    }

    fn display_round_result(&mut self, summary: &RoundSummary) {
        display_round_result(summary);
    }

    fn read_name(&mut self, score: i64) -> Option<String> {
        read_name(&mut self.reader, score)
    }

    fn display_rank(&mut self, name: &str, rank: usize) {
        display_rank(name, rank);
    }

    fn display_save_error(&mut self, error: &GameError) {
        display_save_error(error);
    }

    fn read_replay(&mut self) -> Option<bool> {
        loop {
            match read_replay(&mut self.reader) {
                ReplayInput::Yes => return Some(true),
                ReplayInput::No => return Some(false),
                ReplayInput::Invalid => {}
                ReplayInput::Closed => return None,
            }
        }
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["hangman"]);
        assert_eq!(cli.words_path, PathBuf::from("words.txt"));
        assert_eq!(cli.scores_path, PathBuf::from("high_scores.txt"));
        assert_eq!(cli.seed, None);
        assert!(!cli.tui);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_cli_with_paths_and_seed() {
        let cli = Cli::parse_from([
            "hangman",
            "--words",
            "/tmp/w.txt",
            "-s",
            "/tmp/s.txt",
            "--seed",
            "42",
            "--tui",
            "--log-file",
            "/tmp/hangman.log",
        ]);
        assert_eq!(cli.words_path, PathBuf::from("/tmp/w.txt"));
        assert_eq!(cli.scores_path, PathBuf::from("/tmp/s.txt"));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.tui);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/hangman.log")));
    }

    #[test]
    fn test_parse_letter() {
        assert_eq!(parse_letter("a"), Some('a'));
        assert_eq!(parse_letter("Z"), Some('Z'));
        assert_eq!(parse_letter("ż"), Some('ż'));
        assert_eq!(parse_letter(""), None);
        assert_eq!(parse_letter("ab"), Some('a'));
        assert_eq!(parse_letter("  q"), Some('q'));
        assert_eq!(parse_letter("a1"), Some('a'));
        assert_eq!(parse_letter("3"), None);
        assert_eq!(parse_letter("?"), None);
    }

    #[test]
    fn test_parse_replay() {
        assert_eq!(parse_replay("y"), Some(true));
        assert_eq!(parse_replay("YES"), Some(true));
        assert_eq!(parse_replay("t"), Some(true));
        assert_eq!(parse_replay("n"), Some(false));
        assert_eq!(parse_replay("whatever"), Some(false));
        assert_eq!(parse_replay(""), None);
    }

    #[test]
    fn test_read_letter_valid() {
        let mut reader = Cursor::new("  c  \n");
        match read_letter(&mut reader, 6) {
            LetterInput::Valid(c) => assert_eq!(c, 'c'),
            _ => panic!("Expected Valid letter"),
        }
    }

    #[test]
    fn test_read_letter_takes_first_character() {
        let mut reader = Cursor::new("cat
");
        match read_letter(&mut reader, 6) {
            LetterInput::Valid(c) => assert_eq!(c, 'c'),
            _ => panic!("Expected first letter of the line"),
        }
    }

    #[test]
    fn test_read_letter_invalid() {
        let mut reader = Cursor::new("7up
");
        assert!(matches!(read_letter(&mut reader, 6), LetterInput::Invalid));
    }

    #[test]
    fn test_interface_read_letter_uses_first_character_of_word() {
        let round = Round::start("cat");
        let mut interface = CliInterface::new(Cursor::new("cat
"));
        assert_eq!(interface.read_letter(&round), Some('c'));
    }

    #[test]
    fn test_save_error_message() {
        let error = GameError::ScorePersistence {
            path: PathBuf::from("high_scores.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = save_error_message(&error);
        assert!(message.starts_with("Error: cannot save high scores to 'high_scores.txt'"));
        assert_eq!(message.matches("denied").count(), 1);
    }

    #[test]
    fn test_read_letter_closed() {
        let mut reader = Cursor::new("");
        assert!(matches!(read_letter(&mut reader, 6), LetterInput::Closed));
    }

    #[test]
    fn test_read_name_skips_blank_lines() {
        let mut reader = Cursor::new("\n   \nAlice Smith\n");
        assert_eq!(read_name(&mut reader, 100), Some("Alice Smith".to_string()));
    }

    #[test]
    fn test_read_name_closed() {
        let mut reader = Cursor::new("\n");
        assert_eq!(read_name(&mut reader, 100), None);
    }

    #[test]
    fn test_interface_read_letter_retries_invalid_input() {
        let round = Round::start("cat");
        let mut interface = CliInterface::new(Cursor::new("12\n\nx\n"));
        assert_eq!(interface.read_letter(&round), Some('x'));
    }

    #[test]
    fn test_interface_read_replay_retries_blank_input() {
        let mut interface = CliInterface::new(Cursor::new("\n\nn\n"));
        assert_eq!(interface.read_replay(), Some(false));

        let mut interface = CliInterface::new(Cursor::new("tak\n"));
        assert_eq!(interface.read_replay(), Some(true));

        let mut interface = CliInterface::new(Cursor::new(""));
        assert_eq!(interface.read_replay(), None);
    }

    #[test]
    fn test_gallows_lines() {
        let empty = gallows_lines(0);
        assert!(!empty.iter().any(|l| l.contains('O')));

        let full = gallows_lines(MAX_ATTEMPTS);
        assert!(full[2].contains('O'));
        assert!(full[3].contains("/|\\"));
        assert!(full[4].contains("/ \\"));
    }

    #[test]
    fn test_spaced_pattern_and_guessed_list() {
        let mut round = Round::start("cat");
        round.submit_guess('t');
        round.submit_guess('b');
        assert_eq!(spaced_pattern(&round), "_ _ t");
        assert_eq!(guessed_list(&round), "b, t");
    }
}
