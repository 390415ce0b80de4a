// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod highscores;
pub mod logging;
pub mod round;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::GameError;
pub use game_state::{GameInterface, RoundSummary, game_loop, play_round};
pub use highscores::{
    FileScoreStore, HighScores, MAX_HIGH_SCORES, MemoryScoreStore, OfferOutcome, ScoreEntry,
    ScoreStore,
};
pub use round::{GuessOutcome, MAX_ATTEMPTS, Round};
pub use wordbank::{choose_word, load_words_from_file, load_words_from_str};
