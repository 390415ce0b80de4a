//! Round engine: the state of a single Hangman round.
//!
//! A round starts with every letter hidden and six attempts. Each new letter
//! either reveals all of its positions (a hit) or costs an attempt (a miss).
//! The round is over once the word is fully revealed or no attempts remain.

use crate::debug_log;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Attempts available at the start of every round.
pub const MAX_ATTEMPTS: u32 = 6;

/// Points awarded per attempt left on a win.
pub const POINTS_PER_ATTEMPT: i64 = 100;

/// Character shown in place of a letter that has not been guessed yet.
pub const PLACEHOLDER: char = '_';

/// Result of submitting one letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter occurs in the word and has been revealed.
    Hit,
    /// The letter is not in the word; one attempt was spent.
    Miss,
    /// The letter was already tried this round. Nothing changed.
    Repeat,
    /// The round had already ended. Nothing changed.
    Finished,
}

#[derive(Debug, Clone)]
pub struct Round {
    word: Vec<char>,
    revealed: Vec<char>,
    guessed: BTreeSet<char>,
    attempts_left: u32,
    started_at: DateTime<Utc>,
}

impl Round {
    /// Start a round for `word`, timing it from now.
    #[must_use]
    pub fn start(word: &str) -> Self {
        Self::start_at(word, Utc::now())
    }

    /// Start a round for `word` with an explicit start time.
    #[must_use]
    pub fn start_at(word: &str, started_at: DateTime<Utc>) -> Self {
        let word: Vec<char> = word.chars().map(normalize).collect();
        debug_log!("Round::start_at() - {} letters", word.len());
        Self {
            revealed: vec![PLACEHOLDER; word.len()],
            word,
            guessed: BTreeSet::new(),
            attempts_left: MAX_ATTEMPTS,
            started_at,
        }
    }

    pub fn submit_guess(&mut self, letter: char) -> GuessOutcome {
        if self.is_over() {
            return GuessOutcome::Finished;
        }

        let letter = normalize(letter);
        if !self.guessed.insert(letter) {
            return GuessOutcome::Repeat;
        }

        let mut hit = false;
        for (slot, &actual) in self.revealed.iter_mut().zip(&self.word) {
            if actual == letter {
                *slot = actual;
                hit = true;
            }
        }

        if hit {
            debug_log!("Round::submit_guess() - '{}' hit", letter);
            GuessOutcome::Hit
        } else {
            self.attempts_left -= 1;
            debug_log!(
                "Round::submit_guess() - '{}' missed, {} attempts left",
                letter,
                self.attempts_left
            );
            GuessOutcome::Miss
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.attempts_left == 0 || self.is_won()
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.revealed == self.word
    }

    /// Score for the round, measured against the current time.
    #[must_use]
    pub fn final_score(&self) -> i64 {
        self.final_score_at(Utc::now())
    }

    /// Score for the round as of `finished_at`.
    ///
    /// A win is worth 100 points per attempt left, minus one point per whole
    /// second taken. Slow wins can therefore score zero or less. A loss is
    /// always worth 0.
    #[must_use]
    pub fn final_score_at(&self, finished_at: DateTime<Utc>) -> i64 {
        if !self.is_won() {
            return 0;
        }
        i64::from(self.attempts_left) * POINTS_PER_ATTEMPT - self.elapsed_secs(finished_at)
    }

    /// Whole seconds between the start of the round and `now`.
    #[must_use]
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.started_at).num_seconds()
    }

    /// The revealed pattern, e.g. `c_t`.
    #[must_use]
    pub fn pattern(&self) -> String {
        self.revealed.iter().collect()
    }

    #[must_use]
    pub fn word(&self) -> String {
        self.word.iter().collect()
    }

    #[must_use]
    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    #[must_use]
    pub fn wrong_guesses(&self) -> u32 {
        MAX_ATTEMPTS - self.attempts_left
    }

    /// Letters tried so far, in alphabetical order.
    #[must_use]
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    #[must_use]
    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&normalize(letter))
    }
}

/// Lowercase a single letter. Words and guesses both go through this, so a
/// guess always compares equal to the letter stored in the word.
///
/// Multi-char lowercase forms (rare) fall back to the original letter.
#[must_use]
pub fn normalize(letter: char) -> char {
    let mut lower = letter.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => letter,
    }
}
