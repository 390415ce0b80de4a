//! High score leaderboard
//!
//! Keeps the ten best scores, highest first, and writes them back to the
//! score store after every change.

use crate::error::GameError;
use crate::{debug_log, info_log};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: i64,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: i64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Parse a `<name> <score>` line. The score is the last
    /// whitespace-separated token; everything before it is the name.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let (name, score) = line.trim().rsplit_once(char::is_whitespace)?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let score = score.parse().ok()?;
        Some(Self::new(name, score))
    }

    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{} {}", self.name, self.score)
    }
}

/// Parse every well-formed line of a score file, skipping the rest.
#[must_use]
pub fn parse_scores(data: &str) -> Vec<ScoreEntry> {
    data.lines().filter_map(ScoreEntry::parse_line).collect()
}

/// Render entries in the score file format, one per line.
#[must_use]
pub fn format_scores(entries: &[ScoreEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.to_line() + "\n")
        .collect()
}

/// Backing storage for the leaderboard.
pub trait ScoreStore {
    /// Read stored entries. An absent or unreadable store yields no entries.
    fn load(&self) -> Vec<ScoreEntry>;

    /// Replace the stored entries with `entries`.
    ///
    /// # Errors
    /// Returns `GameError::ScorePersistence` if the store cannot be written.
    fn save(&self, entries: &[ScoreEntry]) -> Result<(), GameError>;
}

/// Plain-text score file, one `<name> <score>` pair per line.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Vec<ScoreEntry> {
        match fs::read_to_string(&self.path) {
            Ok(data) => parse_scores(&data),
            Err(e) => {
                info_log!(
                    "FileScoreStore::load() - No scores read from '{}': {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[ScoreEntry]) -> Result<(), GameError> {
        fs::write(&self.path, format_scores(entries)).map_err(|source| {
            GameError::ScorePersistence {
                path: self.path.clone(),
                source,
            }
        })
    }
}

/// In-memory store, handy for tests and for running without a score file.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    entries: RefCell<Vec<ScoreEntry>>,
    saves: RefCell<usize>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(entries: Vec<ScoreEntry>) -> Self {
        Self {
            entries: RefCell::new(entries),
            saves: RefCell::new(0),
        }
    }

    #[must_use]
    pub fn entries(&self) -> Vec<ScoreEntry> {
        self.entries.borrow().clone()
    }

    /// Number of times `save` has been called.
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Vec<ScoreEntry> {
        self.entries()
    }

    fn save(&self, entries: &[ScoreEntry]) -> Result<(), GameError> {
        *self.entries.borrow_mut() = entries.to_vec();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for &S {
    fn load(&self) -> Vec<ScoreEntry> {
        (**self).load()
    }

    fn save(&self, entries: &[ScoreEntry]) -> Result<(), GameError> {
        (**self).save(entries)
    }
}

/// What happened to a score offered to the leaderboard.
#[derive(Debug)]
pub enum OfferOutcome {
    /// Score was zero or negative; nothing changed.
    Rejected,
    /// Score was positive but too low to make the table; nothing changed.
    Unranked,
    /// Entry was added at `rank` (1-indexed). `saved` is the result of
    /// writing the new table to the store; reporting a failure is left to
    /// the caller.
    Ranked {
        rank: usize,
        saved: Result<(), GameError>,
    },
}

/// High score leaderboard
#[derive(Debug)]
pub struct HighScores<S: ScoreStore> {
    entries: Vec<ScoreEntry>,
    store: S,
}

impl<S: ScoreStore> HighScores<S> {
    /// Load the leaderboard from `store`.
    ///
    /// Stored entries are re-ranked and cut to `MAX_HIGH_SCORES`, so a
    /// hand-edited file cannot break the ordering.
    pub fn load(store: S) -> Self {
        let mut entries = store.load();
        rank_entries(&mut entries);
        info_log!("HighScores::load() - Loaded {} high scores", entries.len());
        Self { entries, store }
    }

    /// Check if a score qualifies for the leaderboard
    #[must_use]
    pub fn qualifies(&self, score: i64) -> bool {
        if score <= 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Ties go below existing entries, so a tie with the last entry is evicted
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    #[must_use]
    pub fn potential_rank(&self, score: i64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Offer a finished round's score to the leaderboard.
    ///
    /// Positive scores are appended, the table is re-sorted (stable, so
    /// earlier entries win ties) and cut to `MAX_HIGH_SCORES`. The store is
    /// rewritten only when the table actually changed.
    pub fn offer(&mut self, name: &str, score: i64) -> OfferOutcome {
        if score <= 0 {
            debug_log!("HighScores::offer() - Rejected non-positive score {}", score);
            return OfferOutcome::Rejected;
        }

        let index = self.entries.len();
        self.entries.push(ScoreEntry::new(name, score));
        let order = rank_entries_tracking(&mut self.entries, index);

        let Some(position) = order else {
            debug_log!("HighScores::offer() - Score {} did not rank", score);
            return OfferOutcome::Unranked;
        };

        let saved = self.store.save(&self.entries);
        match &saved {
            Ok(()) => {
                info_log!(
                    "HighScores::offer() - '{}' ranked #{} with {}",
                    name,
                    position + 1,
                    score
                );
            }
            Err(e) => {
                debug_log!("HighScores::offer() - Save failed: {}", e);
            }
        }

        OfferOutcome::Ranked {
            rank: position + 1,
            saved,
        }
    }

    /// Current entries, highest score first.
    #[must_use]
    pub fn snapshot(&self) -> &[ScoreEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    #[must_use]
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn rank_entries(entries: &mut Vec<ScoreEntry>) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_HIGH_SCORES);
}

// Sorts like `rank_entries` and reports where the entry at `index` ended up,
// or None if it was cut.
fn rank_entries_tracking(entries: &mut Vec<ScoreEntry>, index: usize) -> Option<usize> {
    let mut tagged: Vec<(usize, ScoreEntry)> = entries.drain(..).enumerate().collect();
    tagged.sort_by(|a, b| b.1.score.cmp(&a.1.score));
    tagged.truncate(MAX_HIGH_SCORES);
    let position = tagged.iter().position(|(i, _)| *i == index);
    entries.extend(tagged.into_iter().map(|(_, entry)| entry));
    position
}
