use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors surfaced by the word source and the score store.
#[derive(Debug)]
pub enum GameError {
    /// The word list could not be read. Fatal.
    MissingWordSource { path: PathBuf, source: io::Error },
    /// The word list was readable but contained no usable words. Fatal.
    EmptyWordSource { path: PathBuf },
    /// The score file could not be written. The in-memory leaderboard is kept.
    ScorePersistence { path: PathBuf, source: io::Error },
}

impl GameError {
    /// Whether the game has to stop because of this error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ScorePersistence { .. })
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWordSource { path, source } => {
                write!(f, "cannot read word list '{}': {source}", path.display())
            }
            Self::EmptyWordSource { path } => {
                write!(f, "word list '{}' contains no words", path.display())
            }
            Self::ScorePersistence { path, source } => {
                write!(f, "cannot save high scores to '{}': {source}", path.display())
            }
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingWordSource { source, .. } | Self::ScorePersistence { source, .. } => {
                Some(source)
            }
            Self::EmptyWordSource { .. } => None,
        }
    }
}
