use crate::error::GameError;
use crate::info_log;
use crate::round::normalize;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs;
use std::path::Path;

fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Split `data` on whitespace and keep the purely alphabetic tokens, lowercased.
pub fn load_words_from_str(data: &str) -> Vec<String> {
    data.split_whitespace()
        .map(|word| word.chars().map(normalize).collect::<String>())
        .filter(|word| is_valid_word(word))
        .collect()
}

/// Load the word pool from a file.
///
/// # Errors
/// `GameError::MissingWordSource` if the file cannot be read and
/// `GameError::EmptyWordSource` if it holds no usable words.
pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, GameError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| GameError::MissingWordSource {
        path: path.to_path_buf(),
        source,
    })?;
    let words = load_words_from_str(&data);
    if words.is_empty() {
        return Err(GameError::EmptyWordSource {
            path: path.to_path_buf(),
        });
    }
    info_log!("Loaded {} words from '{}'", words.len(), path.display());
    Ok(words)
}

/// Pick a word uniformly at random. `None` only for an empty pool.
pub fn choose_word<'a, R: Rng + ?Sized>(words: &'a [String], rng: &mut R) -> Option<&'a str> {
    words.choose(rng).map(String::as_str)
}
