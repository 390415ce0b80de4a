use crate::error::GameError;
use crate::highscores::{HighScores, OfferOutcome, ScoreEntry, ScoreStore};
use crate::round::{GuessOutcome, Round};
use crate::wordbank::choose_word;
use crate::{debug_log, info_log};
use chrono::Utc;
use rand::Rng;

/// Outcome of one finished round, as reported to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub word: String,
    pub won: bool,
    pub score: i64,
    pub elapsed_secs: i64,
}

/// Trait for game interface implementations (CLI, TUI, etc.)
///
/// Every `read_*` method returns `None` once input is exhausted or the
/// player asks to quit, which ends the session.
pub trait GameInterface {
    fn display_high_scores(&mut self, entries: &[ScoreEntry]);
    fn display_round_start(&mut self, round: &Round);
    fn read_letter(&mut self, round: &Round) -> Option<char>;
    fn display_guess_outcome(&mut self, round: &Round, letter: char, outcome: GuessOutcome);
    fn display_round_result(&mut self, summary: &RoundSummary);
    fn read_name(&mut self, score: i64) -> Option<String>;
    fn display_rank(&mut self, name: &str, rank: usize);
    fn display_save_error(&mut self, error: &GameError);
    fn read_replay(&mut self) -> Option<bool>;
    fn display_exit_message(&mut self);
}

/// Play one round with `word`. Returns `None` if input ran out mid-round.
pub fn play_round<I: GameInterface + ?Sized>(word: &str, interface: &mut I) -> Option<RoundSummary> {
    let mut round = Round::start(word);
    interface.display_round_start(&round);

    while !round.is_over() {
        let letter = interface.read_letter(&round)?;
        let outcome = round.submit_guess(letter);
        debug_log!("play_round() - '{}' -> {:?}", letter, outcome);
        interface.display_guess_outcome(&round, letter, outcome);
    }

    let finished_at = Utc::now();
    Some(RoundSummary {
        word: round.word(),
        won: round.is_won(),
        score: round.final_score_at(finished_at),
        elapsed_secs: round.elapsed_secs(finished_at),
    })
}

/// Offer a won round to the leaderboard, asking for the player's name only
/// when the score would actually make the table.
///
/// Returns `false` if input ran out while asking for the name.
pub fn record_score<S, I>(summary: &RoundSummary, scores: &mut HighScores<S>, interface: &mut I) -> bool
where
    S: ScoreStore,
    I: GameInterface + ?Sized,
{
    if !summary.won || !scores.qualifies(summary.score) {
        return true;
    }

    let Some(name) = interface.read_name(summary.score) else {
        return false;
    };

    match scores.offer(&name, summary.score) {
        OfferOutcome::Ranked { rank, saved } => {
            if let Err(e) = saved {
                interface.display_save_error(&e);
            }
            interface.display_rank(&name, rank);
            interface.display_high_scores(scores.snapshot());
        }
        OfferOutcome::Rejected | OfferOutcome::Unranked => {}
    }
    true
}

/// Run rounds until the player declines to play again or input ends.
pub fn game_loop<S, R, I>(words: &[String], scores: &mut HighScores<S>, rng: &mut R, interface: &mut I)
where
    S: ScoreStore,
    R: Rng + ?Sized,
    I: GameInterface + ?Sized,
{
    interface.display_high_scores(scores.snapshot());

    loop {
        let Some(word) = choose_word(words, rng) else {
            log::error!("Word pool is empty");
            break;
        };
        info_log!("game_loop() - Starting round with a {}-letter word", word.chars().count());

        let Some(summary) = play_round(word, interface) else {
            break;
        };
        info_log!(
            "game_loop() - Round over: won={} score={} elapsed={}s",
            summary.won,
            summary.score,
            summary.elapsed_secs
        );
        interface.display_round_result(&summary);

        if !record_score(&summary, scores, interface) {
            break;
        }

        match interface.read_replay() {
            Some(true) => {}
            Some(false) | None => break,
        }
    }

    interface.display_exit_message();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use std::collections::VecDeque;

    /// Scripted interface that records what the game asked it to show.
    #[derive(Default)]
    struct ScriptedInterface {
        letters: VecDeque<char>,
        names: VecDeque<String>,
        replies: VecDeque<bool>,
        outcomes: Vec<GuessOutcome>,
        results: Vec<RoundSummary>,
        ranks: Vec<usize>,
        save_errors: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(letters: &str, names: &[&str], replies: &[bool]) -> Self {
            Self {
                letters: letters.chars().collect(),
                names: names.iter().map(|n| (*n).to_string()).collect(),
                replies: replies.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_high_scores(&mut self, _entries: &[ScoreEntry]) {}
        fn display_round_start(&mut self, _round: &Round) {}
        fn read_letter(&mut self, _round: &Round) -> Option<char> {
            self.letters.pop_front()
        }
        fn display_guess_outcome(&mut self, _round: &Round, _letter: char, outcome: GuessOutcome) {
            self.outcomes.push(outcome);
        }
        fn display_round_result(&mut self, summary: &RoundSummary) {
            self.results.push(summary.clone());
        }
        fn read_name(&mut self, _score: i64) -> Option<String> {
            self.names.pop_front()
        }
        fn display_rank(&mut self, _name: &str, rank: usize) {
            self.ranks.push(rank);
        }
        fn display_save_error(&mut self, _error: &GameError) {
            self.save_errors += 1;
        }
        fn read_replay(&mut self) -> Option<bool> {
            self.replies.pop_front()
        }
        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn cat_pool() -> Vec<String> {
        vec!["cat".to_string()]
    }

    #[test]
    fn test_play_round_cat_scenario() {
        let mut ui = ScriptedInterface::new("ctxa", &[], &[]);
        let summary = play_round("cat", &mut ui).unwrap();
        assert_eq!(
            ui.outcomes,
            vec![
                GuessOutcome::Hit,
                GuessOutcome::Hit,
                GuessOutcome::Miss,
                GuessOutcome::Hit
            ]
        );
        assert!(summary.won);
        assert_eq!(summary.word, "cat");
        assert_eq!(summary.score, 500 - summary.elapsed_secs);
    }

    #[test]
    fn test_play_round_loss() {
        let mut ui = ScriptedInterface::new("qwerty", &[], &[]);
        let summary = play_round("cat", &mut ui).unwrap();
        assert!(!summary.won);
        assert_eq!(summary.score, 0);
        assert_eq!(ui.outcomes.len(), 6);
    }

    #[test]
    fn test_play_round_input_closed() {
        let mut ui = ScriptedInterface::new("c", &[], &[]);
        assert!(play_round("cat", &mut ui).is_none());
    }

    #[test]
    fn test_game_loop_records_win() {
        let store = MemoryScoreStore::new();
        let mut scores = HighScores::load(&store);
        let mut rng = Pcg64::seed_from_u64(1);
        let mut ui = ScriptedInterface::new("cat", &["alice"], &[false]);

        game_loop(&cat_pool(), &mut scores, &mut rng, &mut ui);

        assert!(ui.exited);
        assert_eq!(ui.ranks, vec![1]);
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].name, "alice");
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_game_loop_loss_does_not_ask_for_name() {
        let store = MemoryScoreStore::new();
        let mut scores = HighScores::load(&store);
        let mut rng = Pcg64::seed_from_u64(1);
        let mut ui = ScriptedInterface::new("qwerty", &["nobody"], &[false]);

        game_loop(&cat_pool(), &mut scores, &mut rng, &mut ui);

        assert_eq!(ui.names.len(), 1);
        assert!(scores.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_game_loop_replays() {
        let store = MemoryScoreStore::new();
        let mut scores = HighScores::load(&store);
        let mut rng = Pcg64::seed_from_u64(1);
        let mut ui = ScriptedInterface::new("catcat", &["a", "b"], &[true, false]);

        game_loop(&cat_pool(), &mut scores, &mut rng, &mut ui);

        assert_eq!(ui.results.len(), 2);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores.snapshot()[0].name, "a");
    }

    #[test]
    fn test_game_loop_skips_name_for_unranked_score() {
        let full: Vec<ScoreEntry> = (0..10).map(|i| ScoreEntry::new(format!("p{i}"), 10_000)).collect();
        let store = MemoryScoreStore::with_entries(full);
        let mut scores = HighScores::load(&store);
        let mut rng = Pcg64::seed_from_u64(1);
        let mut ui = ScriptedInterface::new("cat", &["late"], &[false]);

        game_loop(&cat_pool(), &mut scores, &mut rng, &mut ui);

        assert_eq!(ui.names.len(), 1);
        assert!(ui.ranks.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_game_loop_stops_when_input_closes() {
        let store = MemoryScoreStore::new();
        let mut scores = HighScores::load(&store);
        let mut rng = Pcg64::seed_from_u64(1);
        let mut ui = ScriptedInterface::new("", &[], &[]);

        game_loop(&cat_pool(), &mut scores, &mut rng, &mut ui);

        assert!(ui.exited);
        assert!(ui.results.is_empty());
    }
}
