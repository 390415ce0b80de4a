use hangman::cli::{CliInterface, parse_cli};
use hangman::tui::TuiInterface;
use hangman::{FileScoreStore, HighScores, game_loop, info_log, load_words_from_file, logging};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Err(e) = logging::init(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
    }

    let words = match load_words_from_file(&cli.words_path) {
        Ok(words) => words,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("Loaded {} words.", words.len());

    let mut scores = HighScores::load(FileScoreStore::new(&cli.scores_path));

    let seed = cli.seed.unwrap_or_else(rand::random);
    info_log!("Word selection seed: {}", seed);
    let mut rng = Pcg64::seed_from_u64(seed);

    if cli.tui {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to initialize terminal: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&words, &mut scores, &mut rng, &mut interface);
    } else {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&words, &mut scores, &mut rng, &mut interface);
    }

    ExitCode::SUCCESS
}
