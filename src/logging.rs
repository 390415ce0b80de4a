// Logger setup plus conditional logging macros - only active in debug builds

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Initialise `env_logger`, filtered by `RUST_LOG` (default `warn`).
///
/// With `log_file` set, records go to that file instead of stderr so they
/// do not tear the full-screen interface.
///
/// # Errors
/// Returns the I/O error if the log file cannot be created.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // A second init (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
    Ok(())
}
