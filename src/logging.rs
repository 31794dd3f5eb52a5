// Conditional logging macros - only active in debug builds

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
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
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const LOG_FILE_NAME: &str = "hangman.log";
const DEFAULT_FILTER: &str = "warn";

/// Where log records are written.
pub enum LogTarget {
    Stderr,
    /// Used while the terminal UI owns the screen.
    File(PathBuf),
}

/// `<cache dir>/hangman/hangman.log`, when the platform has a cache directory.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("hangman").join(LOG_FILE_NAME))
}

/// Installs the global logger. The level comes from `RUST_LOG` and defaults to
/// warnings only.
pub fn init_logging(target: LogTarget) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let LogTarget::File(path) = target {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_ends_with_file_name() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("hangman/hangman.log"));
        }
    }

    #[test]
    fn test_file_target_creates_log_file() {
        let dir = std::env::temp_dir().join("hangman_logging_test");
        let path = dir.join(LOG_FILE_NAME);
        let _ = fs::remove_dir_all(&dir);

        // Only one logger can be installed per process; the file is created
        // before installation either way.
        let _ = init_logging(LogTarget::File(path.clone()));
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
