//! Command-line configuration.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::ProjectDirs;

use crate::scorer::DEFAULT_SCORER_URL;

/// Application name used to resolve the per-user data directory.
const APP_NAME: &str = "bank-ranker";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "bank-ranker.log";
/// Largest `--rows` accepted on the command line.
pub const MAX_INITIAL_ROWS: i64 = 100;

#[derive(Debug, Parser)]
#[command(
    name = "bank-ranker",
    version,
    about = "Collect bank ratio metrics and rank them with a scoring service"
)]
pub struct Cli {
    /// Origin of the scoring service; requests go to `<URL>/calculate`.
    #[arg(long, value_name = "URL", default_value = DEFAULT_SCORER_URL)]
    pub scorer_url: String,

    /// Write logs here instead of the default data directory.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Number of empty bank rows on startup.
    #[arg(
        long,
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..=MAX_INITIAL_ROWS)
    )]
    pub rows: u16,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved settings the binary runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub scorer_url: String,
    pub log_file: PathBuf,
    pub initial_rows: usize,
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> Result<Config> {
        let log_file = match self.log_file {
            Some(path) => path,
            None => default_log_path()?,
        };
        Ok(Config {
            scorer_url: self.scorer_url,
            log_file,
            initial_rows: usize::from(self.rows),
            verbose: self.verbose,
        })
    }
}

/// Resolve the log file path inside the per-user data directory
/// (`~/.local/share/bank-ranker` on Linux).
fn default_log_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| anyhow!("could not locate the user data directory"))?;
    Ok(dirs.data_local_dir().join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_scorer() {
        let cli = Cli::try_parse_from(["bank-ranker", "--log-file", "/tmp/ranker.log"]).unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.scorer_url, "http://127.0.0.1:5000");
        assert_eq!(config.initial_rows, 1);
        assert_eq!(config.log_file, PathBuf::from("/tmp/ranker.log"));
        assert!(!config.verbose);
    }

    #[test]
    fn row_count_outside_bounds_is_rejected() {
        assert!(Cli::try_parse_from(["bank-ranker", "--rows", "0"]).is_err());
        assert!(Cli::try_parse_from(["bank-ranker", "--rows", "101"]).is_err());
        assert!(Cli::try_parse_from(["bank-ranker", "--rows", "65535"]).is_err());
        let cli = Cli::try_parse_from(["bank-ranker", "--rows", "100"]).unwrap();
        assert_eq!(cli.rows, 100);
    }

    #[test]
    fn default_log_lives_in_user_data_dir() {
        let Some(dirs) = ProjectDirs::from("", "", APP_NAME) else {
            return;
        };
        let cli = Cli::try_parse_from(["bank-ranker"]).unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.log_file, dirs.data_local_dir().join("bank-ranker.log"));
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "bank-ranker",
            "--scorer-url",
            "http://scorer.internal:8080/",
            "--rows",
            "3",
            "--log-file",
            "ranker.log",
            "-v",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.scorer_url, "http://scorer.internal:8080/");
        assert_eq!(config.initial_rows, 3);
        assert!(config.verbose);
    }
}
