mod checker;
mod constants;
mod datetime;
mod db;
mod models;
mod seed;
mod telegram;

use std::path::PathBuf;

use tracing::{error, info};

use crate::constants::{DEFAULT_DATABASE_URL, DEFAULT_LOGFILE, LOG_DIRECTIVE};
use crate::db::Database;
use crate::telegram::TelegramNotifier;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    if let Err(e) = initialize_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Initializing run...");

    let mode = match parse_mode(std::env::args().skip(1)) {
        Ok(mode) => mode,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let config = match load_configuration() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let db = match Database::new(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let result = match mode {
        Mode::Run => {
            let notifier = TelegramNotifier::new(config.telegram_token, config.telegram_chat_id);
            checker::run_daily_check(&db, &notifier).await
        }
        Mode::Seed(path) => {
            info!("In seed mode. Reading csv file...");
            seed::seed_from_csv(&db, &path).await.map(|_| ())
        }
    };

    if let Err(e) = result {
        error!("Run failed: {}", e);
        std::process::exit(1);
    }
}

/// Configuration loaded from environment variables
struct Config {
    telegram_token: String,
    telegram_chat_id: String,
    database_url: String,
}

/// Application mode selected on the command line
#[derive(Debug, PartialEq)]
enum Mode {
    /// Perform the daily birthday check (the default, no arguments)
    Run,
    /// Bulk-load records from a csv file: `birfday seed <file.csv>`
    Seed(PathBuf),
}

/// Parse the command-line arguments into a mode
fn parse_mode(mut args: impl Iterator<Item = String>) -> Result<Mode, String> {
    match args.next().as_deref() {
        None => Ok(Mode::Run),
        Some("seed") => match args.next() {
            Some(path) => Ok(Mode::Seed(PathBuf::from(path))),
            None => Err("Seed mode requires a file: birfday seed <file.csv>".to_string()),
        },
        Some(other) => Err(format!(
            "Unknown argument {:?}. Run with no arguments for the daily check, \
             or `seed <file.csv>` to load records.",
            other
        )),
    }
}

/// Initialize the logging system, appending to the configured log file
fn initialize_logging() -> Result<(), models::Error> {
    let logfile = std::env::var("LOGFILE").unwrap_or_else(|_| DEFAULT_LOGFILE.to_string());
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logfile)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Load configuration from environment variables
fn load_configuration() -> Result<Config, models::Error> {
    let telegram_token = std::env::var("TELEGRAM_TOKEN")
        .map_err(|_| "TELEGRAM_TOKEN environment variable not set. Set it with: export TELEGRAM_TOKEN=your_bot_token")?;

    let telegram_chat_id = std::env::var("TELEGRAM_CHAT_ID")
        .map_err(|_| "TELEGRAM_CHAT_ID environment variable not set. Set it with: export TELEGRAM_CHAT_ID=your_chat_id")?;

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    Ok(Config {
        telegram_token,
        telegram_chat_id,
        database_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_no_arguments_selects_run_mode() {
        assert_eq!(parse_mode(args(&[])), Ok(Mode::Run));
    }

    #[test]
    fn test_seed_with_file_selects_seed_mode() {
        assert_eq!(
            parse_mode(args(&["seed", "/tmp/birthdays.csv"])),
            Ok(Mode::Seed(PathBuf::from("/tmp/birthdays.csv")))
        );
    }

    #[test]
    fn test_seed_without_file_is_an_error() {
        assert!(parse_mode(args(&["seed"])).is_err());
    }

    #[test]
    fn test_unknown_argument_is_an_error() {
        assert!(parse_mode(args(&["--frobnicate"])).is_err());
    }
}
