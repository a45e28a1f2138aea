//! Tracing subscriber setup shared by both binaries.

use std::fs::File;

use anyhow::Context;
use time::{
    format_description::{self, parse},
    OffsetDateTime,
};
use tracing::{subscriber::set_global_default, Level};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, FmtSubscriber};

use crate::configuration::Configuration;

/// Where logs go when file logging is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Console {
    /// The server has stdout to itself.
    Stdout,
    /// The terminal client prints the game on stdout, so logs go to stderr.
    Stderr,
}

/// Installs the global tracing subscriber of the server.
///
/// Logs go to a timestamped file when `config.log` is set, to stdout otherwise.
pub fn init_logger(config: &Configuration) -> anyhow::Result<()> {
    install(config, Console::Stdout)
}

/// Installs the global tracing subscriber of the terminal client.
///
/// Logs go to a timestamped file when `config.log` is set, to stderr at INFO level otherwise, so
/// network warnings stay visible without debug output cluttering the game.
pub fn init_client_logger(config: &Configuration) -> anyhow::Result<()> {
    install(config, Console::Stderr)
}

fn install(config: &Configuration, console: Console) -> anyhow::Result<()> {
    let writer = if config.log {
        let file_name = get_log_file_name()?;
        let file = File::create(&file_name)
            .with_context(|| format!("cannot create log file '{file_name}'"))?;
        BoxMakeWriter::new(file)
    } else {
        match console {
            Console::Stdout => BoxMakeWriter::new(std::io::stdout),
            Console::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    };
    let local_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = tracing_subscriber::fmt::time::OffsetTime::new(
        local_offset,
        format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")?,
    );

    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level(config, console))
        .with_ansi(!config.log)
        .with_timer(timer)
        .with_writer(writer)
        .finish();

    set_global_default(subscriber)
        .context("Could not set global default tracing subscriber. Consider disabling logs if you are already setting a subscriber.")
}

fn max_level(config: &Configuration, console: Console) -> Level {
    match (config.log, console) {
        (false, Console::Stderr) => Level::INFO,
        _ if config.verbose => Level::DEBUG,
        _ => Level::INFO,
    }
}

fn get_log_file_name() -> anyhow::Result<String> {
    let format = parse("[year]-[month]-[day]_[hour]:[minute]:[second]_log.txt")?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    Ok(now.format(&format)?)
}

#[cfg(test)]
mod logger_tests {
    use super::*;

    #[test]
    fn client_console_never_goes_below_info() {
        let verbose = Configuration::new().with_verbose(true);
        assert_eq!(max_level(&verbose, Console::Stderr), Level::INFO);
        assert_eq!(
            max_level(&verbose.clone().with_verbose(false), Console::Stderr),
            Level::INFO
        );
    }

    #[test]
    fn verbose_applies_to_server_and_files() {
        let verbose = Configuration::new().with_verbose(true);
        assert_eq!(max_level(&verbose, Console::Stdout), Level::DEBUG);
        assert_eq!(
            max_level(&verbose.clone().with_log(true), Console::Stderr),
            Level::DEBUG
        );
        let quiet = Configuration::new().with_verbose(false);
        assert_eq!(max_level(&quiet, Console::Stdout), Level::INFO);
    }

    #[test]
    fn log_file_name_is_timestamped() {
        let name = get_log_file_name().unwrap();
        assert!(name.ends_with("_log.txt"));
        assert_eq!(name.len(), "2024-01-01_00:00:00_log.txt".len());
    }
}
