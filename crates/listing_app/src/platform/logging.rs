//! Logger setup for the terminal front end.
//!
//! The rendered listing owns stdout, so the default sends records to a file.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const DEFAULT_LOG_FILENAME: &str = "listing.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    #[default]
    File,
    /// Terminal only; warnings and errors go to stderr.
    Terminal,
    Both,
}

/// Most verbose level that still gets written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub destination: LogDestination,
    pub level: LogLevel,
    /// Truncated on startup.
    pub file: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            destination: LogDestination::default(),
            level: LogLevel::default(),
            file: PathBuf::from(DEFAULT_LOG_FILENAME),
        }
    }
}

/// Installs the global logger. A second call is ignored.
pub fn initialize(settings: &LogSettings) {
    let loggers = build_loggers(settings);
    if loggers.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(loggers);
}

fn build_loggers(settings: &LogSettings) -> Vec<Box<dyn SharedLogger>> {
    let level = LevelFilter::from(settings.level);
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(
        settings.destination,
        LogDestination::Terminal | LogDestination::Both
    ) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if matches!(
        settings.destination,
        LogDestination::File | LogDestination::Both
    ) {
        if let Some(file_logger) = create_file_logger(&settings.file, level, config) {
            loggers.push(file_logger);
        }
    }
    loggers
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: could not create log file {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Record};
    use std::fs;
    use tempfile::TempDir;

    fn write(logger: &dyn SharedLogger, level: Level, text: &str) {
        logger.log(
            &Record::builder()
                .args(format_args!("{text}"))
                .level(level)
                .target("listing_app")
                .build(),
        );
        logger.flush();
    }

    #[test]
    fn file_destination_writes_records_at_or_above_the_level() {
        let temp = TempDir::new().unwrap();
        let settings = LogSettings {
            destination: LogDestination::File,
            level: LogLevel::Warn,
            file: temp.path().join(DEFAULT_LOG_FILENAME),
        };

        let loggers = build_loggers(&settings);
        assert_eq!(loggers.len(), 1);
        write(loggers[0].as_ref(), Level::Warn, "fetch failed");
        write(loggers[0].as_ref(), Level::Info, "fetching page 2");

        let written = fs::read_to_string(&settings.file).unwrap();
        assert!(written.contains("fetch failed"), "{written}");
        assert!(!written.contains("fetching page 2"), "{written}");
    }

    #[test]
    fn unwritable_file_leaves_only_the_terminal() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("missing-dir").join(DEFAULT_LOG_FILENAME);

        let only_file = LogSettings {
            destination: LogDestination::File,
            file: file.clone(),
            ..LogSettings::default()
        };
        assert!(build_loggers(&only_file).is_empty());

        let both = LogSettings {
            destination: LogDestination::Both,
            file,
            ..LogSettings::default()
        };
        assert_eq!(build_loggers(&both).len(), 1);
    }

    #[test]
    fn terminal_destination_creates_no_file() {
        let temp = TempDir::new().unwrap();
        let settings = LogSettings {
            destination: LogDestination::Terminal,
            file: temp.path().join(DEFAULT_LOG_FILENAME),
            ..LogSettings::default()
        };
        assert_eq!(build_loggers(&settings).len(), 1);
        assert!(!settings.file.exists());
    }
}
