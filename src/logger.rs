use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("could not open log file: {0}")]
    Open(#[from] io::Error),
    #[error("{0}")]
    AlreadySet(#[from] SetLoggerError),
}

/// Appends one `level, message, file:line` line per record to a file.
pub struct FileLogger {
    file_output: Mutex<File>,
    level: LevelFilter,
}

impl FileLogger {
    pub fn open(path: &Path, level: LevelFilter) -> io::Result<Self> {
        Ok(FileLogger {
            file_output: Mutex::new(OpenOptions::new().create(true).append(true).open(path)?),
            level,
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format!(
            "{}, {}, {}:{}",
            record.level(),
            record.args(),
            record.file().unwrap_or("<unknown>"),
            record.line().unwrap_or(0)
        );
        if let Ok(mut file_handle) = self.file_output.lock() {
            let _ = writeln!(file_handle, "{}", message);
            let _ = file_handle.flush();
        }
    }

    fn flush(&self) {
        if let Ok(mut file_handle) = self.file_output.lock() {
            let _ = file_handle.flush();
        }
    }
}

/// Installs a `FileLogger` as the global logger.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), LoggerError> {
    let logger = FileLogger::open(path, level)?;
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}

/// Installs the logger `config` asks for. Returns `false` if it doesn't name a log file.
pub fn init_from_config(config: &Config) -> Result<bool, LoggerError> {
    match &config.log_file {
        Some(path) => init(path, config.log_level).map(|()| true),
        None => Ok(false),
    }
}
