//! Logger installation for the command-line tool

use crate::io::error::{Result, WithPath};
use crate::io::progress::suspend_bars;
use log::{Log, Metadata, Record};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::path::Path;

// Terminal logger that clears progress bars while it writes a line
struct BarAwareLogger {
    inner: Box<TermLogger>,
}

impl BarAwareLogger {
    fn new(level: LevelFilter) -> Self {
        Self {
            inner: TermLogger::new(
                level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            ),
        }
    }
}

impl Log for BarAwareLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            suspend_bars(|| self.inner.log(record));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

impl SharedLogger for BarAwareLogger {
    fn level(&self) -> LevelFilter {
        self.inner.level()
    }

    fn config(&self) -> Option<&Config> {
        self.inner.config()
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        self
    }
}

/// Log level for the `--quiet` / `--verbose` flags
pub const fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install a stderr logger, plus a file logger when `log_file` is given
///
/// Stderr lines are written with the progress bars suspended.
///
/// Only the first call in a process installs anything; later calls are
/// ignored.
///
/// # Errors
///
/// Returns an error if the log file cannot be created
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![Box::new(BarAwareLogger::new(level))];

    if let Some(path) = log_file {
        let file = std::fs::File::create(path).with_path(path, "create log file")?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }

    // A logger may already be installed by an earlier call
    let _ = CombinedLogger::init(loggers);
    Ok(())
}
