use std::io::{IsTerminal, Write};
use std::time::Instant;

use anstyle::{AnsiColor, Reset, Style};
use log::{Level, Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

struct ScrunklyLogger {
    file: Option<Mutex<std::fs::File>>,
    filter: log::LevelFilter,
    color: bool,
    start: Instant,
}

impl Log for ScrunklyLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.start.elapsed().as_secs_f64();
        let level = if self.color {
            let style = level_style(record.level());
            format!("{style}{}{Reset}", record.level())
        } else {
            record.level().to_string()
        };
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{elapsed:.3}s] [{level}] {} - {}",
            record.target(),
            record.args()
        );

        if let Some(ref file) = self.file {
            let _ = writeln!(
                file.lock(),
                "[{elapsed:.3}s] [{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(ref file) = self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Install the global logger, writing to stderr and optionally to `log_file`.
///
/// The level filter is read from `RUST_LOG` and defaults to `info`.
///
/// # Errors
///
/// Returns `SetLoggerError` if a logger has already been installed.
pub fn init(log_file: Option<std::fs::File>) -> Result<(), SetLoggerError> {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(log::LevelFilter::Info);

    let logger = ScrunklyLogger {
        file: log_file.map(Mutex::new),
        filter,
        color: std::io::stderr().is_terminal(),
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}

/// Terminal style for a log level.
#[must_use]
pub fn level_style(level: Level) -> Style {
    let color = match level {
        Level::Error => AnsiColor::Red,
        Level::Warn => AnsiColor::Yellow,
        Level::Info => AnsiColor::Blue,
        Level::Debug | Level::Trace => AnsiColor::BrightBlack,
    };
    Style::new().fg_color(Some(anstyle::Color::Ansi(color)))
}
