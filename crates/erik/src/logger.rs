//! `log` facade bridge
//!
//! Routes `log::info!` and friends through the shared printer as
//! `"<module> -- <line>: [ INFO] message"`. The print-enabled flag applies.

use crate::console::print_from;
use crate::frame::Frame;
use crate::loader::Config;
use crate::switch::is_enabled;
use crate::ErikResult;
use log::{LevelFilter, Log, Metadata, Record};

/// Logger forwarding records to the shared printer
pub struct ErikLogger;

impl Log for ErikLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        is_enabled() && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        print_from(record_frame(record), &format_record(record));
    }

    fn flush(&self) {}
}

/// Attribution for a record: module path, else file, else target
///
/// Records carry no column, so the frame's column is 0 and never printed.
pub fn record_frame(record: &Record) -> Frame {
    let origin = record
        .module_path()
        .or_else(|| record.file())
        .unwrap_or_else(|| record.target())
        .to_string();
    Frame::new(origin, record.line().unwrap_or(0), 0)
}

/// `"[LEVEL] message"` with the level right-aligned to five characters
pub fn format_record(record: &Record) -> String {
    format!("[{:>5}] {}", record.level(), record.args())
}

/// Install [`ErikLogger`] as the global logger
pub fn init(level: LevelFilter) -> ErikResult<()> {
    static LOGGER: ErikLogger = ErikLogger;
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Install the logger with the level from a loaded configuration
pub fn init_from(config: &Config) -> ErikResult<()> {
    init(config.log_level()?)
}
