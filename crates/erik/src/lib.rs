//! Erik: ad-hoc debug printing
//!
//! A handful of helpers for the moments when a debugger is not at hand:
//! - Attributed lines (`src/net.rs -- 42: got here`)
//! - Byte array dumps, numeric and as text
//! - Stack traces of the current thread
//! - Pretty `Debug` dumps of any value
//! - A process-wide switch that silences all of the above
//!
//! Output goes to stdout by default. A sink, colour mode and the switch can be
//! configured from `erik.toml`, `~/.erik/config.toml` or `ERIK_*` variables.
//!
//! # Example
//!
//! ```no_run
//! erik::print("connecting");
//! erik::explain_byte_array_labeled(b"\x01\x02hi", "header");
//! erik::erik_dump!(vec![1, 2, 3]);
//! erik::disable();
//! erik::print("not shown");
//! ```

pub mod bytes;
pub mod config;
pub mod console;
pub mod frame;
pub mod loader;
pub mod logger;
pub mod printer;
pub mod switch;
pub mod trace;

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level errors
#[derive(Error, Debug)]
pub enum ErikError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write debug output: {0}")]
    Io(#[from] std::io::Error),

    #[error("A global logger is already installed: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Result type for crate-level operations
pub type ErikResult<T> = Result<T, ErikError>;

pub use bytes::DEFAULT_LABEL;
pub use config::{ColorSetting, ErikConfig, OutputKind};
pub use console::{
    dump, dump_from, explain_byte_array, explain_byte_array_from, explain_byte_array_labeled,
    init, init_with, log, method_from, ping, print, print_from, say, set_printer, stack_trace,
    with_printer,
};
pub use frame::Frame;
pub use loader::{Config, ConfigLoader};
pub use printer::{ColorMode, Printer, SharedBuffer, Sink};
pub use switch::{disable, enable, is_enabled, set_enabled};
pub use trace::TraceFrame;
