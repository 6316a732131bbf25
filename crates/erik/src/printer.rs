//! Output sinks
//!
//! A [`Printer`] writes plain or attributed lines to one [`Sink`]. Terminal
//! sinks colour the attribution prefix; files and memory buffers stay plain.

use crate::frame::Frame;
use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

/// Color mode for terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Always use colors
    Always,
    /// Never use colors
    Never,
    /// Auto-detect terminal capabilities
    #[default]
    Auto,
}

impl ColorMode {
    /// Resolve to a termcolor ColorChoice for a stream that is (or is not) a terminal
    pub fn to_color_choice(self, is_terminal: bool) -> ColorChoice {
        // Always respect NO_COLOR (https://no-color.org)
        self.resolve(is_terminal, std::env::var_os("NO_COLOR").is_some())
    }

    fn resolve(self, is_terminal: bool, no_color: bool) -> ColorChoice {
        if no_color {
            return ColorChoice::Never;
        }
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            // termcolor only looks at TERM; redirected output stays plain
            ColorMode::Auto if is_terminal => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}

/// In-memory sink contents, shared between the printer and whoever reads it
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        // A panic while holding the lock leaves plain bytes behind; keep going.
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Destination for debug output
#[derive(Debug, Clone)]
pub enum Sink {
    Stdout,
    Stderr,
    /// Opened in append mode (created if missing) for every line
    File(PathBuf),
    Memory(SharedBuffer),
}

/// Line writer bound to one sink
#[derive(Debug, Clone)]
pub struct Printer {
    sink: Sink,
    color: ColorMode,
    show_column: bool,
}

impl Printer {
    pub fn new(sink: Sink) -> Self {
        Self {
            sink,
            color: ColorMode::Auto,
            show_column: false,
        }
    }

    pub fn stdout() -> Self {
        Self::new(Sink::Stdout)
    }

    /// A printer writing into a fresh buffer, plus a handle to read it back
    pub fn memory() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::new();
        (Self::new(Sink::Memory(buffer.clone())), buffer)
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Include the column in attributed lines
    pub fn with_column(mut self, show_column: bool) -> Self {
        self.show_column = show_column;
        self
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn color(&self) -> ColorMode {
        self.color
    }

    pub fn show_column(&self) -> bool {
        self.show_column
    }

    /// Write a line as is
    pub fn write_line(&self, text: &str) -> io::Result<()> {
        self.emit(None, text)
    }

    /// Write `"<origin> -- <line>: <message>"`
    pub fn write_attributed(&self, frame: &Frame, message: &str) -> io::Result<()> {
        self.emit(Some(&frame.prefix(self.show_column)), message)
    }

    fn emit(&self, prefix: Option<&str>, body: &str) -> io::Result<()> {
        match &self.sink {
            Sink::Stdout => {
                let stream = StandardStream::stdout(
                    self.color.to_color_choice(io::stdout().is_terminal()),
                );
                let mut lock = stream.lock();
                write_line_to(&mut lock, prefix, body)
            }
            Sink::Stderr => {
                let stream = StandardStream::stderr(
                    self.color.to_color_choice(io::stderr().is_terminal()),
                );
                let mut lock = stream.lock();
                write_line_to(&mut lock, prefix, body)
            }
            Sink::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                write_line_to(&mut NoColor::new(file), prefix, body)
            }
            Sink::Memory(buffer) => {
                let mut bytes = buffer.lock();
                write_line_to(&mut NoColor::new(&mut *bytes), prefix, body)
            }
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::stdout()
    }
}

fn write_line_to(w: &mut impl WriteColor, prefix: Option<&str>, body: &str) -> io::Result<()> {
    if let Some(prefix) = prefix {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(w, "{}", prefix)?;
        w.reset()?;
        write!(w, ": ")?;
    }
    writeln!(w, "{}", body)?;
    w.flush()
}
