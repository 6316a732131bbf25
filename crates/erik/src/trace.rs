//! Stack traces
//!
//! Captures the current thread's backtrace with `std::backtrace` and turns its
//! text rendering into frames, minus the frames of the capture itself.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

/// Symbols that belong to the capture machinery rather than to the caller
const HELPER_PREFIXES: &[&str] = &[
    "std::backtrace",
    "<std::backtrace",
    "erik::trace::capture",
    "erik::console::stack_trace",
];

/// One frame of a captured backtrace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    pub symbol: String,
    /// `file:line:column`, when debug info had it
    pub location: Option<String>,
}

impl fmt::Display for TraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} ({})", self.symbol, location),
            None => write!(f, "{}", self.symbol),
        }
    }
}

/// Capture the caller's stack, ignoring `RUST_BACKTRACE`
///
/// Returns the backtrace status when the platform cannot produce one.
pub fn capture() -> Result<Vec<TraceFrame>, BacktraceStatus> {
    let backtrace = Backtrace::force_capture();
    match backtrace.status() {
        BacktraceStatus::Captured => {
            let frames = parse_frames(&backtrace.to_string());
            Ok(skip_helper_frames(frames))
        }
        status => Err(status),
    }
}

/// Parse the text rendering of a backtrace:
///
/// ```text
///    0: app::main
///              at ./src/main.rs:4:5
///    1: core::ops::function::FnOnce::call_once
/// ```
pub fn parse_frames(text: &str) -> Vec<TraceFrame> {
    let mut frames: Vec<TraceFrame> = Vec::new();

    for line in text.lines() {
        let line = line.trim();

        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                if frame.location.is_none() {
                    frame.location = Some(location.to_string());
                }
            }
            continue;
        }

        if let Some((index, symbol)) = line.split_once(": ") {
            if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) {
                frames.push(TraceFrame {
                    symbol: strip_hash(symbol).to_string(),
                    location: None,
                });
            }
        }
    }

    frames
}

/// Drop the leading frames that belong to the capture itself
pub fn skip_helper_frames(frames: Vec<TraceFrame>) -> Vec<TraceFrame> {
    let first_caller = frames
        .iter()
        .position(|frame| !is_helper(&frame.symbol))
        .unwrap_or(frames.len());
    frames.into_iter().skip(first_caller).collect()
}

fn is_helper(symbol: &str) -> bool {
    HELPER_PREFIXES
        .iter()
        .any(|prefix| symbol.starts_with(prefix))
}

/// Strip a trailing `::h0123456789abcdef` symbol hash
fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.chars().all(|c| c.is_ascii_hexdigit()) => {
            head
        }
        _ => symbol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "   0: std::backtrace_rs::backtrace::libunwind::trace
             at /rustc/abc/library/std/src/../../backtrace/src/backtrace/libunwind.rs:93:5
   1: std::backtrace::Backtrace::force_capture
             at /rustc/abc/library/std/src/backtrace.rs:312:9
   2: erik::trace::capture
             at ./src/trace.rs:40:21
   3: app::handler::h0123456789abcdef
             at ./src/main.rs:10:5
             at ./src/inlined.rs:2:1
   4: core::ops::function::FnOnce::call_once
";

    #[test]
    fn test_parse_frames() {
        let frames = parse_frames(SAMPLE);
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[3].symbol, "app::handler");
        assert_eq!(frames[3].location.as_deref(), Some("./src/main.rs:10:5"));
        assert_eq!(frames[4].location, None);
    }

    #[test]
    fn test_skip_helper_frames() {
        let frames = skip_helper_frames(parse_frames(SAMPLE));
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].symbol, "app::handler");
    }

    #[test]
    fn test_skip_keeps_everything_without_helpers() {
        let frames = vec![TraceFrame {
            symbol: "app::main".to_string(),
            location: None,
        }];
        assert_eq!(skip_helper_frames(frames.clone()), frames);
    }

    #[test]
    fn test_display() {
        let frame = TraceFrame {
            symbol: "app::main".to_string(),
            location: Some("./src/main.rs:4:5".to_string()),
        };
        assert_eq!(frame.to_string(), "app::main (./src/main.rs:4:5)");
    }

    #[test]
    fn test_strip_hash_leaves_plain_symbols() {
        assert_eq!(strip_hash("app::handler"), "app::handler");
        assert_eq!(strip_hash("app::hello"), "app::hello");
    }

    #[test]
    fn test_capture_does_not_start_with_helpers() {
        if let Ok(frames) = capture() {
            if let Some(first) = frames.first() {
                assert!(!is_helper(&first.symbol), "first frame: {}", first.symbol);
            }
        }
    }
}
