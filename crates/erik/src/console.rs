//! Process-wide helpers
//!
//! One shared [`Printer`] (stdout unless configured otherwise) behind the
//! free functions re-exported at the crate root. Every helper checks the
//! print-enabled flag first and discards write errors: debug output never
//! fails the caller.

use crate::bytes::{self, DEFAULT_LABEL};
use crate::frame::Frame;
use crate::loader::{Config, ConfigLoader};
use crate::printer::Printer;
use crate::switch::{is_enabled, set_enabled};
use crate::trace;
use crate::ErikResult;
use std::fmt::Debug;
use std::sync::{OnceLock, RwLock};

static PRINTER: OnceLock<RwLock<Printer>> = OnceLock::new();

fn shared() -> &'static RwLock<Printer> {
    PRINTER.get_or_init(|| RwLock::new(Printer::default()))
}

/// Replace the shared printer, returning the previous one
pub fn set_printer(printer: Printer) -> Printer {
    let mut guard = shared()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    std::mem::replace(&mut *guard, printer)
}

/// Run `f` with the shared printer
pub fn with_printer<R>(f: impl FnOnce(&Printer) -> R) -> R {
    let guard = shared()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&guard)
}

/// Load configuration from the current directory upwards and apply it
pub fn init() -> ErikResult<Config> {
    let cwd = std::env::current_dir()?;
    let config = ConfigLoader::new().load_from_directory(&cwd)?;
    init_with(&config);
    Ok(config)
}

/// Apply an already loaded configuration: flag state and shared printer
pub fn init_with(config: &Config) {
    set_enabled(config.enabled());
    set_printer(config.printer());
}

/// Print a line without attribution
pub fn say(text: &str) {
    if !is_enabled() {
        return;
    }
    with_printer(|printer| {
        let _ = printer.write_line(text);
    });
}

/// Print `text` attributed to the caller
#[track_caller]
pub fn print(text: &str) {
    print_from(Frame::caller(), text);
}

/// Same as [`print`]
#[track_caller]
pub fn log(text: &str) {
    print_from(Frame::caller(), text);
}

/// Print an empty attributed line: "execution got here"
#[track_caller]
pub fn ping() {
    print_from(Frame::caller(), "");
}

/// Print `text` attributed to an explicit frame
pub fn print_from(frame: Frame, text: &str) {
    if !is_enabled() {
        return;
    }
    with_printer(|printer| {
        let _ = printer.write_attributed(&frame, text);
    });
}

/// Print `"<module> -> <function>"`; see the `method!` macro
pub fn method_from(frame: Frame) {
    say(&frame.method_line());
}

/// Dump `data` with the default label
#[track_caller]
pub fn explain_byte_array(data: &[u8]) {
    explain_byte_array_from(Frame::caller(), data, DEFAULT_LABEL);
}

#[track_caller]
pub fn explain_byte_array_labeled(data: &[u8], label: &str) {
    explain_byte_array_from(Frame::caller(), data, label);
}

/// Dump `data` as numbers and as text, both lines attributed to `frame`
pub fn explain_byte_array_from(frame: Frame, data: &[u8], label: &str) {
    if !is_enabled() {
        return;
    }
    let lines = bytes::explain(data, label);
    with_printer(|printer| {
        for line in &lines {
            let _ = printer.write_attributed(&frame, line);
        }
    });
}

/// Print the current thread's stack between attributed start and end markers
#[track_caller]
pub fn stack_trace() {
    let frame = Frame::caller();
    if !is_enabled() {
        return;
    }

    let captured = trace::capture();
    with_printer(|printer| {
        let _ = printer.write_attributed(&frame, "Start Stack Trace");
        match &captured {
            Ok(frames) => {
                for trace_frame in frames {
                    let _ = printer.write_line(&trace_frame.to_string());
                }
            }
            Err(status) => {
                let _ = printer.write_line(&format!("<stack trace unavailable: {:?}>", status));
            }
        }
        let _ = printer.write_attributed(&frame, "End Stack Trace");
    });
}

/// Pretty-print any `Debug` value, attributed to the caller
#[track_caller]
pub fn dump<T: Debug + ?Sized>(value: &T) {
    dump_from(Frame::caller(), None, value);
}

/// Pretty-print `value`, optionally as `"<label> = <value>"`
pub fn dump_from<T: Debug + ?Sized>(frame: Frame, label: Option<&str>, value: &T) {
    if !is_enabled() {
        return;
    }
    let message = match label {
        Some(label) => format!("{} = {:#?}", label, value),
        None => format!("{:#?}", value),
    };
    print_from(frame, &message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::switch::{disable, enable};
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    fn capture() -> crate::printer::SharedBuffer {
        let (printer, buffer) = Printer::memory();
        set_printer(printer);
        enable();
        buffer
    }

    #[test]
    #[serial]
    fn test_print_is_attributed_to_caller() {
        let buffer = capture();
        let line = line!() + 1;
        print("hello");

        let expected = format!("{} -- {}: hello", file!(), line);
        assert_eq!(buffer.lines(), vec![expected]);
    }

    #[test]
    #[serial]
    fn test_ping_prints_empty_message() {
        let buffer = capture();
        let line = line!() + 1;
        ping();

        assert_eq!(buffer.lines(), vec![format!("{} -- {}: ", file!(), line)]);
    }

    #[test]
    #[serial]
    fn test_disabled_prints_nothing() {
        let buffer = capture();
        disable();
        say("a");
        print("b");
        ping();
        explain_byte_array(b"c");
        dump(&1);
        stack_trace();
        enable();

        assert_eq!(buffer.contents(), "");
    }

    #[test]
    #[serial]
    fn test_explain_byte_array_two_lines() {
        let buffer = capture();
        let line = line!() + 1;
        explain_byte_array(b"ok");

        let prefix = format!("{} -- {}", file!(), line);
        assert_eq!(
            buffer.lines(),
            vec![
                format!("{}: Byte Data :data: 111,107", prefix),
                format!("{}: Byte Data :string: ok", prefix),
            ]
        );
    }

    #[test]
    #[serial]
    fn test_stack_trace_markers() {
        let buffer = capture();
        stack_trace();

        let lines = buffer.lines();
        assert!(lines.first().unwrap().ends_with(": Start Stack Trace"));
        assert!(lines.last().unwrap().ends_with(": End Stack Trace"));
        assert!(lines.len() >= 3);
    }

    #[test]
    #[serial]
    fn test_dump_with_label() {
        let buffer = capture();
        dump_from(Frame::new("app", 1, 1), Some("pair"), &(1, 2));

        assert_eq!(buffer.contents(), "app -- 1: pair = (\n    1,\n    2,\n)\n");
    }

    #[test]
    #[serial]
    fn test_set_printer_returns_previous() {
        let first = capture();
        let (second_printer, second) = Printer::memory();
        let previous = set_printer(second_printer);

        let _ = previous.write_line("to first");
        say("to second");

        assert_eq!(first.contents(), "to first\n");
        assert_eq!(second.contents(), "to second\n");
    }
}
