//! Caller attribution
//!
//! A [`Frame`] names the code a line of output belongs to. Helpers take it from
//! `#[track_caller]`, so wrapping a helper in your own `#[track_caller]`
//! function moves attribution one level further up the stack.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// Where a line of debug output came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Module path when known, otherwise the source file
    pub origin: Cow<'static, str>,
    pub line: u32,
    /// 1-based; 0 when unknown, and then never printed
    pub column: u32,
    /// Enclosing function, set by the `method!` macro
    pub function: Option<Cow<'static, str>>,
}

impl Frame {
    /// Explicit frame
    pub fn new(origin: impl Into<Cow<'static, str>>, line: u32, column: u32) -> Self {
        Self {
            origin: origin.into(),
            line,
            column,
            function: None,
        }
    }

    /// The location of the code calling this function
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line(), location.column())
    }

    /// Build a frame from a fully qualified function path such as
    /// `app::net::connect::{{closure}}`.
    ///
    /// Closure segments are dropped; the last remaining segment becomes the
    /// function and the rest the origin.
    pub fn from_function_path(path: &str, line: u32, column: u32) -> Self {
        let mut path = path;
        while let Some(stripped) = path.strip_suffix("::{{closure}}") {
            path = stripped;
        }

        let (origin, function) = match path.rsplit_once("::") {
            Some((origin, function)) => (origin, function),
            None => (path, ""),
        };

        Self {
            origin: Cow::Owned(origin.to_string()),
            line,
            column,
            function: Some(Cow::Owned(function.to_string())),
        }
    }

    /// `"<origin> -- <line>: <message>"`
    pub fn attribute(&self, message: &str) -> String {
        format!("{}: {}", self.prefix(false), message)
    }

    /// `"<origin> -- <line>:<column>: <message>"`
    pub fn attribute_with_column(&self, message: &str) -> String {
        format!("{}: {}", self.prefix(true), message)
    }

    /// The attribution part of a line, without the trailing `": "`
    pub fn prefix(&self, show_column: bool) -> String {
        if show_column && self.column != 0 {
            format!("{} -- {}:{}", self.origin, self.line, self.column)
        } else {
            format!("{} -- {}", self.origin, self.line)
        }
    }

    /// `"<origin> -> <function>"`
    pub fn method_line(&self) -> String {
        format!(
            "{} -> {}",
            self.origin,
            self.function.as_deref().unwrap_or("<unknown>")
        )
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.origin, self.line, self.column)
    }
}
