//! Server configuration.

use std::path::PathBuf;

/// Default Gopher port
pub const GOPHER_PORT: &str = "70";

/// Name of the per-directory map file
pub const GOPHERMAP: &str = "gophermap";

/// Settings of the server, fixed for the lifetime of a request.
///
/// A `Config` is built once at startup and passed by reference to every
/// stage of request handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Document root; selectors are resolved below it.
    pub root: PathBuf,
    /// Host advertised in menu items.
    pub host: String,
    /// Port advertised in menu items.
    pub port: String,
    /// Double a leading `.` on text file lines.
    ///
    /// RFC 1436 asks for it, but many clients do not undo the escape, so it
    /// is off unless asked for.
    pub escape_dots: bool,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>, host: impl Into<String>, port: impl Into<String>) -> Self {
        Config {
            root: root.into(),
            host: host.into(),
            port: port.into(),
            escape_dots: false,
        }
    }

    pub fn with_escape_dots(mut self, escape_dots: bool) -> Self {
        self.escape_dots = escape_dots;
        self
    }
}
