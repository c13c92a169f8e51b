//! Errors of a Gopher request.
//!
//! Each variant knows how to describe itself to the client: [`Error::summary`]
//! and [`Error::detail`] form the error item, [`Error::hint`] the info item
//! that follows it.

use std::{error as stderror, fmt, io, path::PathBuf};

#[derive(Debug)]
pub enum Error {
    /// The request line does not form a valid selector.
    MalformedRequest(String),
    /// A joined path or selector does not fit into `PATH_MAX`.
    PathTooLong,
    /// The requested entry could not be examined.
    Classification { path: PathBuf, source: io::Error },
    /// The requested entry exists but cannot be served.
    InvalidItem(String),
    /// A gophermap line with a tab that is not a valid directive.
    MalformedLine(String),
    /// Reading a served file, map file or directory failed.
    Read {
        what: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    /// Reading the request from the client failed.
    Input(io::Error),
    /// Writing the response failed.
    Write(io::Error),
    /// The selector pattern could not be compiled.
    Pattern(regex::Error),
}

impl Error {
    /// Summary of the error item sent to the client.
    pub fn summary(&self) -> &'static str {
        match *self {
            Error::MalformedRequest(_) | Error::InvalidItem(_) => "E: request",
            Error::PathTooLong => "E: joinpath",
            Error::Classification { .. } => "E: stat",
            Error::MalformedLine(_) => "E: Malformed line",
            Error::Read { .. } | Error::Input(_) => "E: read",
            Error::Write(_) => "E: write",
            Error::Pattern(_) => "E: regex",
        }
    }

    /// Detail of the error item sent to the client.
    pub fn detail(&self) -> String {
        match *self {
            Error::MalformedRequest(ref request) | Error::InvalidItem(ref request) => {
                request.clone()
            }
            Error::PathTooLong => "joined path too long".to_owned(),
            Error::MalformedLine(ref line) => line.clone(),
            Error::Classification { ref source, .. }
            | Error::Read { ref source, .. }
            | Error::Input(ref source)
            | Error::Write(ref source) => source.to_string(),
            Error::Pattern(ref e) => e.to_string(),
        }
    }

    /// Human readable explanation, sent as an info item after the error.
    pub fn hint(&self) -> (String, Option<String>) {
        let hint = |s: &str| s.to_owned();
        match *self {
            Error::MalformedRequest(_) => (hint("I: Your request seems to be invalid."), None),
            Error::PathTooLong => (hint("I: The requested path is too long."), None),
            Error::Classification { ref path, .. } => (
                hint("I: I could not get file status."),
                Some(path.display().to_string()),
            ),
            Error::InvalidItem(_) => (hint("I: You requested an invalid item."), None),
            Error::MalformedLine(_) => (hint("I: I encountered a problem parsing a gophermap."), None),
            Error::Read { what, ref path, .. } => (
                format!("I: I have a problem reading the {}.", what),
                Some(path.display().to_string()),
            ),
            Error::Input(_) => (hint("I: I have a problem reading your request."), None),
            Error::Write(_) => (hint("I: I have a problem writing your requested item."), None),
            Error::Pattern(_) => (hint("I: I could not compile a regular expression."), None),
        }
    }

    /// Whether the request can go on after this error.
    ///
    /// Only a malformed map file line (and a relative selector in such a line
    /// growing too long) is reported inline.
    pub fn is_recoverable(&self) -> bool {
        matches!(*self, Error::MalformedLine(_) | Error::PathTooLong)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::MalformedRequest(ref req) => write!(f, "malformed request: {:?}", req),
            Error::PathTooLong => write!(f, "joined path too long"),
            Error::Classification {
                ref path,
                ref source,
            } => write!(f, "cannot stat {}: {}", path.display(), source),
            Error::InvalidItem(ref sel) => write!(f, "invalid item: {:?}", sel),
            Error::MalformedLine(ref line) => write!(f, "malformed gophermap line: {:?}", line),
            Error::Read {
                what,
                ref path,
                ref source,
            } => write!(f, "cannot read {} {}: {}", what, path.display(), source),
            Error::Input(ref e) => write!(f, "cannot read request: {}", e),
            Error::Write(ref e) => write!(f, "cannot write response: {}", e),
            Error::Pattern(ref e) => write!(f, "selector pattern: {}", e),
        }
    }
}

impl stderror::Error for Error {
    fn source(&self) -> Option<&(dyn stderror::Error + 'static)> {
        match *self {
            Error::Classification { ref source, .. } | Error::Read { ref source, .. } => {
                Some(source)
            }
            Error::Input(ref e) | Error::Write(ref e) => Some(e),
            Error::Pattern(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Error::Pattern(e)
    }
}
