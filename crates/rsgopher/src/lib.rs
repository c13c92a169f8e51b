#![forbid(unsafe_code)]
//! Server side request handling for the Gopher protocol (RFC 1436).
//!
//! This crate answers exactly one Gopher request: it reads a selector line,
//! resolves it below a document root and writes the response. It does not
//! listen on sockets; it is meant to run behind inetd (or any other
//! super-server) with the client connection already attached to stdin and
//! stdout.
//!
//! # Overview
//!
//! A request goes through these stages:
//!
//! 1. **Validation**: the selector must be empty or start with `/`, and no
//!    path segment may begin with `.` ([`selector::Selector`]).
//! 2. **Resolution**: the selector is joined onto the document root with a
//!    length checked joiner ([`path`]).
//! 3. **Classification**: the entry is mapped to an item type, sniffing the
//!    content of regular files ([`classify`]).
//! 4. **Response**: text files are sent line by line, binary files are
//!    streamed, directories are answered with a menu ([`srv`]).
//!
//! Directories may carry a `gophermap` file. When it is readable, the menu is
//! built from its directives ([`gophermap`]) instead of the directory
//! listing.
//!
//! # Example
//!
//! ```no_run
//! use rsgopher::{config::Config, fs::HostFs, srv};
//! use std::io;
//!
//! fn main() -> rsgopher::Result<()> {
//!     let config = Config::new("/srv/gopher", "gopher.example.org", "70");
//!     let stdin = io::stdin();
//!     let stdout = io::stdout();
//!     srv::respond(&config, &HostFs, stdin.lock(), stdout.lock())
//! }
//! ```
//!
//! # Error Handling
//!
//! Every operation returns [`Result`]. Errors that end a request are written
//! to the client as an error item (type `3`) followed by an explanatory info
//! item and the terminator; see [`error::Error`]. Failures on a single entry
//! of a directory listing never end the request: the entry is skipped.
pub mod classify;
pub mod config;
pub mod error;
pub mod fs;
pub mod gophermap;
pub mod item;
pub mod path;
pub mod selector;
pub mod send;
pub mod srv;
#[macro_use]
pub mod utils;

#[cfg(test)]
mod memfs;

pub use crate::error::Error;
pub use crate::item::{Item, ItemType};
pub use crate::selector::Selector;
pub use crate::utils::Result;
