//! Access to the document tree.
//!
//! Request handling never touches the filesystem directly; it goes through
//! the [`Filesystem`] trait so that the server can be run against other
//! backends (and tests against an in-memory tree).

use {
    log::debug,
    nix::unistd::{self, AccessFlags},
    std::{
        ffi::OsString,
        fs::{self, File},
        io::{self, Read},
        path::Path,
    },
};

/// Bytes read from the head of a file to sniff its content type
const SNIFF_LEN: u64 = 8192;

/// Kind of a directory entry, after following symbolic links.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Regular,
    Other,
}

/// Filesystem operations needed to answer requests.
///
/// All operations may fail; none is retried.
pub trait Filesystem {
    /// Handle for reading a regular file.
    type File: Read;

    /// Examine an entry.
    ///
    /// The entry must exist itself; its kind is the kind of the entry a
    /// symbolic link points to, because that is what would be read. A
    /// dangling link is an error.
    fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Determine the MIME type of a regular file from its content.
    fn sniff(&self, path: &Path) -> io::Result<String>;

    /// Names of the entries of a directory, in no particular order.
    fn list(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Check that the server may access an entry in the given mode.
    fn access(&self, path: &Path, mode: AccessFlags) -> nix::Result<()>;

    /// Open a regular file for reading.
    fn open(&self, path: &Path) -> io::Result<Self::File>;
}

/// The filesystem of the host.
#[derive(Copy, Clone, Debug, Default)]
pub struct HostFs;

impl Filesystem for HostFs {
    type File = File;

    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        fs::symlink_metadata(path)?;
        let attr = fs::metadata(path)?;

        Ok(match attr.file_type() {
            ref typ if typ.is_dir() => EntryKind::Directory,
            ref typ if typ.is_file() => EntryKind::Regular,
            _ => EntryKind::Other,
        })
    }

    fn sniff(&self, path: &Path) -> io::Result<String> {
        let mut head = Vec::with_capacity(SNIFF_LEN as usize);
        File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;

        let mime = sniff_mime(&head);
        debug!("mime: {:?}: \"{}\"", path, mime);
        Ok(mime.to_owned())
    }

    fn list(&self, path: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn access(&self, path: &Path, mode: AccessFlags) -> nix::Result<()> {
        unistd::access(path, mode)
    }

    fn open(&self, path: &Path) -> io::Result<File> {
        File::open(path)
    }
}

/// Signatures long enough to trust even when the content would pass as text.
const TEXT_SIGNATURES: &[&str] = &["application/pdf"];

/// Determine a MIME type from the first bytes of a file.
///
/// Content that is UTF-8 without NUL bytes is text, unless `infer` finds a
/// text type or one of `TEXT_SIGNATURES` in it; short signatures such as
/// `MZ` or `BM` are only believed for binary content.
pub fn sniff_mime(head: &[u8]) -> &'static str {
    if head.is_empty() {
        return "inode/x-empty";
    }

    let signature = infer::get(head).map(|typ| match typ.mime_type() {
        "application/gzip" => "application/x-gzip",
        mime => mime,
    });

    if !is_text(head) {
        return signature.unwrap_or("application/octet-stream");
    }

    if let Some(mime) =
        signature.filter(|mime| mime.starts_with("text/") || TEXT_SIGNATURES.contains(mime))
    {
        return mime;
    }

    let start = String::from_utf8_lossy(&head[..head.len().min(512)])
        .trim_start()
        .to_ascii_lowercase();
    if start.starts_with("<!doctype html") || start.starts_with("<html") {
        "text/html"
    } else {
        "text/plain"
    }
}

fn is_text(head: &[u8]) -> bool {
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        // a multi-byte character cut off at the end of the sniffed block
        Err(e) => e.error_len().is_none(),
    }
}
