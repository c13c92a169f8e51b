//! Length checked joining of paths and selectors.
//!
//! Filesystem paths and selectors are joined by the same rule: a single
//! separator goes between both parts, and a leading separator of the second
//! part never turns it into an absolute path.

use {
    crate::{error::Error, res, utils::Result},
    std::{
        ffi::OsStr,
        os::unix::ffi::{OsStrExt, OsStringExt},
        path::{Path, PathBuf},
    },
};

/// Longest path the platform accepts, terminating NUL included.
pub const PATH_MAX: usize = nix::libc::PATH_MAX as usize;

/// Join `fragment` onto `base`, failing when the result (plus its NUL)
/// would not fit into `limit` bytes.
pub fn join_bytes(base: &[u8], fragment: &[u8], limit: usize) -> Result<Vec<u8>> {
    let fragment = fragment.strip_prefix(b"/").unwrap_or(fragment);

    let mut joined = Vec::with_capacity(base.len() + fragment.len() + 1);
    joined.extend_from_slice(base);
    if !joined.is_empty() && !joined.ends_with(b"/") {
        joined.push(b'/');
    }
    joined.extend_from_slice(fragment);

    if joined.len() >= limit {
        return res!(Error::PathTooLong);
    }
    Ok(joined)
}

/// Map a selector (or a directory entry name) below a filesystem path.
pub fn join_path(base: &Path, fragment: &str) -> Result<PathBuf> {
    let joined = join_bytes(base.as_os_str().as_bytes(), fragment.as_bytes(), PATH_MAX)?;
    Ok(PathBuf::from(std::ffi::OsString::from_vec(joined)))
}

/// Resolve a relative selector against the selector of its directory.
pub fn join_selector(base: &str, fragment: &str) -> Result<String> {
    let joined = join_bytes(base.as_bytes(), fragment.as_bytes(), PATH_MAX)?;
    // both inputs are UTF-8 and only an ASCII separator was added
    Ok(String::from_utf8_lossy(&joined).into_owned())
}

/// Name of a directory entry as a selector fragment.
///
/// Names that are not UTF-8, or that would break the line format, have no
/// selector.
pub fn entry_name(name: &OsStr) -> Option<&str> {
    name.to_str()
        .filter(|name| !name.contains(['\t', '\r', '\n']))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_inserted_once() {
        assert_eq!(join_selector("/x", "foo").unwrap(), "/x/foo");
        assert_eq!(join_selector("/x/", "foo").unwrap(), "/x/foo");
        assert_eq!(join_selector("/", "foo").unwrap(), "/foo");
    }

    #[test]
    fn leading_separator_dropped() {
        assert_eq!(join_selector("/x", "/foo").unwrap(), "/x/foo");
        assert_eq!(
            join_path(Path::new("/srv/gopher"), "/pub/doc").unwrap(),
            PathBuf::from("/srv/gopher/pub/doc")
        );
        // only one separator goes
        assert_eq!(join_selector("/x", "//foo").unwrap(), "/x//foo");
    }

    #[test]
    fn root_selector_maps_to_root() {
        assert_eq!(
            join_path(Path::new("/srv/gopher"), "/").unwrap(),
            PathBuf::from("/srv/gopher/")
        );
    }

    #[test]
    fn empty_base() {
        assert_eq!(join_selector("", "foo").unwrap(), "foo");
        assert_eq!(join_selector("", "/foo").unwrap(), "foo");
    }

    #[test]
    fn associative_for_simple_segments() {
        for (a, b, c) in [("/a", "b", "c"), ("/srv", "pub", "doc.txt"), ("/", "x", "y")] {
            let left = join_selector(&join_selector(a, b).unwrap(), c).unwrap();
            let right = join_selector(a, &join_selector(b, c).unwrap()).unwrap();
            assert_eq!(left, right);
        }
    }

    #[test]
    fn limit_is_enforced() {
        assert_eq!(join_bytes(b"/ab", b"cd", 7).unwrap(), b"/ab/cd");
        // "/ab/cde" plus NUL needs 8 bytes
        match join_bytes(b"/ab", b"cde", 7) {
            Err(Error::PathTooLong) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn overlong_path_fails() {
        let long = "a".repeat(PATH_MAX);
        assert!(matches!(
            join_path(Path::new("/srv"), &long),
            Err(Error::PathTooLong)
        ));
    }

    #[test]
    fn entry_names() {
        assert_eq!(entry_name(OsStr::new("doc.txt")), Some("doc.txt"));
        assert_eq!(entry_name(OsStr::new("a\tb")), None);
        assert_eq!(entry_name(OsStr::new("a\nb")), None);
        assert_eq!(entry_name(OsStr::from_bytes(b"\xff")), None);
    }
}
