//! Validation of client selectors.

use {
    crate::{error::Error, res, utils::Result},
    regex::Regex,
    std::fmt,
};

/// Shape of an acceptable request: the root or a sequence of segments that
/// do not start with a period.
pub const REQUEST_PATTERN: &str = r"^(/|(/[^.][^/]*)*)$";

/// A validated selector.
///
/// A `Selector` always starts with `/` and none of its segments start with
/// `.`, so it can neither leave the document root through `..` nor reach
/// hidden files.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Selector(String);

impl Selector {
    /// Validate a request line (already stripped of its terminator).
    ///
    /// The empty request asks for the root and yields `/`.
    pub fn parse(request: &str) -> Result<Selector> {
        let re = Regex::new(REQUEST_PATTERN)?;

        // The pattern alone accepts "/a//..": "[^.]" eats the second slash.
        let dotted = request.split('/').any(|segment| segment.starts_with('.'));
        if !re.is_match(request) || dotted {
            return res!(Error::MalformedRequest(request.to_owned()));
        }

        if request.is_empty() {
            Ok(Selector("/".to_owned()))
        } else {
            Ok(Selector(request.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted(request: &str) -> bool {
        Selector::parse(request).is_ok()
    }

    #[test]
    fn empty_is_root() {
        assert_eq!(Selector::parse("").unwrap().as_str(), "/");
        assert_eq!(Selector::parse("/").unwrap().as_str(), "/");
    }

    #[test]
    fn plain_selectors() {
        assert!(accepted("/pub/doc"));
        assert!(accepted("/pub/doc.txt"));
        assert!(accepted("/a b/c d"));
        assert!(accepted("/pub/a..b"));
        assert_eq!(Selector::parse("/pub/doc").unwrap().to_string(), "/pub/doc");
    }

    #[test]
    fn traversal_rejected() {
        assert!(!accepted("/../etc/passwd"));
        assert!(!accepted("/pub/../../etc"));
        assert!(!accepted("/.."));
        assert!(!accepted("/."));
    }

    #[test]
    fn hidden_rejected() {
        assert!(!accepted("/.hidden"));
        assert!(!accepted("/pub/.git/config"));
    }

    #[test]
    fn must_start_with_slash() {
        assert!(!accepted("pub/doc"));
        assert!(!accepted("GET / HTTP/1.0"));
    }

    #[test]
    fn trailing_slash_rejected() {
        assert!(!accepted("/pub/"));
    }

    #[test]
    fn doubled_slash_cannot_hide_dots() {
        assert!(!accepted("/a//.."));
        assert!(!accepted("/x//..//.."));
        assert!(!accepted("//.hidden"));
        // matches the pattern and has no dotted segment
        assert!(accepted("//x"));
    }

    #[test]
    fn rejection_carries_request() {
        match Selector::parse("/../etc/passwd") {
            Err(Error::MalformedRequest(req)) => assert_eq!(req, "/../etc/passwd"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
