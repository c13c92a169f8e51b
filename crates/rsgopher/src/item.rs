//! Gopher item types and menu items.

use nix::unistd::AccessFlags;

/// Selector of synthetic error and info items
pub const FAKE_SELECTOR: &str = "/";

/// Host of synthetic error and info items
pub const FAKE_HOST: &str = "fake";

/// Port of synthetic error and info items
pub const FAKE_PORT: &str = "1";

/// Type of a Gopher item, sent as the first character of a menu line.
///
/// # Protocol
/// RFC 1436, plus the common `g`, `h`, `i`, `I` and `s` extensions
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// `0`: plain text file
    File,
    /// `1`: directory (menu)
    Directory,
    /// `3`: error
    Error,
    /// `5`: archive
    Archive,
    /// `9`: binary file
    Binary,
    /// `g`: GIF image
    Gif,
    /// `h`: HTML document
    Html,
    /// `i`: informational line
    Info,
    /// `I`: image other than GIF
    Image,
    /// `s`: sound
    Audio,
    /// `?`: nothing that can be served
    Unknown,
    /// Any other code, as written in a gophermap
    Other(char),
}

impl ItemType {
    pub fn code(self) -> char {
        use crate::ItemType::*;
        match self {
            File => '0',
            Directory => '1',
            Error => '3',
            Archive => '5',
            Binary => '9',
            Gif => 'g',
            Html => 'h',
            Info => 'i',
            Image => 'I',
            Audio => 's',
            Unknown => '?',
            Other(c) => c,
        }
    }

    pub fn from_code(code: char) -> ItemType {
        use crate::ItemType::*;
        match code {
            '0' => File,
            '1' => Directory,
            '3' => Error,
            '5' => Archive,
            '9' => Binary,
            'g' => Gif,
            'h' => Html,
            'i' => Info,
            'I' => Image,
            's' => Audio,
            '?' => Unknown,
            c => Other(c),
        }
    }

    /// Map a MIME type to the item type of a regular file.
    pub fn from_mime(mime: &str) -> ItemType {
        use crate::ItemType::*;
        match mime {
            "text/html" => Html,
            m if m.starts_with("text/") => File,
            "image/gif" => Gif,
            m if m.starts_with("image/") => Image,
            m if m.starts_with("audio/") => Audio,
            "application/ogg" => Audio,
            "application/x-bzip2" | "application/x-gzip" | "application/zip" => Archive,
            _ => Binary,
        }
    }

    /// Permissions the server needs to serve an item of this type, or `None`
    /// if such an item is never served.
    pub fn required_access(self) -> Option<AccessFlags> {
        use crate::ItemType::*;
        match self {
            File | Archive | Binary | Gif | Html | Image | Audio => Some(AccessFlags::R_OK),
            Directory => Some(AccessFlags::R_OK | AccessFlags::X_OK),
            Error | Info | Unknown | Other(_) => None,
        }
    }

    /// Whether the item is sent as a raw byte stream.
    pub fn is_binary(self) -> bool {
        use crate::ItemType::*;
        matches!(self, Archive | Binary | Gif | Html | Image | Audio)
    }
}

/// One line of a Gopher menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub typ: ItemType,
    /// Text shown to the user; never contains a tab, CR or LF.
    pub display: String,
    pub selector: String,
    pub host: String,
    pub port: String,
}

impl Item {
    pub fn new(
        typ: ItemType,
        display: impl Into<String>,
        selector: impl Into<String>,
        host: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Item {
            typ,
            display: display.into(),
            selector: selector.into(),
            host: host.into(),
            port: port.into(),
        }
    }

    /// An item that only carries text and cannot be followed.
    pub fn fake(typ: ItemType, display: impl Into<String>) -> Self {
        Item::new(typ, display, FAKE_SELECTOR, FAKE_HOST, FAKE_PORT)
    }
}
