//! Parser for `gophermap` files.
//!
//! A gophermap replaces the generated listing of its directory. Lines with a
//! tab are directives:
//!
//! ```text
//! <type><display>\t<selector>\t<host>\t<port>
//! ```
//!
//! Only the type and display are mandatory. An empty or `+` host or port
//! stands for the server's own. A selector that is empty, starts with `/` or
//! with `GET ` is used as is; any other selector is relative to the
//! directory of the gophermap. Lines without a tab are plain text and are
//! sent as info items.

use {
    crate::{
        config::Config,
        error::Error,
        item::{Item, ItemType},
        path, res,
        utils::Result,
    },
    log::warn,
};

/// One line of a gophermap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    /// A menu entry.
    Item(Item),
    /// Free text.
    Text(String),
}

/// Interpret one gophermap line (without its terminator).
///
/// `selector` is the selector of the directory holding the gophermap.
pub fn parse_line(config: &Config, selector: &str, line: &str) -> Result<Line> {
    if line.contains('\t') {
        parse_item(config, selector, line).map(Line::Item)
    } else {
        Ok(Line::Text(line.to_owned()))
    }
}

/// Parse a directive line into a menu item.
pub fn parse_item(config: &Config, selector: &str, line: &str) -> Result<Item> {
    let malformed = || -> Result<Item> {
        warn!("malformed gophermap line: \"{}\"", line);
        res!(Error::MalformedLine(line.to_owned()))
    };

    let mut chars = line.chars();
    let typ = match chars.next() {
        Some(c) if c != '\t' => ItemType::from_code(c),
        _ => return malformed(),
    };

    let (display, rest) = match chars.as_str().split_once('\t') {
        Some((display, _)) if display.is_empty() => return malformed(),
        Some(fields) => fields,
        None => return malformed(),
    };

    let mut fields = rest.split('\t');
    let sel = fields.next().unwrap_or_default();
    let host = fields.next().unwrap_or_default();
    let port = fields.next().unwrap_or_default();

    let sel = if is_absolute(sel) {
        sel.to_owned()
    } else {
        path::join_selector(selector, sel)?
    };

    Ok(Item {
        typ,
        display: display.to_owned(),
        selector: sel,
        host: or_default(host, &config.host),
        port: or_default(port, &config.port),
    })
}

fn is_absolute(selector: &str) -> bool {
    selector.is_empty()
        || selector.starts_with('/')
        || selector
            .get(..4)
            .is_some_and(|get| get.eq_ignore_ascii_case("GET "))
}

fn or_default(field: &str, default: &str) -> String {
    match field {
        "" | "+" => default.to_owned(),
        field => field.to_owned(),
    }
}
