//! Writing Gopher responses.
//!
//! # Protocol
//! Menu lines are `<type><display>\t<selector>\t<host>\t<port>\r\n`; text
//! and menus end with the line `.\r\n`. Binary files are sent as they are,
//! without terminator.

use {
    crate::{
        error::Error,
        io_err,
        item::{Item, ItemType},
        res,
        utils::Result,
    },
    std::io::{self, Read, Write},
};

/// The response to one request.
///
/// Every call writes through to the underlying writer and flushes it. Once
/// the response is finished (by [`Response::end`] or [`Response::stream`]),
/// further writes fail.
#[derive(Debug)]
pub struct Response<W: Write> {
    out: W,
    escape_dots: bool,
    finished: bool,
}

impl<W: Write> Response<W> {
    pub fn new(out: W) -> Response<W> {
        Response {
            out,
            escape_dots: false,
            finished: false,
        }
    }

    /// Double a leading `.` on lines sent with [`Response::line`].
    pub fn escape_dots(mut self, escape_dots: bool) -> Self {
        self.escape_dots = escape_dots;
        self
    }

    /// Whether the terminator (or a raw stream) has been sent.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Get the inner writer
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Send a menu item.
    pub fn item(&mut self, item: &Item) -> Result<()> {
        let line = format!(
            "{}{}\t{}\t{}\t{}\r\n",
            item.typ.code(),
            item.display,
            item.selector,
            item.host,
            item.port
        );
        self.write(line.as_bytes())
    }

    /// Send an error item.
    pub fn error(&mut self, summary: &str, detail: Option<&str>) -> Result<()> {
        self.fake_item(ItemType::Error, summary, detail)
    }

    /// Send an info item.
    pub fn info(&mut self, summary: &str, detail: Option<&str>) -> Result<()> {
        self.fake_item(ItemType::Info, summary, detail)
    }

    /// Send one line of a text file.
    pub fn line(&mut self, text: &[u8]) -> Result<()> {
        let mut line = Vec::with_capacity(text.len() + 3);
        if self.escape_dots && text.starts_with(b".") {
            line.push(b'.');
        }
        line.extend_from_slice(text);
        line.extend_from_slice(b"\r\n");
        self.write(&line)
    }

    /// Send the terminator.
    pub fn end(&mut self) -> Result<()> {
        self.write(b".\r\n")?;
        self.finished = true;
        Ok(())
    }

    /// Copy `reader` to the client as it is. No terminator follows.
    ///
    /// Failures of `reader` are turned into errors by `read_error`; failures
    /// towards the client are [`Error::Write`].
    pub fn stream<R, F>(&mut self, reader: &mut R, read_error: F) -> Result<u64>
    where
        R: Read,
        F: Fn(io::Error) -> Error,
    {
        self.check_open()?;
        self.finished = true;

        let mut buf = [0; 8192];
        let mut bytes = 0;
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(read_error(e)),
            };
            self.out.write_all(&buf[..n]).map_err(Error::Write)?;
            bytes += n as u64;
        }
        self.out.flush().map_err(Error::Write)?;
        Ok(bytes)
    }

    /// Report `err` and finish the response, as far as that is still
    /// possible.
    pub fn fail(&mut self, err: &Error) -> Result<()> {
        // after a raw stream the client would take the error for content
        if self.finished {
            return Ok(());
        }
        let detail = err.detail();
        let (hint, hint_detail) = err.hint();
        self.error(err.summary(), Some(&detail))?;
        self.info(&hint, hint_detail.as_deref())?;
        self.end()
    }

    fn fake_item(&mut self, typ: ItemType, summary: &str, detail: Option<&str>) -> Result<()> {
        let display = match detail {
            Some(detail) => format!("{}: {}", summary, detail),
            None => summary.to_owned(),
        };
        // client input may end up here
        let display = display.replace(['\t', '\r', '\n'], " ");
        self.item(&Item::fake(typ, display))
    }

    fn check_open(&self) -> Result<()> {
        if self.finished {
            return res!(Error::Write(io_err!(Other, "response already finished")));
        }
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.check_open()?;
        self.out.write_all(bytes).map_err(Error::Write)?;
        self.out.flush().map_err(Error::Write)
    }
}
