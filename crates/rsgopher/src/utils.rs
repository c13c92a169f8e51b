use {
    crate::error::{self, Error},
    std::io::{BufRead, Read},
};

pub type Result<T> = ::std::result::Result<T, error::Error>;

/// Maximum length of a request or map file line, terminator included.
pub const LINE_MAX: usize = 2048;

#[macro_export]
macro_rules! io_err {
    ($kind:ident, $msg:expr) => {
        ::std::io::Error::new(::std::io::ErrorKind::$kind, $msg)
    };
}

#[macro_export]
macro_rules! res {
    ($err:expr) => {
        Err(From::from($err))
    };
}

/// Strip a trailing `\n` or `\r\n`.
pub fn strip_crlf(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Read the request line of a client.
///
/// The terminator is optional: a client that closes its side before sending
/// one has sent the whole buffered input as its request.
pub fn read_request<R: BufRead>(reader: R) -> Result<String> {
    let mut line = Vec::with_capacity(LINE_MAX);
    reader
        .take(LINE_MAX as u64)
        .read_until(b'\n', &mut line)
        .map_err(Error::Input)?;

    if line.len() >= LINE_MAX && !line.ends_with(b"\n") {
        return res!(Error::MalformedRequest(format!(
            "{}...",
            String::from_utf8_lossy(&line[..64])
        )));
    }

    match String::from_utf8(strip_crlf(&line).to_vec()) {
        Ok(request) => Ok(request),
        Err(e) => res!(Error::MalformedRequest(
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        )),
    }
}
