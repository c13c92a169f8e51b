//! Server side request handling.
//!
//! # Protocol
//! Gopher (RFC 1436), one request per connection

use {
    crate::{
        classify::{accessible, classify, classify_entry},
        config::{Config, GOPHERMAP},
        error::Error,
        fs::{EntryKind, Filesystem},
        gophermap::{self, Line},
        item::{Item, ItemType},
        path,
        selector::Selector,
        send::Response,
        utils::{self, Result},
    },
    log::{debug, error, info, warn},
    std::{
        io::{self, BufRead, BufReader, Write},
        path::{Path, PathBuf},
    },
};

/// A request being served.
struct Context<'a, Fs, W: Write> {
    config: &'a Config,
    fs: &'a Fs,
    selector: Selector,
    path: PathBuf,
    out: &'a mut Response<W>,
}

/// Answer the request read from `input` on `output`.
///
/// A failure is reported to the client before it is returned; the caller
/// only has to turn it into an exit status.
pub fn respond<Fs, R, W>(config: &Config, fs: &Fs, input: R, output: W) -> Result<()>
where
    Fs: Filesystem,
    R: BufRead,
    W: Write,
{
    let mut out = Response::new(output).escape_dots(config.escape_dots);

    let res = utils::read_request(input)
        .and_then(|request| serve(config, fs, &request, &mut out));
    if let Err(ref e) = res {
        match e {
            Error::MalformedRequest(_) | Error::InvalidItem(_) => warn!("{}", e),
            _ => error!("{}", e),
        }
        if let Err(e) = out.fail(e) {
            error!("cannot report failure: {}", e);
        }
    }
    res
}

/// Serve the validated selector of `request`.
pub fn serve<Fs, W>(config: &Config, fs: &Fs, request: &str, out: &mut Response<W>) -> Result<()>
where
    Fs: Filesystem,
    W: Write,
{
    let selector = Selector::parse(request)?;
    info!("selector: \"{}\"", selector);

    let path = path::join_path(&config.root, selector.as_str())?;
    debug!("path: {:?}", path);

    let typ = classify_entry(fs, &path)?;
    if !accessible(fs, &path, typ) {
        return Err(Error::InvalidItem(selector.to_string()));
    }

    let mut ctx = Context {
        config,
        fs,
        selector,
        path,
        out,
    };

    match typ {
        ItemType::File => {
            debug!("serving text file");
            ctx.write_text_file()
        }
        ItemType::Directory => {
            debug!("serving directory");
            ctx.handle_directory()
        }
        typ if typ.is_binary() => {
            debug!("serving binary file");
            ctx.write_binary_file()
        }
        _ => Err(Error::InvalidItem(ctx.selector.to_string())),
    }
}

fn read_error(what: &'static str, path: PathBuf) -> impl Fn(io::Error) -> Error {
    move |source| Error::Read {
        what,
        path: path.clone(),
        source,
    }
}

impl<Fs: Filesystem, W: Write> Context<'_, Fs, W> {
    fn write_text_file(&mut self) -> Result<()> {
        let on_error = read_error("requested item", self.path.clone());
        let mut reader = BufReader::new(self.fs.open(&self.path).map_err(&on_error)?);

        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).map_err(&on_error)? == 0 {
                break;
            }
            self.out.line(utils::strip_crlf(&line))?;
        }
        self.out.end()
    }

    fn write_binary_file(&mut self) -> Result<()> {
        let on_error = read_error("requested item", self.path.clone());
        let mut file = self.fs.open(&self.path).map_err(&on_error)?;
        let bytes = self.out.stream(&mut file, &on_error)?;
        debug!("sent {} bytes", bytes);
        Ok(())
    }

    fn handle_directory(&mut self) -> Result<()> {
        let map = path::join_path(&self.path, GOPHERMAP)?;

        let is_map = matches!(self.fs.stat(&map), Ok(EntryKind::Regular))
            && accessible(self.fs, &map, ItemType::File);
        if is_map {
            self.write_gophermap(&map)
        } else {
            self.write_menu()
        }
    }

    fn write_menu(&mut self) -> Result<()> {
        let mut names = self
            .fs
            .list(&self.path)
            .map_err(read_error("directory", self.path.clone()))?;
        names.retain(|name| !name.as_encoded_bytes().starts_with(b"."));
        names.sort();

        for name in &names {
            let Some(name) = path::entry_name(name) else {
                warn!("skipping unrepresentable entry: {:?}", name);
                continue;
            };
            if let Some(item) = self.menu_item(name) {
                self.out.item(&item)?;
            }
        }
        self.out.end()
    }

    /// Menu item for the directory entry `name`, if it can be served.
    fn menu_item(&self, name: &str) -> Option<Item> {
        let joined = path::join_path(&self.path, name)
            .and_then(|entry| Ok((entry, path::join_selector(self.selector.as_str(), name)?)));
        let (path, selector) = match joined {
            Ok(joined) => joined,
            Err(e) => {
                warn!("skipping {:?}: {}", name, e);
                return None;
            }
        };

        let typ = classify(self.fs, &path);
        if !accessible(self.fs, &path, typ) {
            return None;
        }

        Some(Item::new(
            typ,
            name,
            selector,
            self.config.host.as_str(),
            self.config.port.as_str(),
        ))
    }

    fn write_gophermap(&mut self, map: &Path) -> Result<()> {
        let on_error = read_error("gophermap", map.to_path_buf());
        let mut reader = BufReader::new(self.fs.open(map).map_err(&on_error)?);

        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).map_err(&on_error)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(utils::strip_crlf(&line));

            match gophermap::parse_line(self.config, self.selector.as_str(), &line) {
                Ok(Line::Item(item)) => self.out.item(&item)?,
                Ok(Line::Text(text)) => self.out.info(&text, None)?,
                Err(e) if e.is_recoverable() => {
                    let (hint, _) = e.hint();
                    self.out.info(&hint, Some(&e.detail()))?
                }
                Err(e) => return Err(e),
            }
        }
        self.out.end()
    }
}
