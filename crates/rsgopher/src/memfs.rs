//! In-memory document tree for tests.

use {
    crate::fs::{EntryKind, Filesystem},
    nix::{errno::Errno, unistd::AccessFlags},
    std::{
        collections::BTreeMap,
        ffi::OsString,
        io::{self, Cursor},
        path::{Path, PathBuf},
    },
};

enum Node {
    Dir,
    File { data: Vec<u8>, mime: &'static str },
    Special,
}

#[derive(Default)]
pub struct MemFs {
    nodes: BTreeMap<PathBuf, Node>,
    denied: BTreeMap<PathBuf, Errno>,
}

impl MemFs {
    pub fn new() -> Self {
        let mut fs = MemFs::default();
        fs.nodes.insert(PathBuf::from("/"), Node::Dir);
        fs
    }

    pub fn dir(mut self, path: &str) -> Self {
        self.nodes.insert(PathBuf::from(path), Node::Dir);
        self
    }

    pub fn file(mut self, path: &str, mime: &'static str, data: &[u8]) -> Self {
        self.nodes.insert(
            PathBuf::from(path),
            Node::File {
                data: data.to_vec(),
                mime,
            },
        );
        self
    }

    pub fn text(self, path: &str, data: &str) -> Self {
        self.file(path, "text/plain", data.as_bytes())
    }

    pub fn special(mut self, path: &str) -> Self {
        self.nodes.insert(PathBuf::from(path), Node::Special);
        self
    }

    /// Make `access` fail with `errno` for `path`.
    pub fn deny(mut self, path: &str, errno: Errno) -> Self {
        self.denied.insert(PathBuf::from(path), errno);
        self
    }

    fn node(&self, path: &Path) -> io::Result<&Node> {
        // "/srv/" and "/srv" are the same directory
        let path = match path.to_str() {
            Some(p) if p.len() > 1 => Path::new(p.trim_end_matches('/')),
            _ => path,
        };
        self.nodes
            .get(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

impl Filesystem for MemFs {
    type File = Cursor<Vec<u8>>;

    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        Ok(match self.node(path)? {
            Node::Dir => EntryKind::Directory,
            Node::File { .. } => EntryKind::Regular,
            Node::Special => EntryKind::Other,
        })
    }

    fn sniff(&self, path: &Path) -> io::Result<String> {
        match self.node(path)? {
            Node::File { mime, .. } => Ok(mime.to_string()),
            _ => Err(io::Error::from(io::ErrorKind::InvalidInput)),
        }
    }

    fn list(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let dir = self.node(path).map(|_| path.to_path_buf())?;
        let dir = dir.to_string_lossy().trim_end_matches('/').to_owned();
        // reverse order: callers must sort
        Ok(self
            .nodes
            .keys()
            .rev()
            .filter_map(|p| {
                let parent = p.parent()?.to_string_lossy().trim_end_matches('/').to_owned();
                (parent == dir && p != Path::new("/")).then(|| p.file_name())?
            })
            .map(|name| name.to_os_string())
            .collect())
    }

    fn access(&self, path: &Path, _mode: AccessFlags) -> nix::Result<()> {
        if let Some(errno) = self.denied.get(path) {
            return Err(*errno);
        }
        self.node(path).map(|_| ()).map_err(|_| Errno::ENOENT)
    }

    fn open(&self, path: &Path) -> io::Result<Self::File> {
        match self.node(path)? {
            Node::File { data, .. } => Ok(Cursor::new(data.clone())),
            _ => Err(io::Error::from(io::ErrorKind::InvalidInput)),
        }
    }
}
