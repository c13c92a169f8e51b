use {
    rsgopher::io_err,
    std::{
        fs::{self, OpenOptions},
        io::{self, Write},
        path::{Path, PathBuf},
    },
};

/// Resolve the document root to an absolute path without symbolic links.
pub fn document_root(root: &Path) -> io::Result<PathBuf> {
    let root = fs::canonicalize(root)?;
    if !fs::metadata(&root)?.is_dir() {
        return Err(io_err!(InvalidInput, "document root must be a directory"));
    }
    Ok(root)
}

/// Host name of this machine, advertised when no host is configured.
pub fn default_host() -> io::Result<String> {
    nix::unistd::gethostname()?
        .into_string()
        .map_err(|_| io_err!(InvalidData, "host name is not valid UTF-8"))
}

/// Set up logging.
///
/// stdout carries the response, so log records go to stderr, or to
/// `log_file` when stderr is connected to the client as well.
pub fn init_logger(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.format(|buf, record| {
        writeln!(
            buf,
            "gopherd[{}]: {}: {}",
            std::process::id(),
            record.level(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
