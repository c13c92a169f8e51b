use {
    clap::Parser,
    log::{error, info},
    rsgopher::{
        config::{Config, GOPHER_PORT},
        fs::HostFs,
        srv,
    },
    std::{io, path::PathBuf},
};

mod utils;
use crate::utils::*;

/// Answer one Gopher request read from stdin on stdout.
///
/// Meant to be started by inetd or a similar super-server for every
/// connection.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
struct Cli {
    /// Document root
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Host name advertised in menus [default: name of this machine]
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port advertised in menus
    #[arg(short, long, default_value = GOPHER_PORT)]
    port: String,

    /// Double a leading period on lines of text files, as RFC 1436 asks
    #[arg(long)]
    escape_dots: bool,

    /// Append log messages to this file instead of writing them to stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn load_config(
    Cli {
        root,
        host,
        port,
        escape_dots,
        ..
    }: Cli,
) -> io::Result<Config> {
    let host = match host {
        Some(host) => host,
        None => default_host()?,
    };

    Ok(Config::new(document_root(&root)?, host, port).with_escape_dots(escape_dots))
}

fn gopherd_main(cli: Cli) -> io::Result<i32> {
    let config = load_config(cli)?;
    info!(
        "root: {:?}, advertising {}:{}",
        config.root, config.host, config.port
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    // failures have been reported to the client and logged already
    Ok(match srv::respond(&config, &HostFs, stdin.lock(), stdout.lock()) {
        Ok(()) => 0,
        Err(_) => 1,
    })
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logger(cli.log_file.as_deref()) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    let exit_code = gopherd_main(cli).unwrap_or_else(|e| {
        error!("Error: {:?}", e);
        1
    });

    std::process::exit(exit_code);
}
