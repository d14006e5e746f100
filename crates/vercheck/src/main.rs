use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use tokio::net::TcpListener;

use vercheck::logging;
use vercheck::logging::Level;
use vercheck::server;

/// Compare PEP 440 version numbers over HTTP.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// The address to bind.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    host: IpAddr,

    /// The port to listen on.
    #[arg(long, short, default_value_t = 5000)]
    port: u16,

    /// Do not print any output.
    #[arg(long, short, conflicts_with = "verbose")]
    quiet: bool,

    /// Use verbose output.
    #[arg(long, short, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Copy, Clone)]
enum ExitStatus {
    /// The server shut down cleanly.
    Success,
    /// The server failed with an unexpected error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Error => Self::from(2),
        }
    }
}

async fn inner() -> Result<ExitStatus> {
    let cli = Cli::parse();

    logging::setup_logging(if cli.quiet {
        Level::Quiet
    } else if cli.verbose {
        Level::Verbose
    } else {
        Level::Default
    });

    let addr = SocketAddr::new(cli.host, cli.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    server::serve(listener).await?;

    Ok(ExitStatus::Success)
}

#[tokio::main]
async fn main() -> ExitCode {
    match inner().await {
        Ok(status) => status.into(),
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                let mut causes = err.chain();
                eprintln!("{}: {}", "error".red().bold(), causes.next().unwrap());
                for err in causes {
                    eprintln!("  {}: {}", "Caused by".red().bold(), err);
                }
            }
            ExitStatus::Error.into()
        }
    }
}
