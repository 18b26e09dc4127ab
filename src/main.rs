mod app;
mod cli;
mod error;
mod pulse;
mod sink;

use std::io;
use std::process::ExitCode;

use tracing::{debug, info, warn, Level};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Mode};
use crate::error::{Result, SinkSwitchError};
use crate::pulse::PulseServer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Usage problems end here, before any connection attempt
    let (args, mode) = match cli::parse_from(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(exit) => {
            print!("{}", exit.stdout);
            eprint!("{}", exit.stderr);
            return ExitCode::from(exit.code);
        }
    };

    init_tracing(args.verbose);

    debug!("sinkswitch v{} starting", env!("CARGO_PKG_VERSION"));

    match run(mode, &args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "Run failed");
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Initialize tracing subscriber on stderr
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();
}

/// Connect, run the selected mode, and disconnect
async fn run(mode: Mode, args: &Args) -> Result<()> {
    info!(?mode, server = ?args.server, timeout = ?args.timeout, "Starting");

    let exchange = async {
        let mut server = PulseServer::connect(args.server.as_deref()).await?;
        app::run(mode, &mut server, &mut io::stdout()).await
    };

    let bounded = async {
        match args.timeout() {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .map_err(|_| SinkSwitchError::Timeout(limit))?,
            None => exchange.await,
        }
    };

    // Dropping the exchange on Ctrl-C disconnects from the server
    tokio::select! {
        result = bounded => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!("Received Ctrl-C, shutting down");
            Err(SinkSwitchError::Interrupted)
        }
    }
}
