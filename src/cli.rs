use std::ffi::OsString;
use std::time::Duration;

use clap::{CommandFactory, Parser};

use crate::error::{SinkSwitchError, UsageError};

#[derive(Parser, Debug, Clone)]
#[command(name = "sinkswitch")]
#[command(about = "List or cycle the default audio output sink")]
#[command(version)]
pub struct Args {
    // Mode
    /// List all available audio sinks
    #[arg(short, long)]
    pub list: bool,

    /// Toggle between available audio sinks
    #[arg(short, long)]
    pub toggle: bool,

    // Connection
    /// Server to connect to (defaults to the libpulse client configuration)
    #[arg(long)]
    pub server: Option<String>,

    /// Give up if the server has not answered within this many seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    // Debug
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// What to do once connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print a one-line summary of every sink
    List,
    /// Make the next sink the server default
    Toggle,
}

impl Args {
    /// Resolve the requested mode; exactly one of `--list`/`--toggle` is allowed
    pub fn mode(&self) -> Result<Mode, UsageError> {
        match (self.list, self.toggle) {
            (true, false) => Ok(Mode::List),
            (false, true) => Ok(Mode::Toggle),
            (false, false) => Err(UsageError::NoMode),
            (true, true) => Err(UsageError::ConflictingModes),
        }
    }

    /// Overall deadline for the server exchange, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Output and status for a run that ends before connecting to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlyExit {
    pub code: u8,
    pub stdout: String,
    pub stderr: String,
}

impl EarlyExit {
    fn from_clap(err: &clap::Error) -> Self {
        let text = err.render().to_string();
        if err.use_stderr() {
            // Unknown or malformed options exit 1, not clap's 2
            Self {
                code: 1,
                stdout: String::new(),
                stderr: text,
            }
        } else {
            // --help and --version
            Self {
                code: 0,
                stdout: text,
                stderr: String::new(),
            }
        }
    }

    fn from_usage(err: UsageError) -> Self {
        let mut stderr = format!("{}\n", err);
        if err == UsageError::NoMode {
            stderr.push_str(&Args::command().render_help().to_string());
        }
        Self {
            code: SinkSwitchError::from(err).exit_code(),
            stdout: String::new(),
            stderr,
        }
    }
}

/// Parse the command line and resolve the mode, or describe how to exit
pub fn parse_from<I, T>(argv: I) -> Result<(Args, Mode), EarlyExit>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(argv).map_err(|e| EarlyExit::from_clap(&e))?;
    let mode = args.mode().map_err(EarlyExit::from_usage)?;
    Ok((args, mode))
}
