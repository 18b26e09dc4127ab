use std::io::Write;

use tracing::{info, instrument};

use crate::cli::Mode;
use crate::error::Result;
use crate::pulse::AudioServer;
use crate::sink::{list_line, next_sink};

/// Run the selected mode against a connected server
pub async fn run<S, W>(mode: Mode, server: &mut S, out: &mut W) -> Result<()>
where
    S: AudioServer,
    W: Write,
{
    match mode {
        Mode::List => run_list(server, out).await,
        Mode::Toggle => run_toggle(server, out).await,
    }
}

/// Print one line summarizing every sink, starring the running ones
///
/// The line has no terminator, so an empty sink list prints nothing.
#[instrument(skip_all)]
pub async fn run_list<S, W>(server: &mut S, out: &mut W) -> Result<()>
where
    S: AudioServer,
    W: Write,
{
    let sinks = server.sinks().await?;
    info!(count = sinks.len(), "Listing sinks");

    write!(out, "{}", list_line(&sinks))?;
    out.flush()?;
    Ok(())
}

/// Make the sink after the current default the new default
///
/// Sinks are re-read on every call; their order is whatever the server
/// reports.
#[instrument(skip_all)]
pub async fn run_toggle<S, W>(server: &mut S, out: &mut W) -> Result<()>
where
    S: AudioServer,
    W: Write,
{
    let sinks = server.sinks().await?;
    let info = server.server_info().await?;
    let default_name = info.default_sink_name.as_deref();

    let transition = next_sink(&sinks, default_name)?;
    let from = match transition.from {
        Some(index) => sinks[index].description.as_str(),
        None => default_name.unwrap_or("unknown sink"),
    };
    let target = &sinks[transition.to];

    writeln!(out, "Switching from {} to {}", from, target.description)?;
    out.flush()?;

    server.set_default_sink(&target.name).await?;
    info!(sink = %target.name, index = target.index, "Default sink switched");

    writeln!(out, "Successfully switched default sink")?;
    out.flush()?;
    Ok(())
}
