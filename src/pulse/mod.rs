//! Request/response access to a PulseAudio-compatible server.
//!
//! `AudioServer` is the seam the rest of the program talks to. `PulseServer`
//! implements it on top of libpulse's standard mainloop.

mod connection;
mod server;

pub use server::PulseServer;

use async_trait::async_trait;

use crate::error::PulseError;
use crate::sink::SinkRecord;

/// Application name announced to the server
pub const APPLICATION_NAME: &str = env!("CARGO_PKG_NAME");

/// Owned copy of the server information this program uses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server package name (usually "pulseaudio")
    pub server_name: Option<String>,
    /// Version string of the daemon
    pub server_version: Option<String>,
    /// Name of the default sink
    pub default_sink_name: Option<String>,
}

impl<'a> From<&libpulse_binding::context::introspect::ServerInfo<'a>> for ServerInfo {
    fn from(info: &libpulse_binding::context::introspect::ServerInfo<'a>) -> Self {
        Self {
            server_name: info.server_name.as_ref().map(|cow| cow.to_string()),
            server_version: info.server_version.as_ref().map(|cow| cow.to_string()),
            default_sink_name: info.default_sink_name.as_ref().map(|cow| cow.to_string()),
        }
    }
}

/// Requests this program makes against the audio server
///
/// Each call completes before the next one is issued.
#[async_trait(?Send)]
pub trait AudioServer {
    /// Enumerate all sinks in server order
    async fn sinks(&mut self) -> Result<Vec<SinkRecord>, PulseError>;

    /// Query server information, including the default sink name
    async fn server_info(&mut self) -> Result<ServerInfo, PulseError>;

    /// Make the named sink the server default
    async fn set_default_sink(&mut self, name: &str) -> Result<(), PulseError>;
}
