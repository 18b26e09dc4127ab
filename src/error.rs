use std::time::Duration;

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum SinkSwitchError {
    #[error("{0}")]
    Usage(#[from] UsageError),

    #[error("{0}")]
    Pulse(#[from] PulseError),

    #[error("{0}")]
    Cycle(#[from] CycleError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No reply from the audio server within {0:?}")]
    Timeout(Duration),

    #[error("Interrupted")]
    Interrupted,
}

/// Command-line mode selection errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("Error: Please specify either -l (list) or -t (toggle) option")]
    NoMode,

    #[error("Error: Cannot use both -l and -t options simultaneously")]
    ConflictingModes,
}

/// Audio server connection and request errors
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Failed to create {0}")]
    Init(&'static str),

    #[error("Failed to connect to PulseAudio server: {message} (error code: {code})")]
    Connect { code: i32, message: String },

    #[error("Lost connection to PulseAudio server ({0:?})")]
    ContextState(libpulse_binding::context::State),

    #[error("Mainloop iteration failed: {0}")]
    Iterate(libpulse_binding::error::PAErr),

    #[error("Mainloop quit with status {0}")]
    Quit(i32),

    #[error("Request to {operation} was cancelled")]
    Cancelled { operation: &'static str },

    #[error("Failed to {operation}: {message} (error code: {code})")]
    Request {
        operation: &'static str,
        code: i32,
        message: String,
    },

    #[error("Out of memory while collecting sinks")]
    OutOfMemory,
}

/// Default-sink resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    #[error("No sinks available to switch between")]
    NoSinks,
}

/// Output-type extraction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutputTypeError {
    #[error("no type found in sink name {0:?}")]
    NoType(String),
}

/// Result type alias for sinkswitch operations
pub type Result<T> = std::result::Result<T, SinkSwitchError>;

impl PulseError {
    /// Build a request failure from the server's last error code
    pub fn request(operation: &'static str, err: libpulse_binding::error::PAErr) -> Self {
        let message = format!("{}", err);
        PulseError::Request {
            operation,
            code: err.0,
            message: if message.is_empty() {
                String::from("Unknown error code")
            } else {
                message
            },
        }
    }
}

impl SinkSwitchError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        // Every failure is terminal and reported with the same status.
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_messages() {
        assert_eq!(
            UsageError::NoMode.to_string(),
            "Error: Please specify either -l (list) or -t (toggle) option"
        );
        assert_eq!(
            UsageError::ConflictingModes.to_string(),
            "Error: Cannot use both -l and -t options simultaneously"
        );
    }

    #[test]
    fn test_request_error_carries_code() {
        let err = PulseError::Request {
            operation: "switch default sink",
            code: 5,
            message: "No such entity".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to switch default sink: No such entity (error code: 5)"
        );
    }

    #[test]
    fn test_connect_error_carries_code() {
        let err = PulseError::Connect {
            code: 6,
            message: "Connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to connect to PulseAudio server: Connection refused (error code: 6)"
        );
    }

    #[test]
    fn test_lost_connection_message() {
        let err = PulseError::ContextState(libpulse_binding::context::State::Failed);
        assert_eq!(err.to_string(), "Lost connection to PulseAudio server (Failed)");
    }

    #[test]
    fn test_every_error_exits_one() {
        let errors = [
            SinkSwitchError::from(UsageError::NoMode),
            SinkSwitchError::from(CycleError::NoSinks),
            SinkSwitchError::from(PulseError::OutOfMemory),
            SinkSwitchError::Interrupted,
            SinkSwitchError::Timeout(Duration::from_secs(1)),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1);
        }
    }
}
