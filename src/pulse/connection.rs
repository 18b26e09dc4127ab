use libpulse_binding::context::State;
use libpulse_binding::operation;

use crate::error::PulseError;

/// What to do after observing a context state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStep {
    /// Still negotiating, keep iterating
    Wait,
    /// Requests may be issued
    Ready,
    /// The connection is gone for good
    Closed(State),
}

/// Classify a context state
pub fn step(state: State) -> ConnectionStep {
    match state {
        State::Ready => ConnectionStep::Ready,
        State::Failed | State::Terminated => ConnectionStep::Closed(state),
        State::Unconnected | State::Connecting | State::Authorizing | State::SettingName => {
            ConnectionStep::Wait
        }
    }
}

impl ConnectionStep {
    /// Turn a closed connection into an error; `Wait` and `Ready` pass through
    pub fn check(self) -> Result<Self, PulseError> {
        match self {
            ConnectionStep::Closed(state) => Err(PulseError::ContextState(state)),
            other => Ok(other),
        }
    }
}

/// Check an outstanding request after one mainloop iteration
///
/// Returns `true` once the request is done. A connection that closed while
/// the request was running fails it, whatever the request's own state.
pub fn request_step(
    context: State,
    request: operation::State,
    name: &'static str,
) -> Result<bool, PulseError> {
    step(context).check()?;

    match request {
        operation::State::Done => Ok(true),
        operation::State::Running => Ok(false),
        operation::State::Cancelled => Err(PulseError::Cancelled { operation: name }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready() {
        assert_eq!(step(State::Ready), ConnectionStep::Ready);
    }

    #[test]
    fn test_transient_states_wait() {
        for state in [
            State::Unconnected,
            State::Connecting,
            State::Authorizing,
            State::SettingName,
        ] {
            assert_eq!(step(state), ConnectionStep::Wait);
        }
    }

    #[test]
    fn test_failed_and_terminated_close() {
        assert_eq!(step(State::Failed), ConnectionStep::Closed(State::Failed));
        assert_eq!(step(State::Terminated), ConnectionStep::Closed(State::Terminated));
        assert!(matches!(
            step(State::Failed).check(),
            Err(PulseError::ContextState(State::Failed))
        ));
        assert!(step(State::Connecting).check().is_ok());
    }

    #[test]
    fn test_request_runs_until_done() {
        assert!(!request_step(State::Ready, operation::State::Running, "list sinks").unwrap());
        assert!(request_step(State::Ready, operation::State::Done, "list sinks").unwrap());
    }

    #[test]
    fn test_connection_lost_mid_request() {
        for context in [State::Failed, State::Terminated] {
            let err = request_step(context, operation::State::Running, "switch default sink")
                .unwrap_err();
            assert!(matches!(err, PulseError::ContextState(state) if state == context));
        }
        // A finished reply does not rescue a closed connection
        assert!(request_step(State::Failed, operation::State::Done, "list sinks").is_err());
    }

    #[test]
    fn test_cancelled_request() {
        let err = request_step(State::Ready, operation::State::Cancelled, "query server info")
            .unwrap_err();
        assert_eq!(err.to_string(), "Request to query server info was cancelled");
    }
}
