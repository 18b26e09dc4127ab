use tracing::{debug, warn};

use crate::error::CycleError;

use super::SinkRecord;

/// Which sink is current and which one to switch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Position of the current default, `None` if it is not among the sinks
    pub from: Option<usize>,
    /// Position of the sink to make default
    pub to: usize,
}

/// Pick the sink after the current default, wrapping around
///
/// When the default is unknown the first sink is chosen and a warning is
/// logged. This is not the same as treating the first sink as current,
/// which would move on to the second one.
pub fn next_sink(sinks: &[SinkRecord], default_name: Option<&str>) -> Result<Transition, CycleError> {
    if sinks.is_empty() {
        return Err(CycleError::NoSinks);
    }

    let current = default_name.and_then(|name| sinks.iter().position(|sink| sink.name == name));

    let transition = match current {
        Some(index) => Transition {
            from: Some(index),
            to: (index + 1) % sinks.len(),
        },
        None => {
            warn!(
                default = default_name.unwrap_or("<none>"),
                "Default sink not found among sinks, switching to the first one"
            );
            Transition { from: None, to: 0 }
        }
    };

    debug!(?transition, count = sinks.len(), "Resolved next sink");
    Ok(transition)
}
