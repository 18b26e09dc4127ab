use libpulse_binding::context::introspect::SinkInfo;
use libpulse_binding::def;

/// Sink activity as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkState {
    /// Playing audio
    Running,
    /// Opened but not playing
    Idle,
    /// Closed by the server
    Suspended,
    /// Unknown to the server
    Invalid,
}

impl SinkState {
    pub fn is_running(self) -> bool {
        self == SinkState::Running
    }
}

impl From<def::SinkState> for SinkState {
    fn from(state: def::SinkState) -> Self {
        match state {
            def::SinkState::Running => SinkState::Running,
            def::SinkState::Idle => SinkState::Idle,
            def::SinkState::Suspended => SinkState::Suspended,
            _ => SinkState::Invalid,
        }
    }
}

/// Owned copy of one audio output device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkRecord {
    pub index: u32,
    /// Stable protocol identifier, e.g. `alsa_output.pci-0000_00_1f.3.analog-stereo`
    pub name: String,
    pub description: String,
    pub state: SinkState,
}

impl SinkRecord {
    pub fn new(
        index: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        state: SinkState,
    ) -> Self {
        Self {
            index,
            name: name.into(),
            description: description.into(),
            state,
        }
    }
}

impl<'a> From<&SinkInfo<'a>> for SinkRecord {
    fn from(info: &SinkInfo<'a>) -> Self {
        let name = info
            .name
            .as_ref()
            .map(|cow| cow.to_string())
            .unwrap_or_default();
        // Fall back to the identifier so messages never show an empty name
        let description = info
            .description
            .as_ref()
            .map(|cow| cow.to_string())
            .unwrap_or_else(|| name.clone());

        Self {
            index: info.index,
            name,
            description,
            state: info.state.into(),
        }
    }
}
