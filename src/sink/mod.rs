mod cycle;
mod output_type;
mod types;

pub use cycle::next_sink;
pub use output_type::output_type;
pub use types::{SinkRecord, SinkState};

use tracing::debug;

/// Format one list-mode token: the output type, starred when the sink is running
pub fn list_token(sink: &SinkRecord) -> Option<String> {
    match output_type(&sink.name) {
        Ok(kind) => Some(format!(
            "{}{}",
            kind,
            if sink.state.is_running() { "*" } else { "" }
        )),
        Err(e) => {
            debug!(sink = %sink.name, error = %e, "Skipping sink");
            None
        }
    }
}

/// Build the single list-mode line, one space-prefixed token per sink
pub fn list_line(sinks: &[SinkRecord]) -> String {
    sinks
        .iter()
        .filter_map(list_token)
        .map(|token| format!(" {}", token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_line_marks_running_sink() {
        let sinks = vec![SinkRecord::new(
            0,
            "alsa_output.pci-0000_00_1f.3.analog-stereo",
            "Built-in Audio Analog Stereo",
            SinkState::Running,
        )];
        assert_eq!(list_line(&sinks), " analog*");
    }

    #[test]
    fn test_list_line_one_token_per_sink() {
        let sinks = vec![
            SinkRecord::new(0, "alsa_output.pci-0000_00_1f.3.analog-stereo", "Speakers", SinkState::Suspended),
            SinkRecord::new(1, "alsa_output.pci-0000_01_00.1.hdmi-stereo-extra1", "HDMI", SinkState::Running),
            SinkRecord::new(2, "bluez_output.00_1B_66_AA_BB_CC.1", "Headphones", SinkState::Idle),
        ];
        assert_eq!(list_line(&sinks), " analog hdmi* 1");
    }

    #[test]
    fn test_list_line_skips_names_without_type() {
        let sinks = vec![
            SinkRecord::new(0, "null", "Dummy Output", SinkState::Running),
            SinkRecord::new(1, "alsa_output.usb-headset.iec958-stereo", "USB", SinkState::Idle),
        ];
        assert_eq!(list_line(&sinks), " iec958");
    }

    #[test]
    fn test_list_line_empty() {
        assert_eq!(list_line(&[]), "");
    }
}
