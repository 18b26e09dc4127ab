use crate::error::OutputTypeError;

/// Size of the output-type buffer, including room for a terminator
pub const OUTPUT_TYPE_CAPACITY: usize = 64;

/// Extract the output type from a sink name
///
/// The type is the token after the last `.`, cut at the first `-` that
/// follows it (e.g. `alsa_output.pci-0000_00_1f.3.analog-stereo` -> `analog`).
/// Tokens longer than `OUTPUT_TYPE_CAPACITY - 1` bytes are truncated.
pub fn output_type(name: &str) -> Result<&str, OutputTypeError> {
    let (_, tail) = name
        .rsplit_once('.')
        .ok_or_else(|| OutputTypeError::NoType(name.to_string()))?;

    let token = tail.split('-').next().unwrap_or(tail);
    Ok(truncate(token, OUTPUT_TYPE_CAPACITY - 1))
}

/// Cut `s` to at most `max` bytes without splitting a character
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alsa_analog() {
        assert_eq!(
            output_type("alsa_output.pci-0000_00_1f.3.analog-stereo"),
            Ok("analog")
        );
    }

    #[test]
    fn test_no_hyphen_takes_rest() {
        assert_eq!(output_type("bluez_sink.00_1B_66_AA_BB_CC.a2dp_sink"), Ok("a2dp_sink"));
    }

    #[test]
    fn test_hyphens_before_last_dot_ignored() {
        assert_eq!(output_type("alsa_output.usb-Generic_USB-00.iec958-stereo"), Ok("iec958"));
    }

    #[test]
    fn test_no_dot_fails() {
        assert_eq!(
            output_type("auto_null"),
            Err(OutputTypeError::NoType("auto_null".to_string()))
        );
    }

    #[test]
    fn test_empty_tokens() {
        assert_eq!(output_type("trailing."), Ok(""));
        assert_eq!(output_type("sink.-stereo"), Ok(""));
    }

    #[test]
    fn test_long_token_truncated() {
        let long = "x".repeat(100);
        let name = format!("alsa_output.{}-stereo", long);
        let kind = output_type(&name).unwrap();
        assert_eq!(kind.len(), OUTPUT_TYPE_CAPACITY - 1);
        assert!(long.starts_with(kind));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 62 ASCII bytes then a 2-byte character straddling the limit
        let token = format!("{}é", "a".repeat(62));
        let name = format!("sink.{}", token);
        assert_eq!(output_type(&name), Ok("a".repeat(62).as_str()));
    }
}
