//! Melody Text Parser
//!
//! Parses the wire format `TOKEN := INTEGER ('@' INTEGER)?`, tokens
//! separated by any non-digit, non-sign characters. The parser never fails:
//! out-of-range values are clamped, malformed tokens are skipped one byte
//! at a time until the next plausible numeric start. Wireless input is
//! unreliable, so a best-effort sequence always beats an error.

use super::{MelodySequence, Note};
use crate::config::EngineConfig;

/// Parse melody text into a sequence, keeping at most the first 100 valid
/// tokens. Operates on raw transport bytes; non-ASCII garbage is treated
/// like any other token separator.
pub fn parse_sequence(input: &[u8], config: &EngineConfig) -> MelodySequence {
    let mut sequence = MelodySequence::new();
    let mut cursor = 0usize;

    while cursor < input.len() && sequence.len() < sequence.capacity() {
        cursor = skip_whitespace(input, cursor);
        if cursor >= input.len() {
            break;
        }

        let (raw_frequency, after_frequency) = match try_parse_number(input, cursor) {
            Some(parsed) => parsed,
            None => {
                // No digits at the cursor: advance one byte so the loop
                // always makes progress, then hunt for the next token.
                cursor = skip_to_next_token(input, cursor + 1);
                continue;
            }
        };
        cursor = after_frequency;
        let frequency =
            clamp_to_range(raw_frequency, config.min_frequency_hz, config.max_frequency_hz);

        let mut raw_duration = i64::from(config.default_duration_ms);
        if input.get(cursor) == Some(&b'@') {
            cursor += 1;
            if let Some((value, after_duration)) = try_parse_number(input, cursor) {
                raw_duration = value;
                cursor = after_duration;
            }
        }
        let duration = clamp_to_range(raw_duration, config.min_duration_ms, config.max_duration_ms);

        sequence.push(Note::new(frequency, duration));
        cursor = skip_to_next_token(input, cursor);
    }

    sequence
}

fn skip_whitespace(input: &[u8], mut cursor: usize) -> usize {
    while cursor < input.len() && input[cursor].is_ascii_whitespace() {
        cursor += 1;
    }
    cursor
}

/// Advance to the next byte that could start a number: a sign or a digit.
fn skip_to_next_token(input: &[u8], mut cursor: usize) -> usize {
    while cursor < input.len() {
        let byte = input[cursor];
        if byte == b'-' || byte == b'+' || byte.is_ascii_digit() {
            break;
        }
        cursor += 1;
    }
    cursor
}

/// Parse an optionally signed decimal integer at `cursor`.
///
/// Returns the value and the position just past it, or `None` when no digit
/// follows the (optional) sign. Accumulation saturates so absurdly long
/// digit runs cannot overflow; clamping collapses them anyway.
fn try_parse_number(input: &[u8], cursor: usize) -> Option<(i64, usize)> {
    let mut pos = cursor;
    let mut negative = false;

    match input.get(pos) {
        Some(b'-') => {
            negative = true;
            pos += 1;
        }
        Some(b'+') => {
            pos += 1;
        }
        _ => {}
    }

    let digits_start = pos;
    let mut value: i64 = 0;
    while let Some(byte) = input.get(pos) {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
        pos += 1;
    }

    if pos == digits_start {
        return None;
    }

    let value = if negative { -value } else { value };
    Some((value, pos))
}

fn clamp_to_range(value: i64, min: u16, max: u16) -> u16 {
    if value < i64::from(min) {
        min
    } else if value > i64::from(max) {
        max
    } else {
        value as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_MELODY_STEPS;

    fn parse(input: &str) -> MelodySequence {
        parse_sequence(input.as_bytes(), &EngineConfig::default())
    }

    #[test]
    fn test_parse_well_formed_tokens() {
        let seq = parse("440@500 880@250 660@125");
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(0), Some(Note::new(440, 500)));
        assert_eq!(seq.get(1), Some(Note::new(880, 250)));
        assert_eq!(seq.get(2), Some(Note::new(660, 125)));
    }

    #[test]
    fn test_missing_duration_uses_default() {
        let seq = parse("440@500 0@300 660");
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(0), Some(Note::new(440, 500)));
        assert_eq!(seq.get(1), Some(Note::new(0, 300)));
        assert_eq!(seq.get(2), Some(Note::new(660, 500)));
    }

    #[test]
    fn test_dangling_separator_uses_default() {
        let seq = parse("440@");
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.get(0), Some(Note::new(440, 500)));
    }

    #[test]
    fn test_frequency_clamping() {
        let seq = parse("-100@500 99999@500 20000@500");
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(0).unwrap().frequency_hz, 0);
        assert_eq!(seq.get(1).unwrap().frequency_hz, 20_000);
        assert_eq!(seq.get(2).unwrap().frequency_hz, 20_000);
    }

    #[test]
    fn test_duration_clamping() {
        let seq = parse("440@0 440@-5 440@99999");
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(0).unwrap().duration_ms, 1);
        assert_eq!(seq.get(1).unwrap().duration_ms, 1);
        assert_eq!(seq.get(2).unwrap().duration_ms, 10_000);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("   \t\n ").is_empty());
    }

    #[test]
    fn test_pure_garbage_yields_nothing() {
        assert!(parse("hello world, no numbers here!").is_empty());
        assert!(parse("@@@@@@").is_empty());
        assert!(parse("- + - +").is_empty());
    }

    #[test]
    fn test_garbage_between_tokens_is_skipped() {
        let seq = parse("abc 440@500 !!?? 880");
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(0), Some(Note::new(440, 500)));
        assert_eq!(seq.get(1), Some(Note::new(880, 500)));
    }

    #[test]
    fn test_adjacent_signed_number_starts_new_token() {
        // "12-34": the '-' ends the first token and starts the next one,
        // which clamps to the minimum frequency.
        let seq = parse("12-34");
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(0), Some(Note::new(12, 500)));
        assert_eq!(seq.get(1), Some(Note::new(0, 500)));
    }

    #[test]
    fn test_plus_sign_is_accepted() {
        let seq = parse("+440@+500");
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.get(0), Some(Note::new(440, 500)));
    }

    #[test]
    fn test_overlong_digit_run_saturates_then_clamps() {
        let seq = parse("99999999999999999999999@500");
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.get(0).unwrap().frequency_hz, 20_000);
    }

    #[test]
    fn test_capacity_limit() {
        let input = (0..150)
            .map(|i| format!("{}@100", 100 + i))
            .collect::<Vec<_>>()
            .join(" ");
        let seq = parse(&input);
        assert_eq!(seq.len(), MAX_MELODY_STEPS);
        assert_eq!(seq.get(0), Some(Note::new(100, 100)));
        assert_eq!(
            seq.get(MAX_MELODY_STEPS - 1),
            Some(Note::new(100 + MAX_MELODY_STEPS as u16 - 1, 100))
        );
    }

    #[test]
    fn test_non_utf8_bytes_are_separators() {
        let mut input = vec![0xFF, 0xFE];
        input.extend_from_slice(b"440@500");
        input.push(0x80);
        let seq = parse_sequence(&input, &EngineConfig::default());
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.get(0), Some(Note::new(440, 500)));
    }
}
