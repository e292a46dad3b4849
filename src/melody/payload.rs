//! Outbound Payload Builder
//!
//! Serializes a sequence back into the `frequency@duration` wire format so
//! the transport can echo the accepted melody to the remote peer. The text
//! is the parser's semantic inverse: values were already clamped and
//! defaulted on the way in, so parsing the payload again reproduces the
//! same sequence.

use super::MelodySequence;
use crate::config::{MELODY_PADDING_GUARD, MELODY_PAYLOAD_BUFFER};

/// Render the sequence as space-separated `frequency@duration` tokens.
///
/// Emission stops before any token would push the text past the payload
/// buffer minus the padding guard. That is a soft truncation: the omitted
/// notes stay in the in-memory sequence and still play.
pub fn build_payload(sequence: &MelodySequence) -> String {
    build_payload_bounded(sequence, MELODY_PAYLOAD_BUFFER)
}

/// [`build_payload`] with an explicit payload limit, for transports with a
/// smaller characteristic buffer.
pub fn build_payload_bounded(sequence: &MelodySequence, max_payload: usize) -> String {
    let limit = max_payload.saturating_sub(MELODY_PADDING_GUARD);
    let mut payload = String::with_capacity(max_payload.min(MELODY_PAYLOAD_BUFFER));

    for (index, note) in sequence.iter().enumerate() {
        let token = format!("{}@{}", note.frequency_hz, note.duration_ms);
        let separator = usize::from(index > 0);
        if payload.len() + separator + token.len() > limit {
            break;
        }
        if index > 0 {
            payload.push(' ');
        }
        payload.push_str(&token);
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::melody::{parse_sequence, Note};

    fn sequence_of(notes: &[(u16, u16)]) -> MelodySequence {
        let mut seq = MelodySequence::new();
        for &(frequency, duration) in notes {
            seq.push(Note::new(frequency, duration));
        }
        seq
    }

    #[test]
    fn test_empty_sequence_renders_empty() {
        assert_eq!(build_payload(&MelodySequence::new()), "");
    }

    #[test]
    fn test_tokens_in_original_order() {
        let seq = sequence_of(&[(440, 500), (0, 300), (660, 500)]);
        assert_eq!(build_payload(&seq), "440@500 0@300 660@500");
    }

    #[test]
    fn test_truncation_never_splits_a_token() {
        let seq = sequence_of(&[(20_000, 10_000); 100]);
        let payload = build_payload_bounded(&seq, 64);
        assert!(payload.len() <= 64 - MELODY_PADDING_GUARD);
        // Every emitted token must be complete.
        for token in payload.split(' ') {
            assert_eq!(token, "20000@10000");
        }
        assert_eq!(payload.split(' ').count(), 4);
    }

    #[test]
    fn test_full_sequence_exceeds_buffer_and_truncates() {
        let seq = sequence_of(&[(20_000, 10_000); 100]);
        let payload = build_payload(&seq);
        assert!(payload.len() <= MELODY_PAYLOAD_BUFFER - MELODY_PADDING_GUARD);
        assert!(payload.split(' ').count() < 100);
    }

    #[test]
    fn test_parse_is_idempotent_on_payload() {
        let config = EngineConfig::default();
        let first = parse_sequence(b"440@500 880 300@1", &config);
        let echoed = parse_sequence(build_payload(&first).as_bytes(), &config);
        assert_eq!(echoed, first);
    }
}
