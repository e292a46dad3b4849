//! Melody Engine
//!
//! Ties the transport, the parser and the playback scheduler together into
//! the surface the device firmware calls from its main loop: poll for
//! inbound melody updates, echo the accepted sequence back, and drive
//! playback without ever blocking.

use crate::config::{EngineConfig, MELODY_PAYLOAD_BUFFER};
use crate::hal::Actuators;
use crate::melody::{build_payload, parse_sequence, MelodySequence};
use crate::playback::{MelodyPlayer, PlaybackPhase};
use crate::transport::Transport;
use crate::Result;
use log::info;

/// The melody sequence engine.
///
/// Generic over the [`Transport`] so the same engine runs against the
/// wireless link on the device and an in-memory channel in tests and the
/// host simulator.
#[derive(Debug)]
pub struct MelodyEngine<T: Transport> {
    transport: T,
    player: MelodyPlayer,
    config: EngineConfig,
}

impl<T: Transport> MelodyEngine<T> {
    /// Create an engine around a transport.
    ///
    /// # Errors
    /// Returns [`CarillonError::Config`](crate::CarillonError::Config) when
    /// the configuration bounds are inconsistent.
    pub fn new(transport: T, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(MelodyEngine {
            transport,
            player: MelodyPlayer::new(config),
            config,
        })
    }

    /// Consume any pending inbound melody text.
    ///
    /// When new data is pending: parse it, replace the loaded sequence
    /// wholesale, echo the normalized serialized form back over the
    /// transport as a readback confirmation, and return `true`. Otherwise
    /// return `false`.
    pub fn handle_inbound_update(&mut self) -> bool {
        if !self.transport.has_pending_write() {
            return false;
        }

        let mut buf = [0u8; MELODY_PAYLOAD_BUFFER];
        let len = self.transport.read(&mut buf);
        let sequence = parse_sequence(&buf[..len], &self.config);
        info!(
            "melody update accepted: {} notes from {} inbound bytes",
            sequence.len(),
            len
        );
        self.player.load_sequence(sequence);
        self.publish_sequence();
        true
    }

    /// Write the serialized form of the loaded sequence to the transport.
    pub fn publish_sequence(&mut self) {
        let payload = build_payload(self.player.sequence());
        self.transport.write(payload.as_bytes());
    }

    /// Begin playback of the loaded sequence; no-op when it is empty or a
    /// melody is already playing.
    pub fn start_playback(&mut self) {
        self.player.start();
    }

    /// Stop playback and silence the actuators.
    ///
    /// The scheduler itself only resets state on stop; the engine pairs the
    /// explicit stop with a tone/color shutdown so an interrupted melody
    /// never leaves the buzzer screaming.
    pub fn stop_playback(&mut self, actuators: &mut dyn Actuators) {
        self.player.stop();
        actuators.stop_tone();
        actuators.clear_color();
    }

    /// Advance playback by at most one transition. Non-blocking; call every
    /// few milliseconds from the main loop.
    pub fn poll(&mut self, now_ms: u64, actuators: &mut dyn Actuators) {
        self.player.poll(now_ms, actuators);
    }

    /// Whether a melody is currently playing.
    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// Current phase of the playback state machine.
    pub fn phase(&self) -> PlaybackPhase {
        self.player.phase()
    }

    /// Number of notes in the loaded sequence.
    pub fn note_count(&self) -> usize {
        self.player.note_count()
    }

    /// The loaded sequence.
    pub fn sequence(&self) -> &MelodySequence {
        self.player.sequence()
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::BufferChannel;

    fn engine() -> MelodyEngine<BufferChannel> {
        MelodyEngine::new(BufferChannel::new(), EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig {
            min_duration_ms: 0,
            ..Default::default()
        };
        assert!(MelodyEngine::new(BufferChannel::new(), config).is_err());
    }

    #[test]
    fn test_no_pending_data_returns_false() {
        let mut engine = engine();
        assert!(!engine.handle_inbound_update());
        assert_eq!(engine.note_count(), 0);
    }

    #[test]
    fn test_inbound_update_replaces_sequence_and_echoes() {
        let mut engine = engine();
        engine.transport_mut().push_inbound(b"440@500 junk 660");
        assert!(engine.handle_inbound_update());
        assert_eq!(engine.note_count(), 2);
        assert_eq!(
            engine.transport().last_outbound(),
            Some(b"440@500 660@500".as_ref())
        );
    }

    #[test]
    fn test_second_update_overwrites_first() {
        let mut engine = engine();
        engine.transport_mut().push_inbound(b"440@500 880@500");
        engine.handle_inbound_update();
        assert_eq!(engine.note_count(), 2);

        engine.transport_mut().push_inbound(b"220@100");
        engine.handle_inbound_update();
        assert_eq!(engine.note_count(), 1);
        assert_eq!(engine.sequence().get(0).unwrap().frequency_hz, 220);
    }

    #[test]
    fn test_garbage_update_yields_empty_sequence() {
        let mut engine = engine();
        engine.transport_mut().push_inbound(b"no notes at all");
        assert!(engine.handle_inbound_update());
        assert_eq!(engine.note_count(), 0);
        assert_eq!(engine.transport().last_outbound(), Some(b"".as_ref()));
    }

    #[test]
    fn test_start_without_melody_stays_idle() {
        let mut engine = engine();
        engine.start_playback();
        assert!(!engine.is_playing());
        assert_eq!(engine.phase(), PlaybackPhase::Idle);
    }
}
