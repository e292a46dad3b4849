//! Melody Sequence Engine for a Wireless-Configurable Alarm Device
//!
//! Firmware component that receives a textual melody description over an
//! opaque byte transport, parses it into a bounded sequence of
//! (frequency, duration) notes, and plays the sequence back with
//! non-blocking cooperative timing while mapping each note's frequency to
//! a display color.
//!
//! # Features
//! - Fault-tolerant melody text parser (malformed tokens skipped, values
//!   clamped, never an error)
//! - Fixed-capacity sequence storage, no allocation during playback
//! - Two-phase (gap/note) playback state machine driven by `poll`
//! - Capability traits for actuators, clock, transport and display so the
//!   engine runs unmodified against hardware, a simulator or test spies
//! - Serialized readback echo of every accepted melody update
//!
//! # Quick start
//! ```
//! use carillon::{Actuators, BufferChannel, EngineConfig, MelodyEngine, Rgb};
//!
//! struct Silent;
//! impl Actuators for Silent {
//!     fn set_tone(&mut self, _frequency_hz: u16) {}
//!     fn stop_tone(&mut self) {}
//!     fn set_color(&mut self, _color: Rgb) {}
//!     fn clear_color(&mut self) {}
//! }
//!
//! let mut engine = MelodyEngine::new(BufferChannel::new(), EngineConfig::default()).unwrap();
//! engine.transport_mut().push_inbound(b"440@500 660@250");
//! assert!(engine.handle_inbound_update());
//! engine.start_playback();
//!
//! let mut actuators = Silent;
//! let mut now_ms = 0;
//! while engine.is_playing() {
//!     engine.poll(now_ms, &mut actuators);
//!     now_ms += 1;
//! }
//! ```

#![warn(missing_docs)]

pub mod config; // Engine tuning and limits
pub mod display; // Change-detecting time display
pub mod engine; // Public engine surface
pub mod hal; // Actuator and clock capability traits
pub mod melody; // Note model, parser, payload builder
pub mod playback; // Non-blocking playback scheduler
pub mod transport; // Opaque byte channel to the peer

/// Error types for melody engine operations
#[derive(thiserror::Error, Debug)]
pub enum CarillonError {
    /// Invalid engine configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error from the host environment
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for melody engine operations
pub type Result<T> = std::result::Result<T, CarillonError>;

// Public API exports
pub use config::{EngineConfig, MAX_MELODY_STEPS, MELODY_PADDING_GUARD, MELODY_PAYLOAD_BUFFER};
pub use display::{ClockDisplay, TextSurface, TimeOfDay};
pub use engine::MelodyEngine;
pub use hal::{Actuators, Clock, Rgb, SystemClock};
pub use melody::{build_payload, parse_sequence, MelodySequence, Note};
pub use playback::{color_for_frequency, MelodyPlayer, PlaybackPhase};
pub use transport::{BufferChannel, Transport};
