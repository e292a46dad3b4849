//! Engine Configuration
//!
//! Tuning values for the melody engine: clamping bounds, parse defaults,
//! playback gap timing and transport payload sizing. The device build uses
//! the defaults; the host simulator can load overrides from JSON.

use crate::{CarillonError, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of notes a melody sequence can hold.
pub const MAX_MELODY_STEPS: usize = 100;

/// Maximum transport payload size in bytes (matches the characteristic buffer).
pub const MELODY_PAYLOAD_BUFFER: usize = 512;

/// Bytes kept free at the end of an outbound payload so a token is never cut
/// mid-write.
pub const MELODY_PADDING_GUARD: usize = 8;

/// Runtime-tunable engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Silent separator between notes, in milliseconds.
    pub note_gap_ms: u16,
    /// Duration applied when a token carries no `@duration` part.
    pub default_duration_ms: u16,
    /// Lower clamping bound for parsed frequencies (Hz).
    pub min_frequency_hz: u16,
    /// Upper clamping bound for parsed frequencies (Hz).
    pub max_frequency_hz: u16,
    /// Lower clamping bound for parsed durations (ms).
    pub min_duration_ms: u16,
    /// Upper clamping bound for parsed durations (ms).
    pub max_duration_ms: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            note_gap_ms: 10,
            default_duration_ms: 500,
            min_frequency_hz: 0,
            max_frequency_hz: 20_000,
            min_duration_ms: 1,
            max_duration_ms: 10_000,
        }
    }
}

impl EngineConfig {
    /// Validate internal consistency of the bounds.
    ///
    /// # Errors
    /// Returns [`CarillonError::Config`] if a minimum exceeds its maximum,
    /// the minimum duration is zero, or the fallback duration lies outside
    /// the duration bounds.
    pub fn validate(&self) -> Result<()> {
        if self.min_frequency_hz > self.max_frequency_hz {
            return Err(CarillonError::Config(format!(
                "min_frequency_hz {} exceeds max_frequency_hz {}",
                self.min_frequency_hz, self.max_frequency_hz
            )));
        }
        if self.min_duration_ms == 0 {
            return Err(CarillonError::Config(
                "min_duration_ms cannot be zero (a zero-length note never ends its phase)".into(),
            ));
        }
        if self.min_duration_ms > self.max_duration_ms {
            return Err(CarillonError::Config(format!(
                "min_duration_ms {} exceeds max_duration_ms {}",
                self.min_duration_ms, self.max_duration_ms
            )));
        }
        if self.default_duration_ms < self.min_duration_ms
            || self.default_duration_ms > self.max_duration_ms
        {
            return Err(CarillonError::Config(format!(
                "default_duration_ms {} outside [{}, {}]",
                self.default_duration_ms, self.min_duration_ms, self.max_duration_ms
            )));
        }
        Ok(())
    }
}
