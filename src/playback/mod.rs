//! Melody Playback Engine
//!
//! A single-threaded, non-blocking state machine that advances one melody
//! note per poll. The host's main loop calls [`MelodyPlayer::poll`] every
//! few milliseconds with the current timestamp; all delays are realized by
//! comparing timestamps across polls, never by sleeping. Each note is
//! preceded by a short silent gap so consecutive identical notes stay
//! perceptually distinct.

mod palette;

pub use palette::{color_for_frequency, BAND_COLORS};

use crate::config::EngineConfig;
use crate::hal::Actuators;
use crate::melody::MelodySequence;
use log::{debug, info};

/// Observable phase of the playback state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// No melody is playing.
    Idle,
    /// Waiting out the silent separator before the next note.
    Gap,
    /// A note's tone and color are currently active.
    Note,
}

/// Non-blocking melody scheduler.
///
/// Owns the currently loaded [`MelodySequence`] and drives injected
/// [`Actuators`] as notes begin and end. All state transitions happen
/// synchronously inside [`start`](Self::start), [`stop`](Self::stop) and
/// [`poll`](Self::poll).
#[derive(Debug, Clone)]
pub struct MelodyPlayer {
    sequence: MelodySequence,
    config: EngineConfig,
    playing: bool,
    current_step: usize,
    note_active: bool,
    // 0 is the "never" sentinel so the first note starts on the first poll.
    last_transition_ms: u64,
}

impl MelodyPlayer {
    /// Create an idle player with an empty sequence.
    pub fn new(config: EngineConfig) -> Self {
        MelodyPlayer {
            sequence: MelodySequence::new(),
            config,
            playing: false,
            current_step: 0,
            note_active: false,
            last_transition_ms: 0,
        }
    }

    /// Replace the loaded sequence wholesale.
    ///
    /// Playback state is left untouched: if a melody is mid-flight it keeps
    /// running against the new contents and completes naturally once the
    /// step index passes the new length.
    pub fn load_sequence(&mut self, sequence: MelodySequence) {
        debug!("loaded melody sequence with {} notes", sequence.len());
        self.sequence = sequence;
    }

    /// The currently loaded sequence.
    pub fn sequence(&self) -> &MelodySequence {
        &self.sequence
    }

    /// Number of notes in the loaded sequence.
    pub fn note_count(&self) -> usize {
        self.sequence.len()
    }

    /// Whether a melody is currently playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Index of the step the player will handle next.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Current observable phase.
    pub fn phase(&self) -> PlaybackPhase {
        if !self.playing {
            PlaybackPhase::Idle
        } else if self.note_active {
            PlaybackPhase::Note
        } else {
            PlaybackPhase::Gap
        }
    }

    /// Begin playback from the first note.
    ///
    /// No-op when the sequence is empty or a melody is already playing.
    pub fn start(&mut self) {
        if self.sequence.is_empty() || self.playing {
            return;
        }
        info!("starting melody playback ({} notes)", self.sequence.len());
        self.playing = true;
        self.current_step = 0;
        self.note_active = false;
        self.last_transition_ms = 0;
    }

    /// Reset to idle without touching the actuators.
    ///
    /// Silencing is the caller's responsibility; the engine layer pairs this
    /// with an explicit tone/color shutdown.
    pub fn stop(&mut self) {
        if self.playing {
            info!("stopping melody playback at step {}", self.current_step);
        }
        self.playing = false;
        self.current_step = 0;
        self.note_active = false;
    }

    /// Advance the state machine by at most one transition.
    ///
    /// Expected to be called from the host main loop at sub-duration
    /// granularity (every few milliseconds). Never blocks.
    pub fn poll(&mut self, now_ms: u64, actuators: &mut dyn Actuators) {
        if !self.playing {
            return;
        }

        // Sequence exhausted: silence everything exactly once and go idle.
        if self.current_step >= self.sequence.len() {
            info!("melody playback finished");
            self.stop();
            actuators.stop_tone();
            actuators.clear_color();
            return;
        }

        let note = self.sequence.as_slice()[self.current_step];

        // Invalid slots play as silence.
        if note.is_silent() {
            debug!("skipping silent step {}", self.current_step);
            self.current_step += 1;
            return;
        }

        if self.note_active {
            if now_ms.saturating_sub(self.last_transition_ms) >= u64::from(note.duration_ms) {
                actuators.stop_tone();
                actuators.clear_color();
                self.note_active = false;
                self.last_transition_ms = now_ms;
                self.current_step += 1;
            }
        } else if self.gap_elapsed(now_ms) {
            debug!(
                "step {}: {} Hz for {} ms",
                self.current_step, note.frequency_hz, note.duration_ms
            );
            actuators.set_color(color_for_frequency(note.frequency_hz));
            actuators.set_tone(note.frequency_hz);
            self.note_active = true;
            self.last_transition_ms = now_ms;
        }
    }

    /// The first note starts immediately (sentinel 0); later notes wait out
    /// the configured gap.
    fn gap_elapsed(&self, now_ms: u64) -> bool {
        self.last_transition_ms == 0
            || now_ms.saturating_sub(self.last_transition_ms) >= u64::from(self.config.note_gap_ms)
    }
}
