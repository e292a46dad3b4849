//! Melody Sequence Model
//!
//! A melody is a bounded, ordered list of (frequency, duration) notes held
//! in a fixed-capacity array. The array never grows: the engine replaces it
//! wholesale on each successful parse, and nothing allocates during
//! playback.

mod parser;
mod payload;

pub use parser::parse_sequence;
pub use payload::build_payload;

use crate::config::MAX_MELODY_STEPS;

/// One audible/visual beat: a tone frequency and how long to hold it.
///
/// A frequency of zero marks a silent placeholder that playback skips
/// without driving the actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Note {
    /// Tone frequency in Hz, already clamped at parse time.
    pub frequency_hz: u16,
    /// Hold time in milliseconds, already clamped at parse time.
    pub duration_ms: u16,
}

impl Note {
    /// Create a note from raw parts.
    pub const fn new(frequency_hz: u16, duration_ms: u16) -> Self {
        Note {
            frequency_hz,
            duration_ms,
        }
    }

    /// Whether playback should skip this slot without any actuator activity.
    pub fn is_silent(&self) -> bool {
        self.frequency_hz == 0 || self.duration_ms == 0
    }
}

/// Fixed-capacity melody storage: up to [`MAX_MELODY_STEPS`] notes plus a
/// count of valid entries. Slots at or beyond the count are always zeroed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MelodySequence {
    notes: [Note; MAX_MELODY_STEPS],
    len: usize,
}

impl MelodySequence {
    /// Create an empty sequence.
    pub const fn new() -> Self {
        MelodySequence {
            notes: [Note::new(0, 0); MAX_MELODY_STEPS],
            len: 0,
        }
    }

    /// Number of valid notes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the sequence holds no notes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slot capacity.
    pub fn capacity(&self) -> usize {
        MAX_MELODY_STEPS
    }

    /// The note at `index`, if it lies within the valid range.
    pub fn get(&self, index: usize) -> Option<Note> {
        if index < self.len {
            Some(self.notes[index])
        } else {
            None
        }
    }

    /// Iterate over the valid notes in order.
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes[..self.len].iter()
    }

    /// The valid notes as a slice.
    pub fn as_slice(&self) -> &[Note] {
        &self.notes[..self.len]
    }

    /// Remove all notes and zero every slot.
    pub fn clear(&mut self) {
        self.notes = [Note::new(0, 0); MAX_MELODY_STEPS];
        self.len = 0;
    }

    /// Append a note. Returns `false` when the sequence is full; the note is
    /// silently dropped in that case.
    pub(crate) fn push(&mut self, note: Note) -> bool {
        if self.len >= MAX_MELODY_STEPS {
            return false;
        }
        self.notes[self.len] = note;
        self.len += 1;
        true
    }
}

impl Default for MelodySequence {
    fn default() -> Self {
        Self::new()
    }
}
