//! Hardware Capability Interfaces
//!
//! The engine never touches a board support package directly. Sound and
//! light outputs are modeled as the [`Actuators`] trait, wall time as the
//! [`Clock`] trait, so the whole engine runs unmodified against real
//! drivers, a host simulator or test spies.

use std::time::Instant;

/// An RGB color driven onto the device's pixel ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
}

impl Rgb {
    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// Sound and light outputs of the alarm device.
///
/// All calls are synchronous fire-and-forget triggers; implementations must
/// not block. The engine assumes it is the sole controller of both devices
/// while a melody is playing.
pub trait Actuators {
    /// Start a continuous tone at the given frequency.
    fn set_tone(&mut self, frequency_hz: u16);
    /// Silence the tone output.
    fn stop_tone(&mut self);
    /// Fill the pixel ring with one color.
    fn set_color(&mut self, color: Rgb);
    /// Turn the pixel ring off.
    fn clear_color(&mut self);
}

/// Monotonic millisecond clock.
///
/// Playback timing compares successive readings of this clock; tests inject
/// a manually stepped implementation instead of sleeping.
pub trait Clock {
    /// Milliseconds elapsed since some fixed, monotonic origin.
    fn now_ms(&self) -> u64;
}

/// [`Clock`] backed by [`std::time::Instant`], counting from construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose epoch is "now".
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now_ms();
        let second = clock.now_ms();
        assert!(second >= first);
    }

    #[test]
    fn test_rgb_construction() {
        let color = Rgb::new(255, 0, 255);
        assert_eq!(color, Rgb { r: 255, g: 0, b: 255 });
    }
}
