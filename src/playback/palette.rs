//! Frequency Color Palette
//!
//! Maps a note's frequency onto one of five fixed colors so the pixel ring
//! tracks the melody visually. Thresholds roughly follow the octave around
//! middle C: low notes glow red, high notes magenta.

use crate::hal::Rgb;

/// Band colors, lowest frequency first.
pub const BAND_COLORS: [Rgb; 5] = [
    Rgb::new(255, 0, 0),   // red, up to 300 Hz
    Rgb::new(0, 255, 0),   // green, up to 370 Hz
    Rgb::new(0, 0, 255),   // blue, up to 470 Hz
    Rgb::new(255, 255, 0), // yellow, up to 600 Hz
    Rgb::new(255, 0, 255), // magenta, above 600 Hz
];

/// Upper inclusive frequency bound of each band except the last.
const BAND_THRESHOLDS_HZ: [u16; 4] = [300, 370, 470, 600];

/// Color for a tone frequency.
pub fn color_for_frequency(frequency_hz: u16) -> Rgb {
    for (band, &threshold) in BAND_THRESHOLDS_HZ.iter().enumerate() {
        if frequency_hz <= threshold {
            return BAND_COLORS[band];
        }
    }
    BAND_COLORS[4]
}
