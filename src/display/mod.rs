//! Time Display
//!
//! Thin "render string if changed" wrapper around the device's text
//! surface. The clock face is redrawn at most once per second and only when
//! the rendered text actually changed, keeping the main loop free of
//! pointless blocking draw calls.

use std::fmt::Write as _;

/// Separator between the time fields.
const TIME_SEPARATOR: char = ':';

/// Minimum interval between display refresh checks.
const REFRESH_INTERVAL_MS: u64 = 1000;

/// A text surface the display can draw onto.
pub trait TextSurface {
    /// Draw `text` centered on the surface, replacing what was there.
    fn draw_centered(&mut self, text: &str);
}

/// Wall-clock time of day, as provided by the host's time source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
}

/// Change-detecting clock renderer.
#[derive(Debug, Default)]
pub struct ClockDisplay {
    last_rendered: String,
    last_refresh_ms: u64,
}

impl ClockDisplay {
    /// Create a display that has not rendered anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the time if the refresh interval elapsed and the text changed.
    /// Returns `true` when the surface was actually redrawn.
    pub fn update(&mut self, now_ms: u64, time: TimeOfDay, surface: &mut dyn TextSurface) -> bool {
        if self.last_refresh_ms != 0 && now_ms.saturating_sub(self.last_refresh_ms) < REFRESH_INTERVAL_MS
        {
            return false;
        }
        self.last_refresh_ms = now_ms;

        let text = format_time(time);
        if text == self.last_rendered {
            return false;
        }

        surface.draw_centered(&text);
        self.last_rendered = text;
        true
    }
}

/// Format a time of day as `HH:MM:SS`.
pub fn format_time(time: TimeOfDay) -> String {
    let mut text = String::with_capacity(8);
    let _ = write!(
        text,
        "{:02}{sep}{:02}{sep}{:02}",
        time.hour,
        time.minute,
        time.second,
        sep = TIME_SEPARATOR
    );
    text
}
