#![forbid(unsafe_code)]

//! Shared colors and chrome styles for the explorer.

use chainscope_render::{Rgb, Style};

/// Foreground tones.
pub mod fg {
    use super::Rgb;

    pub const TEXT: Rgb = Rgb::new(229, 231, 235);
    pub const MUTED: Rgb = Rgb::new(156, 163, 175);
}

/// Accent hues.
pub mod accent {
    use super::Rgb;

    pub const PRIMARY: Rgb = Rgb::new(129, 140, 248);
    pub const SUCCESS: Rgb = Rgb::new(16, 185, 129);
    pub const WARNING: Rgb = Rgb::new(245, 158, 11);
    pub const ERROR: Rgb = Rgb::new(239, 68, 68);
}

/// Style for panel borders.
#[must_use]
pub fn border() -> Style {
    Style::new().fg(Rgb::new(75, 85, 99))
}

/// Style for panel titles.
#[must_use]
pub fn panel_title() -> Style {
    Style::new().fg(accent::PRIMARY).bold()
}

/// Style for the active tab.
#[must_use]
pub fn tab_active() -> Style {
    Style::new().fg(accent::PRIMARY).bold()
}

/// Style for inactive tabs.
#[must_use]
pub fn tab_inactive() -> Style {
    Style::new().fg(fg::MUTED)
}

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Spinner glyph for a tick count.
#[must_use]
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}
