#![forbid(unsafe_code)]

//! Widgets for the ChainScope explorer: the risk tree, the hotspot map,
//! the alert feed, tooltips, and the regulations table.

pub mod adapter;
pub mod alert_feed;
pub mod block;
pub mod map_view;
pub mod regulations;
pub mod tooltip;
pub mod tree_view;

use chainscope_core::geometry::Rect;
use chainscope_render::{Frame, Style};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Anything that can draw itself into a frame area.
pub trait Widget {
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Draw a text span, returning the column after the last cell written.
pub fn draw_text_span(
    frame: &mut Frame,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    frame.buffer.set_string(x, y, text, style, max_x)
}

/// Truncate to at most `max_width` columns, appending `…` when trimmed.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push('…');
    out
}
