#![forbid(unsafe_code)]

//! Pointer-anchored tooltip overlay.
//!
//! Rendered last so it paints over whatever is beneath it. The box trails
//! the pointer and flips to the other side when it would leave the frame.

use chainscope_core::geometry::Rect;
use chainscope_render::{Cell, Frame, Rgb, Style};
use unicode_width::UnicodeWidthStr;

use crate::block::Block;
use crate::{Widget, truncate_to_width};

const BG: Rgb = Rgb::new(31, 41, 55);
const TITLE: Rgb = Rgb::new(243, 244, 246);
const SUBTITLE: Rgb = Rgb::new(156, 163, 175);

/// Widest a tooltip's content may grow, in columns.
const MAX_CONTENT_WIDTH: usize = 36;

/// A small floating box with a title, an optional subtitle, and styled
/// content lines.
#[derive(Debug, Clone)]
pub struct Tooltip {
    title: String,
    subtitle: Option<String>,
    lines: Vec<(String, Style)>,
}

impl Tooltip {
    /// Create a tooltip with a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            lines: Vec::new(),
        }
    }

    /// Add a subtitle under the title.
    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Append a content line.
    #[must_use]
    pub fn line(mut self, text: impl Into<String>, style: Style) -> Self {
        self.lines.push((text.into(), style));
        self
    }

    fn content_width(&self) -> usize {
        let mut width = self.title.width();
        if let Some(subtitle) = &self.subtitle {
            width = width.max(subtitle.width());
        }
        for (line, _) in &self.lines {
            width = width.max(line.width());
        }
        width.clamp(8, MAX_CONTENT_WIDTH)
    }

    /// The box rectangle for a pointer position, clamped into `bounds`.
    #[must_use]
    pub fn placement(&self, pointer: (u16, u16), bounds: Rect) -> Rect {
        let width = (self.content_width() + 4) as u16;
        let mut height = 3 + self.lines.len() as u16;
        if self.subtitle.is_some() {
            height += 1;
        }
        let width = width.min(bounds.width);
        let height = height.min(bounds.height);

        // Trail the pointer; flip sides when the box would spill out.
        let mut x = pointer.0.saturating_add(2);
        if x + width > bounds.right() {
            x = pointer.0.saturating_sub(width + 1).max(bounds.x);
        }
        let mut y = pointer.1.saturating_add(1);
        if y + height > bounds.bottom() {
            y = pointer.1.saturating_sub(height).max(bounds.y);
        }
        Rect::new(x, y, width, height)
    }

    /// Draw the tooltip anchored at the pointer.
    pub fn render_at(&self, pointer: (u16, u16), frame: &mut Frame) {
        let bounds = frame.area();
        let rect = self.placement(pointer, bounds);
        if rect.width < 4 || rect.height < 3 {
            return;
        }

        frame.buffer.fill(rect, Cell::styled(' ', Style::new().bg(BG)));
        Block::new()
            .border_style(Style::new().fg(SUBTITLE).bg(BG))
            .render(rect, frame);

        let inner = Block::inner(rect);
        let text_width = inner.width.saturating_sub(1) as usize;
        let mut y = inner.y;
        let title = truncate_to_width(&self.title, text_width);
        frame.buffer.set_string(
            inner.x + 1,
            y,
            &title,
            Style::new().fg(TITLE).bg(BG).bold(),
            inner.right(),
        );
        y += 1;
        if let Some(subtitle) = &self.subtitle {
            if y >= inner.bottom() {
                return;
            }
            let subtitle = truncate_to_width(subtitle, text_width);
            frame.buffer.set_string(
                inner.x + 1,
                y,
                &subtitle,
                Style::new().fg(SUBTITLE).bg(BG),
                inner.right(),
            );
            y += 1;
        }
        for (line, style) in &self.lines {
            if y >= inner.bottom() {
                break;
            }
            let mut style = *style;
            style.bg = Some(BG);
            let line = truncate_to_width(line, text_width);
            frame
                .buffer
                .set_string(inner.x + 1, y, &line, style, inner.right());
            y += 1;
        }
    }
}
