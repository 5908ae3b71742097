#![forbid(unsafe_code)]

//! Bordered, optionally titled panel.

use chainscope_core::geometry::{Rect, Sides};
use chainscope_render::{Cell, Frame, Style};

use crate::Widget;

/// A single-line box border with an optional title in the top edge.
#[derive(Debug, Clone, Default)]
pub struct Block {
    title: Option<String>,
    border_style: Style,
    title_style: Style,
}

impl Block {
    /// Create an untitled block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the border style.
    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Set the title style.
    #[must_use]
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    /// The drawable area inside the border.
    #[must_use]
    pub fn inner(area: Rect) -> Rect {
        area.inner(Sides::all(1))
    }
}

impl Widget for Block {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;
        let style = self.border_style;

        for x in area.x + 1..right {
            frame.buffer.set(x, area.y, Cell::styled('─', style));
            frame.buffer.set(x, bottom, Cell::styled('─', style));
        }
        for y in area.y + 1..bottom {
            frame.buffer.set(area.x, y, Cell::styled('│', style));
            frame.buffer.set(right, y, Cell::styled('│', style));
        }
        frame.buffer.set(area.x, area.y, Cell::styled('┌', style));
        frame.buffer.set(right, area.y, Cell::styled('┐', style));
        frame.buffer.set(area.x, bottom, Cell::styled('└', style));
        frame.buffer.set(right, bottom, Cell::styled('┘', style));

        if let Some(title) = &self.title
            && area.width > 4
        {
            let text = format!(" {title} ");
            frame
                .buffer
                .set_string(area.x + 1, area.y, &text, self.title_style, right);
        }
    }
}
