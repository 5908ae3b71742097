#![forbid(unsafe_code)]

//! Row-major cell buffer.

use chainscope_core::geometry::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::cell::{Cell, Style, WIDE_CONTINUATION};

/// A width × height grid of [`Cell`]s that widgets draw into.
///
/// Out-of-bounds writes are ignored, never panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a blank buffer.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::blank(); width as usize * height as usize],
        }
    }

    /// Buffer width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer area as a rectangle at the origin.
    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Read the cell at (x, y).
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write the cell at (x, y); out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill a rectangle (clipped to the buffer) with a cell.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let Some(rect) = rect.intersection(&self.area()) else {
            return;
        };
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::blank());
    }

    /// One row of cells.
    #[must_use]
    pub fn row(&self, y: u16) -> &[Cell] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Draw a string at (x, y), clipped at `max_x` (exclusive).
    ///
    /// Returns the column after the last cell written. Double-width
    /// graphemes occupy two cells, the second holding a continuation
    /// marker; a wide grapheme that would straddle `max_x` is dropped.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let mut cx = x;
        let max_x = max_x.min(self.width);
        for grapheme in text.graphemes(true) {
            let w = grapheme.width() as u16;
            if w == 0 {
                continue;
            }
            if cx >= max_x || cx + w > max_x {
                break;
            }
            let ch = grapheme.chars().next().unwrap_or(' ');
            self.set(cx, y, Cell::styled(ch, style));
            if w > 1 {
                self.set(cx + 1, y, Cell::styled(WIDE_CONTINUATION, style));
            }
            cx += w;
        }
        cx
    }

    /// Cell-by-cell equality, used by the presenter's row diff.
    #[must_use]
    pub fn row_eq(&self, other: &Buffer, y: u16) -> bool {
        self.width == other.width
            && y < self.height
            && y < other.height
            && self.row(y) == other.row(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Rgb;

    #[test]
    fn new_buffer_is_blank() {
        let buf = Buffer::new(4, 2);
        assert_eq!(buf.get(0, 0), Some(&Cell::blank()));
        assert_eq!(buf.get(3, 1), Some(&Cell::blank()));
        assert_eq!(buf.get(4, 0), None);
    }

    #[test]
    fn set_and_get() {
        let mut buf = Buffer::new(4, 2);
        buf.set(2, 1, Cell::from_char('x'));
        assert_eq!(buf.get(2, 1).map(|c| c.ch), Some('x'));
    }

    #[test]
    fn out_of_bounds_write_ignored() {
        let mut buf = Buffer::new(4, 2);
        buf.set(10, 10, Cell::from_char('x'));
        assert_eq!(buf.get(10, 10), None);
    }

    #[test]
    fn fill_clips_to_buffer() {
        let mut buf = Buffer::new(4, 4);
        buf.fill(Rect::new(2, 2, 10, 10), Cell::from_char('#'));
        assert_eq!(buf.get(3, 3).map(|c| c.ch), Some('#'));
        assert_eq!(buf.get(1, 1).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn set_string_returns_next_column() {
        let mut buf = Buffer::new(10, 1);
        let next = buf.set_string(1, 0, "abc", Style::new(), 10);
        assert_eq!(next, 4);
        assert_eq!(buf.get(1, 0).map(|c| c.ch), Some('a'));
        assert_eq!(buf.get(3, 0).map(|c| c.ch), Some('c'));
    }

    #[test]
    fn set_string_clips_at_max() {
        let mut buf = Buffer::new(10, 1);
        buf.set_string(0, 0, "abcdef", Style::new(), 3);
        assert_eq!(buf.get(2, 0).map(|c| c.ch), Some('c'));
        assert_eq!(buf.get(3, 0).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn set_string_wide_grapheme_takes_two_cells() {
        let mut buf = Buffer::new(10, 1);
        let next = buf.set_string(0, 0, "日a", Style::new(), 10);
        assert_eq!(next, 3);
        assert_eq!(buf.get(0, 0).map(|c| c.ch), Some('日'));
        assert_eq!(buf.get(1, 0).map(|c| c.ch), Some(WIDE_CONTINUATION));
        assert_eq!(buf.get(2, 0).map(|c| c.ch), Some('a'));
    }

    #[test]
    fn set_string_applies_style() {
        let mut buf = Buffer::new(10, 1);
        let style = Style::new().fg(Rgb::new(9, 9, 9));
        buf.set_string(0, 0, "z", style, 10);
        assert_eq!(buf.get(0, 0).and_then(|c| c.fg), Some(Rgb::new(9, 9, 9)));
    }

    #[test]
    fn row_eq_detects_change() {
        let mut a = Buffer::new(4, 2);
        let b = Buffer::new(4, 2);
        assert!(a.row_eq(&b, 0));
        a.set(0, 0, Cell::from_char('x'));
        assert!(!a.row_eq(&b, 0));
        assert!(a.row_eq(&b, 1));
    }
}
