#![forbid(unsafe_code)]

//! Row-diffing ANSI presenter.
//!
//! Compares the frame against the previously presented buffer and re-emits
//! only the rows that changed, tracking the current SGR state so color and
//! attribute sequences are written only on transitions. All output is
//! buffered and flushed once per frame.

use std::io::{self, BufWriter, Write};

use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue};

use crate::buffer::Buffer;
use crate::cell::{Cell, Rgb, StyleFlags, WIDE_CONTINUATION};

const WRITE_BUFFER_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SgrState {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    flags: StyleFlags,
}

impl SgrState {
    fn of(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            flags: cell.flags,
        }
    }
}

/// Emits buffer changes to a terminal writer.
pub struct Presenter<W: Write> {
    out: BufWriter<W>,
    /// Last presented frame; `None` forces a full repaint.
    previous: Option<Buffer>,
}

impl<W: Write> Presenter<W> {
    /// Create a presenter over a writer (normally stdout).
    pub fn new(writer: W) -> Self {
        Self {
            out: BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, writer),
            previous: None,
        }
    }

    /// Forget the previous frame so the next present repaints everything,
    /// e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Present a frame, emitting only rows that differ from the last one.
    pub fn present(&mut self, next: &Buffer) -> io::Result<()> {
        let full = match &self.previous {
            Some(prev) => prev.width() != next.width() || prev.height() != next.height(),
            None => true,
        };

        let mut state: Option<SgrState> = None;
        let mut wrote = false;
        for y in 0..next.height() {
            let dirty = full
                || !self
                    .previous
                    .as_ref()
                    .map(|prev| prev.row_eq(next, y))
                    .unwrap_or(false);
            if !dirty {
                continue;
            }
            wrote = true;
            queue!(self.out, cursor::MoveTo(0, y))?;
            for cell in next.row(y) {
                if cell.ch == WIDE_CONTINUATION {
                    continue;
                }
                let wanted = SgrState::of(cell);
                if state != Some(wanted) {
                    self.apply_sgr(&wanted)?;
                    state = Some(wanted);
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }

        if wrote {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
            self.out.flush()?;
        }
        self.previous = Some(next.clone());
        Ok(())
    }

    fn apply_sgr(&mut self, state: &SgrState) -> io::Result<()> {
        // Reset first: clearing a single attribute selectively is not
        // portable across terminals.
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        if let Some(fg) = state.fg {
            queue!(
                self.out,
                SetForegroundColor(Color::Rgb {
                    r: fg.r,
                    g: fg.g,
                    b: fg.b
                })
            )?;
        }
        if let Some(bg) = state.bg {
            queue!(
                self.out,
                SetBackgroundColor(Color::Rgb {
                    r: bg.r,
                    g: bg.g,
                    b: bg.b
                })
            )?;
        }
        if state.flags.contains(StyleFlags::BOLD) {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if state.flags.contains(StyleFlags::DIM) {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Style;

    fn presented_bytes(frames: &[&Buffer]) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut presenter = Presenter::new(Vec::new());
        for frame in frames {
            let before = presenter.out.get_ref().len();
            presenter.present(frame).unwrap();
            presenter.out.flush().unwrap();
            sizes.push(presenter.out.get_ref().len() - before);
        }
        sizes
    }

    #[test]
    fn first_present_paints_everything() {
        let mut buf = Buffer::new(8, 2);
        buf.set_string(0, 0, "hello", Style::new(), 8);
        let sizes = presented_bytes(&[&buf]);
        assert!(sizes[0] > 0);
    }

    #[test]
    fn unchanged_frame_emits_nothing() {
        let mut buf = Buffer::new(8, 2);
        buf.set_string(0, 0, "hello", Style::new(), 8);
        let sizes = presented_bytes(&[&buf, &buf]);
        assert_eq!(sizes[1], 0);
    }

    #[test]
    fn changed_row_repaints() {
        let mut first = Buffer::new(8, 2);
        first.set_string(0, 0, "aaaa", Style::new(), 8);
        let mut second = first.clone();
        second.set_string(0, 1, "bbbb", Style::new(), 8);
        let sizes = presented_bytes(&[&first, &second]);
        assert!(sizes[1] > 0);
        assert!(sizes[1] < sizes[0]);
    }

    #[test]
    fn resize_forces_full_repaint() {
        let small = Buffer::new(4, 1);
        let large = Buffer::new(8, 2);
        let sizes = presented_bytes(&[&small, &large]);
        assert!(sizes[1] > 0);
    }

    #[test]
    fn invalidate_forces_repaint() {
        let buf = Buffer::new(4, 1);
        let mut presenter = Presenter::new(Vec::new());
        presenter.present(&buf).unwrap();
        presenter.invalidate();
        let before = presenter.out.get_ref().len();
        presenter.present(&buf).unwrap();
        presenter.out.flush().unwrap();
        assert!(presenter.out.get_ref().len() > before);
    }
}
