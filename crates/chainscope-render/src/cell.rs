#![forbid(unsafe_code)]

//! Cell, color, and style types.

use bitflags::bitflags;

/// An opaque 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale all channels toward black by `percent` (0 = black, 100 = self).
    #[must_use]
    pub const fn dim(self, percent: u8) -> Self {
        let p = percent as u16;
        Self {
            r: ((self.r as u16 * p) / 100) as u8,
            g: ((self.g as u16 * p) / 100) as u8,
            b: ((self.b as u16 * p) / 100) as u8,
        }
    }
}

bitflags! {
    /// Text attributes a cell can carry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u8 {
        const BOLD = 0b0001;
        const DIM  = 0b0010;
    }
}

impl Default for StyleFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Foreground/background/attribute triple applied when drawing.
///
/// `None` channels leave whatever is already in the buffer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub flags: StyleFlags,
}

impl Style {
    /// An empty style that changes nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            flags: StyleFlags::empty(),
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add the bold attribute.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.flags = self.flags.union(StyleFlags::BOLD);
        self
    }

    /// Add the dim attribute.
    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.flags = self.flags.union(StyleFlags::DIM);
        self
    }
}

/// Marker stored in the cell following a double-width character.
///
/// The presenter skips these cells because the terminal cursor has already
/// advanced past them.
pub const WIDE_CONTINUATION: char = '\u{0}';

/// One terminal cell: a character plus resolved colors and attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub flags: StyleFlags,
}

impl Cell {
    /// A blank cell with default colors.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            flags: StyleFlags::empty(),
        }
    }

    /// A cell holding `ch` with default colors.
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        Self {
            ch,
            fg: None,
            bg: None,
            flags: StyleFlags::empty(),
        }
    }

    /// A cell holding `ch` with the given style applied.
    #[must_use]
    pub const fn styled(ch: char, style: Style) -> Self {
        Self {
            ch,
            fg: style.fg,
            bg: style.bg,
            flags: style.flags,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_builder_composes() {
        let style = Style::new().fg(Rgb::new(1, 2, 3)).bold();
        assert_eq!(style.fg, Some(Rgb::new(1, 2, 3)));
        assert_eq!(style.bg, None);
        assert!(style.flags.contains(StyleFlags::BOLD));
    }

    #[test]
    fn styled_cell_carries_colors() {
        let style = Style::new().fg(Rgb::new(10, 20, 30)).bg(Rgb::new(0, 0, 0));
        let cell = Cell::styled('x', style);
        assert_eq!(cell.ch, 'x');
        assert_eq!(cell.fg, Some(Rgb::new(10, 20, 30)));
        assert_eq!(cell.bg, Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn dim_scales_channels() {
        let half = Rgb::new(200, 100, 50).dim(50);
        assert_eq!(half, Rgb::new(100, 50, 25));
        assert_eq!(Rgb::new(10, 10, 10).dim(0), Rgb::new(0, 0, 0));
        assert_eq!(Rgb::new(10, 10, 10).dim(100), Rgb::new(10, 10, 10));
    }

    #[test]
    fn default_cell_is_blank() {
        assert_eq!(Cell::default(), Cell::blank());
    }
}
