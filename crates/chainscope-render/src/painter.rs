#![forbid(unsafe_code)]

//! Sub-cell braille painter.
//!
//! Each terminal cell maps to a 2×4 grid of dots drawn with Unicode braille
//! patterns (U+2800..U+28FF), giving curves and circles enough resolution to
//! read as smooth shapes at terminal sizes.

use chainscope_core::geometry::Rect;

use crate::cell::{Cell, Rgb, Style};
use crate::frame::Frame;

/// Dot columns per terminal cell.
pub const DOTS_X: u16 = 2;
/// Dot rows per terminal cell.
pub const DOTS_Y: u16 = 4;

/// Accumulates dot-level drawing operations for one widget area.
#[derive(Debug, Clone)]
pub struct Painter {
    /// Width in dots.
    width: u16,
    /// Height in dots.
    height: u16,
    pixels: Vec<bool>,
    colors: Vec<Option<Rgb>>,
}

impl Painter {
    /// Create a painter with explicit dot dimensions.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![false; len],
            colors: vec![None; len],
        }
    }

    /// Create a painter sized to cover a terminal area.
    #[must_use]
    pub fn for_area(area: Rect) -> Self {
        Self::new(area.width * DOTS_X, area.height * DOTS_Y)
    }

    /// Dot dimensions.
    #[must_use]
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Check if a dot is set.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|i| self.pixels[i]).unwrap_or(false)
    }

    /// Set a single dot; out-of-range coordinates are clipped.
    pub fn point(&mut self, x: i32, y: i32, color: Option<Rgb>) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = true;
            if color.is_some() {
                self.colors[i] = color;
            }
        }
    }

    /// Draw a line with Bresenham's algorithm.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Option<Rgb>) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: i32 = if x0 < x1 { 1 } else { -1 };
        let sy: i32 = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut cx = x0;
        let mut cy = y0;

        loop {
            self.point(cx, cy, color);
            if cx == x1 && cy == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                if cx == x1 {
                    break;
                }
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                if cy == y1 {
                    break;
                }
                err += dx;
                cy += sy;
            }
        }
    }

    /// Draw connected segments through the given dot coordinates.
    pub fn polyline(&mut self, points: &[(f64, f64)], color: Option<Rgb>) {
        for pair in points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            self.line(
                x0.round() as i32,
                y0.round() as i32,
                x1.round() as i32,
                y1.round() as i32,
                color,
            );
        }
    }

    /// Draw a circle outline with the midpoint algorithm.
    pub fn circle(&mut self, cx: i32, cy: i32, radius: i32, color: Option<Rgb>) {
        if radius <= 0 {
            self.point(cx, cy, color);
            return;
        }
        let mut x = radius;
        let mut y = 0;
        let mut d = 1 - radius;
        while x >= y {
            for &(px, py) in &[
                (cx + x, cy + y),
                (cx - x, cy + y),
                (cx + x, cy - y),
                (cx - x, cy - y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx + y, cy - x),
                (cx - y, cy - x),
            ] {
                self.point(px, py, color);
            }
            y += 1;
            if d < 0 {
                d += 2 * y + 1;
            } else {
                x -= 1;
                d += 2 * (y - x) + 1;
            }
        }
    }

    /// Draw a filled circle as horizontal dot spans.
    pub fn circle_filled(&mut self, cx: i32, cy: i32, radius: i32, color: Option<Rgb>) {
        if radius <= 0 {
            self.point(cx, cy, color);
            return;
        }
        let r2 = radius * radius;
        for dy in -radius..=radius {
            let half = ((r2 - dy * dy) as f64).sqrt().round() as i32;
            self.line(cx - half, cy + dy, cx + half, cy + dy, color);
        }
    }

    /// Rasterize the accumulated dots into braille cells in `frame`.
    ///
    /// Cells whose 2×4 block contains no set dots are left untouched, so
    /// text drawn before the painter survives outside the shapes.
    pub fn render(&self, area: Rect, frame: &mut Frame, base: Style) {
        let cell_cols = area.width.min(self.width.div_ceil(DOTS_X));
        let cell_rows = area.height.min(self.height.div_ceil(DOTS_Y));

        for cy in 0..cell_rows {
            for cx in 0..cell_cols {
                let (ch, color) = self.braille_cell(cx as i32 * 2, cy as i32 * 4);
                if ch == ' ' {
                    continue;
                }
                let mut cell = Cell::styled(ch, base);
                if let Some(c) = color {
                    cell.fg = Some(c);
                }
                frame
                    .buffer
                    .set(area.x.saturating_add(cx), area.y.saturating_add(cy), cell);
            }
        }
    }

    /// Pack one 2×4 dot block into a braille character and the color of its
    /// first set dot.
    fn braille_cell(&self, px: i32, py: i32) -> (char, Option<Rgb>) {
        // Braille dot-to-bit mapping: column 0 rows 0..3 = bits 0,1,2,6;
        // column 1 rows 0..3 = bits 3,4,5,7.
        const DOT_BITS: [[u8; 4]; 2] = [[0, 1, 2, 6], [3, 4, 5, 7]];

        let mut bits: u8 = 0;
        let mut first_color = None;
        for col in 0..2 {
            for row in 0..4 {
                let x = px + col;
                let y = py + row;
                if self.get(x, y) {
                    bits |= 1 << DOT_BITS[col as usize][row as usize];
                    if first_color.is_none()
                        && let Some(i) = self.index(x, y)
                    {
                        first_color = self.colors[i];
                    }
                }
            }
        }

        if bits == 0 {
            (' ', None)
        } else {
            (char::from_u32(0x2800 + bits as u32).unwrap_or(' '), first_color)
        }
    }
}
