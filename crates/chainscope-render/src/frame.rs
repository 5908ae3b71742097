#![forbid(unsafe_code)]

//! Frame: a draw target plus a mouse hit grid.
//!
//! Widgets render into the frame's [`Buffer`] and register the rectangles
//! they want to react to. The hit grid is per-cell and last-write-wins, so
//! draw order defines hit priority: a marker registered after its row claims
//! the overlapping cells.

use chainscope_core::geometry::Rect;

use crate::buffer::Buffer;

/// Identifies the widget that registered a hit region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a hit id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// What part of a widget a hit cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// General content: a node row, a feed card, a map hotspot.
    #[default]
    Content,
    /// An inner marker glyph that claims clicks before the surrounding
    /// content (selection-for-detail vs expand/collapse).
    Marker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct HitCell {
    id: Option<HitId>,
    region: HitRegion,
    data: u64,
}

/// Per-cell hit map matching the buffer dimensions.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    /// Create an empty grid.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![HitCell::default(); width as usize * height as usize],
        }
    }

    /// Register a rectangle, overwriting anything registered there before.
    pub fn register(&mut self, rect: Rect, id: HitId, region: HitRegion, data: u64) {
        let bounds = Rect::from_size(self.width, self.height);
        let Some(rect) = rect.intersection(&bounds) else {
            return;
        };
        let cell = HitCell {
            id: Some(id),
            region,
            data,
        };
        for y in rect.y..rect.bottom() {
            let row = y as usize * self.width as usize;
            let start = row + rect.x as usize;
            let end = row + rect.right() as usize;
            self.cells[start..end].fill(cell);
        }
    }

    /// Look up the registration at (x, y).
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, u64)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let cell = &self.cells[y as usize * self.width as usize + x as usize];
        cell.id.map(|id| (id, cell.region, cell.data))
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// One frame of output: the buffer widgets draw into plus the hit grid they
/// register interactive regions in.
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: Buffer,
    hits: HitGrid,
}

impl Frame {
    /// Create a frame of the given size.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hits: HitGrid::new(width, height),
        }
    }

    /// The full frame area.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.buffer.area()
    }

    /// Register an interactive rectangle.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: u64) {
        self.hits.register(rect, id, region, data);
    }

    /// Hit test against everything registered so far this frame.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, u64)> {
        self.hits.hit_test(x, y)
    }

    /// The hit grid, for callers that cache it across frames.
    #[must_use]
    pub fn hits(&self) -> &HitGrid {
        &self.hits
    }
}
