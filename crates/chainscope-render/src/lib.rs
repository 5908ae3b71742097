#![forbid(unsafe_code)]

//! Rendering substrate for ChainScope: a cell-grid buffer, a frame that
//! couples the buffer with a mouse hit grid, a sub-cell braille painter,
//! and a row-diffing ANSI presenter.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod painter;
pub mod presenter;

pub use buffer::Buffer;
pub use cell::{Cell, Rgb, Style, StyleFlags};
pub use frame::{Frame, HitGrid, HitId, HitRegion};
pub use painter::Painter;
pub use presenter::Presenter;
