#![forbid(unsafe_code)]

//! Layout algorithms for ChainScope: tidy-tree placement of the visible
//! hierarchy, smooth link curves, and the Mercator projection with its
//! embedded world outline.

pub mod curve;
pub mod geo;
pub mod tidy;
pub mod world;

pub use curve::link_curve;
pub use geo::MapProjection;
pub use tidy::{Link, PlacedNode, TreeLayout};
