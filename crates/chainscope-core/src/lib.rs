#![forbid(unsafe_code)]

//! Foundation crate for ChainScope: terminal session management, geometry
//! primitives, and the canonical input event types shared by every layer
//! above.

pub mod event;
pub mod geometry;
pub mod terminal;
