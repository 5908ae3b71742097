#![forbid(unsafe_code)]

//! View-mode adaptation: label and color extraction.
//!
//! The component and manufacturer views consume the same hierarchy,
//! aggregation output, and layout; only what this module extracts from a
//! placed node differs.

use chainscope_layout::PlacedNode;
use chainscope_model::Severity;
use chainscope_render::Rgb;

/// Which identity a tree view presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Label nodes by component/material name.
    #[default]
    Component,
    /// Label nodes by producing facility.
    Manufacturer,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Component => Self::Manufacturer,
            Self::Manufacturer => Self::Component,
        }
    }

    /// Display label for the mode switch control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Component => "Component",
            Self::Manufacturer => "Manufacturer",
        }
    }
}

/// Marker/link color for no risk.
pub const NEUTRAL: Rgb = Rgb::new(107, 114, 128);
/// Low severity hue.
pub const LOW: Rgb = Rgb::new(16, 185, 129);
/// Medium severity hue.
pub const MEDIUM: Rgb = Rgb::new(245, 158, 11);
/// High severity hue.
pub const HIGH: Rgb = Rgb::new(239, 68, 68);

/// Marker radius floor, in painter dots.
pub const NODE_BASE_RADIUS: i32 = 2;
/// Radius growth per severity rank.
pub const NODE_RADIUS_STEP: i32 = 1;

/// Severity → marker/link hue.
#[must_use]
pub const fn severity_color(severity: Severity) -> Rgb {
    match severity {
        Severity::None => NEUTRAL,
        Severity::Low => LOW,
        Severity::Medium => MEDIUM,
        Severity::High => HIGH,
    }
}

/// Severity → node marker radius in dots. Larger markers flag riskier
/// subtrees.
#[must_use]
pub const fn node_radius(severity: Severity) -> i32 {
    NODE_BASE_RADIUS + severity.rank() as i32 * NODE_RADIUS_STEP
}

/// Severity → link stroke width in parallel strands.
#[must_use]
pub const fn link_width(severity: Severity) -> i32 {
    1 + severity.rank() as i32
}

/// First facility segment of a manufacturer key, `"Unknown"` when the node
/// has no facility bound.
#[must_use]
pub fn manufacturer_label(key: &str) -> &str {
    match key.split('_').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => "Unknown",
    }
}

/// The label a view mode extracts from a placed node.
#[must_use]
pub fn node_label(node: &PlacedNode, mode: ViewMode) -> String {
    match mode {
        ViewMode::Component => node.name.clone(),
        ViewMode::Manufacturer => manufacturer_label(&node.manufacturer_key).to_string(),
    }
}

const COMPONENT_PALETTE: [Rgb; 4] = [
    Rgb::new(30, 136, 229),
    Rgb::new(38, 166, 154),
    Rgb::new(92, 107, 192),
    Rgb::new(144, 202, 249),
];

const MANUFACTURER_PALETTE: [Rgb; 4] = [
    Rgb::new(30, 136, 229),
    Rgb::new(255, 179, 0),
    Rgb::new(255, 111, 0),
    Rgb::new(179, 229, 252),
];

/// Depth-keyed node color for views without a risk overlay.
#[must_use]
pub const fn depth_color(mode: ViewMode, depth: usize) -> Rgb {
    let palette = match mode {
        ViewMode::Component => COMPONENT_PALETTE,
        ViewMode::Manufacturer => MANUFACTURER_PALETTE,
    };
    let idx = if depth < palette.len() {
        depth
    } else {
        palette.len() - 1
    };
    palette[idx]
}
