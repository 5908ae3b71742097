#![forbid(unsafe_code)]

//! The supply-chain tree view.
//!
//! Draws the placed visible tree and registers the hit regions that drive
//! hover and click handling. Link strokes widen and markers grow with the
//! aggregated severity of the subtree they lead into, so riskier branches
//! read as visually heavier.
//!
//! # Hit data convention
//!
//! Each node registers its full row (marker + label) as
//! [`HitRegion::Content`] with `data` = the node's index in
//! `layout.nodes`. Views that support selection-for-detail additionally
//! register the marker cells as [`HitRegion::Marker`] *after* the row, so
//! the marker claims clicks on the glyph itself and a click there never
//! reaches the collapse toggle.

use chainscope_core::geometry::{Rect, Sides};
use chainscope_layout::{TreeLayout, link_curve};
use chainscope_model::{NodeId, RiskOverlay, Severity};
use chainscope_render::{Frame, HitGrid, HitId, HitRegion, Painter, Rgb, Style};
use unicode_width::UnicodeWidthStr;

use crate::Widget;
use crate::adapter::{
    self, NEUTRAL, ViewMode, link_width, node_label, node_radius, severity_color,
};

/// Dots kept clear around the layout extent so the largest marker never
/// clips at the edge.
const MARKER_MARGIN: f64 = 6.0;

/// Marker radius used when no risk overlay is attached.
const PLAIN_RADIUS: i32 = 3;

/// Label color.
const LABEL: Rgb = Rgb::new(209, 213, 219);
/// Selection ring and label color.
const SELECTED: Rgb = Rgb::new(129, 140, 248);

/// What a pointer position resolves to inside the tree view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeHit {
    /// A node's row: toggles on click, focuses on hover.
    Row(usize),
    /// A node's marker glyph: selects for detail on click.
    Marker(usize),
}

/// Renders a [`TreeLayout`] with optional risk styling.
#[derive(Debug, Clone)]
pub struct TreeView<'a> {
    layout: &'a TreeLayout,
    overlay: Option<&'a RiskOverlay>,
    mode: ViewMode,
    hit_id: Option<HitId>,
    selected: Option<&'a NodeId>,
    register_markers: bool,
}

impl<'a> TreeView<'a> {
    /// Create a view over a computed layout.
    #[must_use]
    pub fn new(layout: &'a TreeLayout) -> Self {
        Self {
            layout,
            overlay: None,
            mode: ViewMode::Component,
            hit_id: None,
            selected: None,
            register_markers: false,
        }
    }

    /// Attach aggregation output: markers and links take severity colors
    /// and sizes.
    #[must_use]
    pub fn with_overlay(mut self, overlay: &'a RiskOverlay) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Set the label/color extraction mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    /// Register hit regions under this id.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    /// Highlight a selected node.
    #[must_use]
    pub fn with_selected(mut self, id: &'a NodeId) -> Self {
        self.selected = Some(id);
        self
    }

    /// Also register marker hit regions (selection-for-detail views).
    #[must_use]
    pub fn with_marker_hits(mut self, enabled: bool) -> Self {
        self.register_markers = enabled;
        self
    }

    /// The area the tree occupies once label gutters are reserved.
    #[must_use]
    pub fn tree_area(area: Rect) -> Rect {
        let gutter = (area.width / 5).clamp(6, 16);
        area.inner(Sides::new(0, gutter, 0, gutter))
    }

    /// The dot extent a layout for `area` should be computed against.
    #[must_use]
    pub fn layout_extent(area: Rect) -> (f64, f64) {
        let inner = Self::tree_area(area);
        (
            (inner.width as f64 * 2.0 - 2.0 * MARKER_MARGIN).max(1.0),
            (inner.height as f64 * 4.0 - 2.0 * MARKER_MARGIN).max(1.0),
        )
    }

    /// Resolve a pointer position against a cached hit grid.
    #[must_use]
    pub fn resolve(grid: &HitGrid, x: u16, y: u16, expected: HitId) -> Option<TreeHit> {
        match grid.hit_test(x, y) {
            Some((id, HitRegion::Marker, data)) if id == expected => {
                Some(TreeHit::Marker(data as usize))
            }
            Some((id, HitRegion::Content, data)) if id == expected => {
                Some(TreeHit::Row(data as usize))
            }
            _ => None,
        }
    }

    fn severity_of(&self, id: &NodeId) -> Severity {
        self.overlay.map(|o| o.severity(id)).unwrap_or_default()
    }

    fn marker_radius_of(&self, id: &NodeId) -> i32 {
        match self.overlay {
            Some(overlay) => node_radius(overlay.severity(id)),
            None => PLAIN_RADIUS,
        }
    }

    /// Cell position of a placed node inside the tree area.
    fn cell_pos(inner: Rect, x: f64, y: f64) -> (u16, u16) {
        let cx = inner.x as f64 + (x + MARKER_MARGIN) / 2.0;
        let cy = inner.y as f64 + (y + MARKER_MARGIN) / 4.0;
        (
            (cx.round() as u16).min(inner.right().saturating_sub(1)),
            (cy.round() as u16).min(inner.bottom().saturating_sub(1)),
        )
    }
}

impl Widget for TreeView<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let inner = Self::tree_area(area);
        if inner.is_empty() || self.layout.nodes.is_empty() {
            return;
        }

        let mut painter = Painter::for_area(inner);

        // Links first so markers draw over their endpoints.
        for link in &self.layout.links {
            let parent = &self.layout.nodes[link.parent];
            let child = &self.layout.nodes[link.child];
            let severity = self.severity_of(&child.id);
            let color = if self.overlay.is_some() {
                severity_color(severity).dim(70)
            } else {
                NEUTRAL.dim(70)
            };
            let strands = if self.overlay.is_some() {
                link_width(severity)
            } else {
                1
            };
            let points = link_curve(
                parent.x + MARKER_MARGIN,
                parent.y + MARKER_MARGIN,
                child.x + MARKER_MARGIN,
                child.y + MARKER_MARGIN,
            );
            for strand in 0..strands {
                let offset = strand as f64 - (strands - 1) as f64 / 2.0;
                let shifted: Vec<(f64, f64)> =
                    points.iter().map(|&(x, y)| (x, y + offset)).collect();
                painter.polyline(&shifted, Some(color));
            }
        }

        for node in &self.layout.nodes {
            let radius = self.marker_radius_of(&node.id);
            let x = (node.x + MARKER_MARGIN).round() as i32;
            let y = (node.y + MARKER_MARGIN).round() as i32;
            let color = match self.overlay {
                Some(overlay) => severity_color(overlay.severity(&node.id)),
                None => adapter::depth_color(self.mode, node.depth),
            };
            painter.circle_filled(x, y, radius, Some(color));
            if self.selected == Some(&node.id) {
                painter.circle(x, y, radius + 2, Some(SELECTED));
            }
        }

        painter.render(inner, frame, Style::new());

        // Labels and hit regions in cell space.
        for (index, node) in self.layout.nodes.iter().enumerate() {
            let (cx, cy) = Self::cell_pos(inner, node.x, node.y);
            let mut label = node_label(node, self.mode);
            if node.collapsed {
                label.push_str(&format!(" +{}", node.hidden_descendants));
            }
            let style = if self.selected == Some(&node.id) {
                Style::new().fg(SELECTED).bold()
            } else {
                Style::new().fg(LABEL)
            };

            let label_width = label.width() as u16;
            // Nodes with children anchor the label on the left of the
            // marker, leaves on the right.
            let (start, max_x) = if node.leaf {
                (cx.saturating_add(3), area.right())
            } else {
                let start = cx.saturating_sub(3).saturating_sub(label_width);
                (start.max(area.x), cx.saturating_sub(2))
            };
            let end = frame.buffer.set_string(start, cy, &label, style, max_x);

            if let Some(id) = self.hit_id {
                let marker_rect = Rect::new(cx.saturating_sub(1), cy, 3, 1);
                let row_left = start.min(marker_rect.x);
                let row_right = end.max(marker_rect.right());
                let row = Rect::new(row_left, cy, row_right.saturating_sub(row_left), 1);
                frame.register_hit(row, id, HitRegion::Content, index as u64);
                if self.register_markers {
                    frame.register_hit(marker_rect, id, HitRegion::Marker, index as u64);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainscope_model::{Alert, HierarchyNode, RawNode, RiskLevel, TreeSnapshot};

    fn raw(name: &str, manufacturer: &str, children: Vec<RawNode>) -> RawNode {
        RawNode {
            name: name.into(),
            manufacturer: manufacturer.into(),
            children,
        }
    }

    fn alert(manufacturer: &str, level: RiskLevel) -> Alert {
        Alert {
            id: "a".into(),
            category: "Test".into(),
            risk_level: level,
            location: "X".into(),
            details: String::new(),
            date: "2024-01-01".into(),
            manufacturer: Some(manufacturer.into()),
            latitude: None,
            longitude: None,
            scope: Default::default(),
        }
    }

    fn tree_and_layout(area: Rect) -> (HierarchyNode, TreeLayout) {
        let tree = HierarchyNode::initialize(raw(
            "Product",
            "",
            vec![
                raw("Resin", "Acme_Plant1", vec![raw("Monomer", "Chem_Site", vec![])]),
                raw("Additive", "Basel_Works", vec![]),
            ],
        ));
        let (w, h) = TreeView::layout_extent(area);
        let layout = TreeLayout::compute(&tree, w, h);
        (tree, layout)
    }

    #[test]
    fn renders_markers_and_labels() {
        let area = Rect::new(0, 0, 60, 20);
        let (_, layout) = tree_and_layout(area);
        let view = TreeView::new(&layout);
        let mut frame = Frame::new(60, 20);
        view.render(area, &mut frame);

        // Some braille marker cells must exist.
        let mut braille = 0;
        for y in 0..20 {
            for x in 0..60 {
                let ch = frame.buffer.get(x, y).unwrap().ch;
                if ('\u{2800}'..='\u{28FF}').contains(&ch) {
                    braille += 1;
                }
            }
        }
        assert!(braille > 0);

        // The root label is drawn somewhere.
        let mut text = String::new();
        for y in 0..20 {
            for x in 0..60 {
                text.push(frame.buffer.get(x, y).unwrap().ch);
            }
        }
        assert!(text.contains("Product"));
    }

    #[test]
    fn collapsed_node_shows_hidden_count() {
        let area = Rect::new(0, 0, 60, 20);
        let (_, layout) = tree_and_layout(area);
        let view = TreeView::new(&layout);
        let mut frame = Frame::new(60, 20);
        view.render(area, &mut frame);
        let mut text = String::new();
        for y in 0..20 {
            for x in 0..60 {
                text.push(frame.buffer.get(x, y).unwrap().ch);
            }
        }
        // "Resin" starts collapsed hiding one descendant.
        assert!(text.contains("Resin +1"));
    }

    #[test]
    fn rows_register_hits() {
        let area = Rect::new(0, 0, 60, 20);
        let (_, layout) = tree_and_layout(area);
        let view = TreeView::new(&layout).hit_id(HitId::new(1));
        let mut frame = Frame::new(60, 20);
        view.render(area, &mut frame);

        let mut found = vec![false; layout.nodes.len()];
        for y in 0..20 {
            for x in 0..60 {
                if let Some(TreeHit::Row(i)) = TreeView::resolve(frame.hits(), x, y, HitId::new(1))
                {
                    found[i] = true;
                }
            }
        }
        assert!(found.iter().all(|&f| f), "every node needs a hover target");
    }

    #[test]
    fn marker_claims_clicks_before_row() {
        let area = Rect::new(0, 0, 60, 20);
        let (_, layout) = tree_and_layout(area);
        let view = TreeView::new(&layout)
            .hit_id(HitId::new(1))
            .with_marker_hits(true);
        let mut frame = Frame::new(60, 20);
        view.render(area, &mut frame);

        let mut marker_hits = 0;
        let mut row_hits = 0;
        for y in 0..20 {
            for x in 0..60 {
                match TreeView::resolve(frame.hits(), x, y, HitId::new(1)) {
                    Some(TreeHit::Marker(_)) => marker_hits += 1,
                    Some(TreeHit::Row(_)) => row_hits += 1,
                    None => {}
                }
            }
        }
        assert!(marker_hits > 0);
        assert!(row_hits > 0);
    }

    #[test]
    fn resolve_ignores_foreign_ids() {
        let grid = {
            let area = Rect::new(0, 0, 60, 20);
            let (_, layout) = tree_and_layout(area);
            let view = TreeView::new(&layout).hit_id(HitId::new(1));
            let mut frame = Frame::new(60, 20);
            view.render(area, &mut frame);
            frame.hits().clone()
        };
        for y in 0..20 {
            for x in 0..60 {
                assert_eq!(TreeView::resolve(&grid, x, y, HitId::new(99)), None);
            }
        }
    }

    #[test]
    fn overlay_colors_high_risk_marker() {
        let area = Rect::new(0, 0, 60, 20);
        let (tree, layout) = tree_and_layout(area);
        let alerts = vec![alert("Basel_Works", RiskLevel::High)];
        let overlay = RiskOverlay::compute(&TreeSnapshot::capture(&tree), &alerts);
        let view = TreeView::new(&layout).with_overlay(&overlay);
        let mut frame = Frame::new(60, 20);
        view.render(area, &mut frame);

        let high = severity_color(Severity::High);
        let mut saw_high = false;
        for y in 0..20 {
            for x in 0..60 {
                if frame.buffer.get(x, y).unwrap().fg == Some(high) {
                    saw_high = true;
                }
            }
        }
        assert!(saw_high);
    }

    #[test]
    fn empty_layout_renders_nothing() {
        let layout = TreeLayout::default();
        let view = TreeView::new(&layout).hit_id(HitId::new(1));
        let mut frame = Frame::new(20, 10);
        view.render(Rect::new(0, 0, 20, 10), &mut frame);
        assert_eq!(frame.hit_test(5, 5), None);
    }
}
