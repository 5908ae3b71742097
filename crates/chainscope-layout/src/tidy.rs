#![forbid(unsafe_code)]

//! Tidy-tree placement over the visible hierarchy.
//!
//! Depth is the rank from the root along the primary (horizontal) axis.
//! Breadth: a node with no visible children takes the next free slot past
//! the previous sibling; a node with visible children sits at the mean of
//! their breadth positions. Sibling subtrees occupy disjoint slot ranges,
//! so they never overlap. The layout recomputes from scratch on every
//! toggle or view switch; visible node counts stay small.

use chainscope_model::node::{HierarchyNode, NodeId};

/// A visible node with its computed coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub id: NodeId,
    pub name: String,
    pub manufacturer_key: String,
    /// Rank: distance from the root.
    pub depth: usize,
    /// Whether the node currently hides children.
    pub collapsed: bool,
    /// Whether the node has any children at all.
    pub leaf: bool,
    /// Descendants hidden under this node while collapsed.
    pub hidden_descendants: usize,
    /// Primary-axis coordinate in extent units.
    pub x: f64,
    /// Breadth coordinate in extent units.
    pub y: f64,
}

/// A parent→child pair among visible nodes, as indices into
/// [`TreeLayout::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub parent: usize,
    pub child: usize,
}

/// The placed visible tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeLayout {
    pub nodes: Vec<PlacedNode>,
    pub links: Vec<Link>,
}

impl TreeLayout {
    /// Lay out the visible subtree of `root` into a `width` × `height`
    /// extent. Zero-sized extents produce an empty layout.
    #[must_use]
    pub fn compute(root: &HierarchyNode, width: f64, height: f64) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }

        let mut layout = Self::default();
        let mut next_slot = 0.0;
        let mut max_depth = 0;
        layout.place(root, 0, &mut next_slot, &mut max_depth);

        let total_slots = next_slot.max(1.0);
        let depth_span = max_depth.max(1) as f64;
        for node in &mut layout.nodes {
            node.x = if max_depth == 0 {
                0.0
            } else {
                node.depth as f64 / depth_span * width
            };
            node.y = (node.y + 0.5) / total_slots * height;
        }
        layout
    }

    /// Place a node, returning its breadth position in slot units.
    fn place(
        &mut self,
        node: &HierarchyNode,
        depth: usize,
        next_slot: &mut f64,
        max_depth: &mut usize,
    ) -> f64 {
        *max_depth = (*max_depth).max(depth);
        let index = self.nodes.len();
        self.nodes.push(PlacedNode {
            id: node.id.clone(),
            name: node.name.clone(),
            manufacturer_key: node.manufacturer_key.clone(),
            depth,
            collapsed: node.is_collapsed(),
            leaf: node.is_leaf(),
            hidden_descendants: if node.is_collapsed() {
                node.descendant_count()
            } else {
                0
            },
            x: 0.0,
            y: 0.0,
        });

        let slot = if node.visible_children.is_empty() {
            let slot = *next_slot;
            *next_slot += 1.0;
            slot
        } else {
            let mut sum = 0.0;
            let count = node.visible_children.len() as f64;
            for child in &node.visible_children {
                let child_index = self.nodes.len();
                sum += self.place(child, depth + 1, next_slot, max_depth);
                self.links.push(Link {
                    parent: index,
                    child: child_index,
                });
            }
            sum / count
        };

        self.nodes[index].y = slot;
        slot
    }

    /// The placed node with the given identifier.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&PlacedNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}
