#![forbid(unsafe_code)]

//! The supply-chain hierarchy and its collapse state.
//!
//! A [`HierarchyNode`] keeps its children in one of two vectors:
//! `visible_children` while expanded, `hidden_children` while collapsed.
//! Exactly one of the two is non-empty for a node that has children, and a
//! collapse→expand round trip restores the original vector bit-for-bit
//! because [`HierarchyNode::toggle`] only ever swaps the two.
//!
//! Node identity is the child-index path from the root, assigned once at
//! construction and carried through every structural copy, so risk overlays
//! and selections computed over copies still address the canonical tree.

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::alert::Severity;

/// Stable, path-derived node identifier.
///
/// The root is the empty path; a child appends its index in the parent's
/// child list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeId(Vec<u16>);

impl NodeId {
    /// The root identifier.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Identifier of this node's `index`-th child.
    #[must_use]
    pub fn child(&self, index: u16) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    /// The child-index path from the root.
    #[must_use]
    pub fn path(&self) -> &[u16] {
        &self.0
    }

    /// Depth below the root (root = 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r")?;
        for idx in &self.0 {
            write!(f, ".{idx}")?;
        }
        Ok(())
    }
}

/// The backend's hierarchy snapshot shape, as decoded from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawNode {
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub children: Vec<RawNode>,
}

/// A node of the canonical supply-chain tree.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub id: NodeId,
    /// Component/material label.
    pub name: String,
    /// Producing facility; empty = unbound intermediate node.
    pub manufacturer_key: String,
    /// Children shown by the layout. Empty while collapsed.
    pub visible_children: Vec<HierarchyNode>,
    /// Children retained while collapsed. Empty while expanded.
    pub hidden_children: Vec<HierarchyNode>,
    /// Aggregated severity, stamped by the risk overlay. Not user-mutable.
    pub highest_risk: Severity,
}

impl HierarchyNode {
    /// Build the canonical tree from a backend snapshot.
    ///
    /// The root's children stay visible; every deeper subtree starts
    /// collapsed.
    #[must_use]
    pub fn initialize(raw: RawNode) -> Self {
        Self::build(raw, NodeId::root(), false)
    }

    fn build(raw: RawNode, id: NodeId, collapsed: bool) -> Self {
        let children: Vec<HierarchyNode> = raw
            .children
            .into_iter()
            .enumerate()
            .map(|(i, child)| Self::build(child, id.child(i as u16), true))
            .collect();

        let (visible_children, hidden_children) = if collapsed {
            (Vec::new(), children)
        } else {
            (children, Vec::new())
        };

        Self {
            id,
            name: raw.name,
            manufacturer_key: raw.manufacturer,
            visible_children,
            hidden_children,
            highest_risk: Severity::None,
        }
    }

    /// Children regardless of collapse state.
    #[must_use]
    pub fn children(&self) -> &[HierarchyNode] {
        if self.visible_children.is_empty() {
            &self.hidden_children
        } else {
            &self.visible_children
        }
    }

    /// Whether this node currently hides its children.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        !self.hidden_children.is_empty()
    }

    /// Whether this node has no children at all.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.visible_children.is_empty() && self.hidden_children.is_empty()
    }

    /// Find a node by identifier, following its index path.
    #[must_use]
    pub fn find(&self, id: &NodeId) -> Option<&HierarchyNode> {
        let mut node = self;
        for &idx in id.path() {
            node = node.children().get(idx as usize)?;
        }
        Some(node)
    }

    fn find_mut(&mut self, id: &NodeId) -> Option<&mut HierarchyNode> {
        let mut node = self;
        for &idx in id.path() {
            let children = if node.visible_children.is_empty() {
                &mut node.hidden_children
            } else {
                &mut node.visible_children
            };
            node = children.get_mut(idx as usize)?;
        }
        Some(node)
    }

    /// Swap a node's collapse state in place.
    ///
    /// Locating the node costs O(depth); the swap itself is O(1) and never
    /// copies the tree, so repeated toggles always observe consistent
    /// state. An unknown identifier (a stale handler firing after a
    /// refetch) is a silent no-op. Returns whether the node was found.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        match self.find_mut(id) {
            Some(node) => {
                std::mem::swap(&mut node.visible_children, &mut node.hidden_children);
                true
            }
            None => {
                debug!(node = %id, "toggle for unknown node ignored");
                false
            }
        }
    }

    /// Every non-empty manufacturer key in the tree, collapse-independent.
    #[must_use]
    pub fn manufacturer_keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys(&self, keys: &mut BTreeSet<String>) {
        if !self.manufacturer_key.is_empty() {
            keys.insert(self.manufacturer_key.clone());
        }
        for child in self.children() {
            child.collect_keys(keys);
        }
    }

    /// Number of descendants, collapse-independent.
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        self.children()
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    /// Number of nodes the layout will place, including this one.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        1 + self
            .visible_children
            .iter()
            .map(HierarchyNode::visible_count)
            .sum::<usize>()
    }

    /// Identifiers of every node, collapse-independent, preorder.
    #[must_use]
    pub fn all_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids(&self, out: &mut Vec<NodeId>) {
        out.push(self.id.clone());
        for child in self.children() {
            child.collect_ids(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(name: &str, manufacturer: &str, children: Vec<RawNode>) -> RawNode {
        RawNode {
            name: name.into(),
            manufacturer: manufacturer.into(),
            children,
        }
    }

    fn sample_tree() -> HierarchyNode {
        HierarchyNode::initialize(raw(
            "Product",
            "",
            vec![
                raw(
                    "Resin",
                    "Acme_Plant1",
                    vec![raw("Monomer", "ChemCo_Site3", vec![])],
                ),
                raw("Additive", "Basel_Works", vec![]),
            ],
        ))
    }

    #[test]
    fn initialize_expands_root_only() {
        let tree = sample_tree();
        assert!(!tree.is_collapsed());
        assert_eq!(tree.visible_children.len(), 2);
        // The first child has a grandchild but starts collapsed.
        assert!(tree.visible_children[0].is_collapsed());
        assert!(tree.visible_children[0].visible_children.is_empty());
    }

    #[test]
    fn ids_follow_index_paths() {
        let tree = sample_tree();
        assert_eq!(tree.id, NodeId::root());
        assert_eq!(tree.visible_children[1].id, NodeId::root().child(1));
        let grandchild = &tree.visible_children[0].hidden_children[0];
        assert_eq!(grandchild.id, NodeId::root().child(0).child(0));
        assert_eq!(grandchild.id.to_string(), "r.0.0");
        assert_eq!(grandchild.id.depth(), 2);
    }

    #[test]
    fn find_ignores_collapse_state() {
        let tree = sample_tree();
        let id = NodeId::root().child(0).child(0);
        assert_eq!(tree.find(&id).map(|n| n.name.as_str()), Some("Monomer"));
    }

    #[test]
    fn toggle_round_trip_preserves_order() {
        let mut tree = sample_tree();
        let original = tree.clone();
        let id = NodeId::root().child(0);
        assert!(tree.toggle(&id));
        assert!(!tree.find(&id).unwrap().is_collapsed());
        assert!(tree.toggle(&id));
        assert_eq!(tree, original);
    }

    #[test]
    fn toggle_does_not_affect_siblings() {
        let mut tree = sample_tree();
        tree.toggle(&NodeId::root().child(0));
        assert!(tree.find(&NodeId::root().child(1)).unwrap().is_leaf());
        assert!(!tree.is_collapsed());
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut tree = sample_tree();
        let before = tree.clone();
        assert!(!tree.toggle(&NodeId::root().child(9).child(3)));
        assert_eq!(tree, before);
    }

    #[test]
    fn toggle_leaf_is_harmless() {
        let mut tree = sample_tree();
        let before = tree.clone();
        assert!(tree.toggle(&NodeId::root().child(1)));
        assert_eq!(tree, before);
    }

    #[test]
    fn manufacturer_keys_exclude_empty_root() {
        let tree = HierarchyNode::initialize(raw(
            "P",
            "",
            vec![raw("C", "Acme", vec![])],
        ));
        let keys = tree.manufacturer_keys();
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["Acme"]);
    }

    #[test]
    fn manufacturer_keys_deduplicate_and_span_collapsed_subtrees() {
        let tree = sample_tree();
        let keys = tree.manufacturer_keys();
        assert_eq!(
            keys.into_iter().collect::<Vec<_>>(),
            vec!["Acme_Plant1", "Basel_Works", "ChemCo_Site3"]
        );
    }

    #[test]
    fn visible_count_respects_collapse() {
        let mut tree = sample_tree();
        // Root + two visible children; the grandchild is hidden.
        assert_eq!(tree.visible_count(), 3);
        tree.toggle(&NodeId::root().child(0));
        assert_eq!(tree.visible_count(), 4);
    }

    #[test]
    fn descendant_count_is_collapse_independent() {
        let tree = sample_tree();
        assert_eq!(tree.descendant_count(), 3);
        assert_eq!(tree.visible_children[0].descendant_count(), 1);
    }

    #[test]
    fn decode_raw_node_defaults() {
        let raw: RawNode =
            serde_json::from_str(r#"{"name":"P","children":[{"name":"C","manufacturer":"M"}]}"#)
                .unwrap();
        assert_eq!(raw.manufacturer, "");
        assert_eq!(raw.children[0].manufacturer, "M");
        assert!(raw.children[0].children.is_empty());
    }

    // --- property tests ---

    fn arb_raw_tree() -> impl Strategy<Value = RawNode> {
        let leaf = ("[a-z]{1,8}", "[A-Z]{0,6}").prop_map(|(name, manufacturer)| RawNode {
            name,
            manufacturer,
            children: Vec::new(),
        });
        leaf.prop_recursive(3, 24, 4, |inner| {
            (
                "[a-z]{1,8}",
                "[A-Z]{0,6}",
                prop::collection::vec(inner, 0..4),
            )
                .prop_map(|(name, manufacturer, children)| RawNode {
                    name,
                    manufacturer,
                    children,
                })
        })
    }

    proptest! {
        #[test]
        fn prop_toggle_twice_is_identity(
            raw in arb_raw_tree(),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut tree = HierarchyNode::initialize(raw);
            let ids = tree.all_ids();
            let id = ids[pick.index(ids.len())].clone();
            let original = tree.clone();
            tree.toggle(&id);
            tree.toggle(&id);
            prop_assert_eq!(tree, original);
        }

        #[test]
        fn prop_exactly_one_child_list_nonempty(raw in arb_raw_tree()) {
            fn check(node: &HierarchyNode) -> bool {
                let ok = node.visible_children.is_empty() || node.hidden_children.is_empty();
                ok && node.children().iter().all(check)
            }
            let tree = HierarchyNode::initialize(raw);
            prop_assert!(check(&tree));
        }

        #[test]
        fn prop_toggle_leaves_other_nodes_untouched(
            raw in arb_raw_tree(),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut tree = HierarchyNode::initialize(raw);
            let ids = tree.all_ids();
            let id = ids[pick.index(ids.len())].clone();
            let before: Vec<bool> = ids
                .iter()
                .map(|i| tree.find(i).unwrap().is_collapsed())
                .collect();
            tree.toggle(&id);
            for (i, node_id) in ids.iter().enumerate() {
                let collapsed = tree.find(node_id).unwrap().is_collapsed();
                if node_id == &id {
                    continue;
                }
                prop_assert_eq!(collapsed, before[i]);
            }
        }
    }
}
