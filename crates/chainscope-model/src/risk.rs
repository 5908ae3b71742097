#![forbid(unsafe_code)]

//! Bottom-up risk aggregation.
//!
//! The engine never reads the canonical tree directly: it captures a
//! [`TreeSnapshot`] (identifiers, manufacturer keys, and structure only)
//! and aggregates over that, so an in-place collapse toggle can never
//! interleave with a pass. Aggregation is collapse-independent: a collapsed
//! ancestor still reflects descendant risk.

use std::collections::HashMap;

use tracing::debug;

use crate::alert::{Alert, Severity};
use crate::node::{HierarchyNode, NodeId};

/// Structural copy of one node: just enough to aggregate over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotNode {
    pub id: NodeId,
    pub manufacturer_key: String,
    pub children: Vec<SnapshotNode>,
}

/// Value-semantics copy of the canonical tree's structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSnapshot {
    pub root: SnapshotNode,
}

impl TreeSnapshot {
    /// Capture the full tree, ignoring collapse state.
    #[must_use]
    pub fn capture(node: &HierarchyNode) -> Self {
        Self {
            root: Self::copy_node(node),
        }
    }

    fn copy_node(node: &HierarchyNode) -> SnapshotNode {
        SnapshotNode {
            id: node.id.clone(),
            manufacturer_key: node.manufacturer_key.clone(),
            children: node.children().iter().map(Self::copy_node).collect(),
        }
    }
}

/// Output of an aggregation pass: per-node aggregated severity and the
/// indices of the alerts directly bound to each node.
#[derive(Debug, Clone, Default)]
pub struct RiskOverlay {
    highest: HashMap<NodeId, Severity>,
    bound: HashMap<NodeId, Vec<usize>>,
}

impl RiskOverlay {
    /// Aggregate `alerts` over `snapshot` in one postorder pass.
    ///
    /// An alert binds to the nodes whose manufacturer key equals its own
    /// exactly; empty keys never bind. A node's severity is the maximum of
    /// its own bound alerts and its children's severities, `None` when both
    /// are absent. O(nodes + alerts).
    #[must_use]
    pub fn compute(snapshot: &TreeSnapshot, alerts: &[Alert]) -> Self {
        let mut by_key: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, alert) in alerts.iter().enumerate() {
            if let Some(key) = alert.manufacturer.as_deref()
                && !key.is_empty()
            {
                by_key.entry(key).or_default().push(i);
            }
        }

        let mut overlay = Self::default();
        let root = overlay.aggregate(&snapshot.root, alerts, &by_key);
        debug!(
            nodes = overlay.highest.len(),
            alerts = alerts.len(),
            root_severity = root.rank(),
            "risk aggregation pass"
        );
        overlay
    }

    fn aggregate(
        &mut self,
        node: &SnapshotNode,
        alerts: &[Alert],
        by_key: &HashMap<&str, Vec<usize>>,
    ) -> Severity {
        let bound: Vec<usize> = if node.manufacturer_key.is_empty() {
            Vec::new()
        } else {
            by_key
                .get(node.manufacturer_key.as_str())
                .cloned()
                .unwrap_or_default()
        };

        let own = bound
            .iter()
            .map(|&i| alerts[i].risk_level.severity())
            .max()
            .unwrap_or(Severity::None);

        let children = node
            .children
            .iter()
            .map(|child| self.aggregate(child, alerts, by_key))
            .max()
            .unwrap_or(Severity::None);

        let highest = own.max(children);
        self.highest.insert(node.id.clone(), highest);
        if !bound.is_empty() {
            self.bound.insert(node.id.clone(), bound);
        }
        highest
    }

    /// Aggregated severity for a node; `None` for unknown identifiers.
    #[must_use]
    pub fn severity(&self, id: &NodeId) -> Severity {
        self.highest.get(id).copied().unwrap_or_default()
    }

    /// Indices of the alerts directly bound to a node (not the subtree
    /// aggregate).
    #[must_use]
    pub fn bound_alerts(&self, id: &NodeId) -> &[usize] {
        self.bound.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Stamp aggregated severities back onto the canonical tree.
    pub fn apply(&self, node: &mut HierarchyNode) {
        node.highest_risk = self.severity(&node.id);
        let children = if node.visible_children.is_empty() {
            &mut node.hidden_children
        } else {
            &mut node.visible_children
        };
        for child in children {
            self.apply(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::RiskLevel;
    use crate::node::RawNode;

    fn raw(name: &str, manufacturer: &str, children: Vec<RawNode>) -> RawNode {
        RawNode {
            name: name.into(),
            manufacturer: manufacturer.into(),
            children,
        }
    }

    fn alert(id: &str, manufacturer: &str, level: RiskLevel) -> Alert {
        Alert {
            id: id.into(),
            category: "Test".into(),
            risk_level: level,
            location: "Somewhere".into(),
            details: String::new(),
            date: "2024-01-01".into(),
            manufacturer: if manufacturer.is_empty() {
                None
            } else {
                Some(manufacturer.into())
            },
            latitude: None,
            longitude: None,
            scope: Default::default(),
        }
    }

    fn two_supplier_tree() -> HierarchyNode {
        HierarchyNode::initialize(raw(
            "R",
            "",
            vec![raw("A", "A", vec![]), raw("B", "B", vec![])],
        ))
    }

    #[test]
    fn root_reflects_max_of_children() {
        let tree = two_supplier_tree();
        let alerts = vec![
            alert("1", "A", RiskLevel::High),
            alert("2", "B", RiskLevel::Medium),
        ];
        let overlay = RiskOverlay::compute(&TreeSnapshot::capture(&tree), &alerts);
        assert_eq!(overlay.severity(&NodeId::root()).rank(), 3);
        assert_eq!(overlay.severity(&NodeId::root().child(0)).rank(), 3);
        assert_eq!(overlay.severity(&NodeId::root().child(1)).rank(), 2);
    }

    #[test]
    fn aggregation_invariant_holds_everywhere() {
        let tree = HierarchyNode::initialize(raw(
            "R",
            "",
            vec![
                raw("A", "A", vec![raw("AA", "AA", vec![]), raw("AB", "", vec![])]),
                raw("B", "B", vec![]),
            ],
        ));
        let alerts = vec![
            alert("1", "AA", RiskLevel::High),
            alert("2", "B", RiskLevel::Low),
        ];
        let snapshot = TreeSnapshot::capture(&tree);
        let overlay = RiskOverlay::compute(&snapshot, &alerts);

        fn check(node: &SnapshotNode, overlay: &RiskOverlay, alerts: &[Alert]) {
            let own = overlay
                .bound_alerts(&node.id)
                .iter()
                .map(|&i| alerts[i].risk_level.severity())
                .max()
                .unwrap_or(Severity::None);
            let children = node
                .children
                .iter()
                .map(|c| overlay.severity(&c.id))
                .max()
                .unwrap_or(Severity::None);
            assert_eq!(overlay.severity(&node.id), own.max(children));
            for child in &node.children {
                check(child, overlay, alerts);
            }
        }
        check(&snapshot.root, &overlay, &alerts);
    }

    #[test]
    fn binding_is_exact_and_exclusive() {
        let tree = two_supplier_tree();
        let alerts = vec![alert("1", "A", RiskLevel::High)];
        let overlay = RiskOverlay::compute(&TreeSnapshot::capture(&tree), &alerts);
        assert_eq!(overlay.bound_alerts(&NodeId::root().child(0)), &[0]);
        assert!(overlay.bound_alerts(&NodeId::root().child(1)).is_empty());
        assert!(overlay.bound_alerts(&NodeId::root()).is_empty());
        assert_eq!(overlay.severity(&NodeId::root().child(1)), Severity::None);
    }

    #[test]
    fn empty_manufacturer_key_binds_nothing() {
        // Both the root's empty key and an alert with no key: neither may
        // match the other.
        let tree = two_supplier_tree();
        let alerts = vec![alert("1", "", RiskLevel::High)];
        let overlay = RiskOverlay::compute(&TreeSnapshot::capture(&tree), &alerts);
        assert_eq!(overlay.severity(&NodeId::root()), Severity::None);
        assert!(overlay.bound_alerts(&NodeId::root()).is_empty());
    }

    #[test]
    fn aggregation_ignores_collapse_state() {
        let mut tree = HierarchyNode::initialize(raw(
            "R",
            "",
            vec![raw("A", "A", vec![raw("AA", "AA", vec![])])],
        ));
        let alerts = vec![alert("1", "AA", RiskLevel::High)];

        let expanded = RiskOverlay::compute(&TreeSnapshot::capture(&tree), &alerts);
        // Collapse the root: the whole subtree disappears from the layout
        // but severity stays.
        tree.toggle(&NodeId::root());
        let collapsed = RiskOverlay::compute(&TreeSnapshot::capture(&tree), &alerts);

        assert_eq!(expanded.severity(&NodeId::root()).rank(), 3);
        assert_eq!(collapsed.severity(&NodeId::root()).rank(), 3);
    }

    #[test]
    fn apply_stamps_canonical_tree() {
        let mut tree = two_supplier_tree();
        let alerts = vec![alert("1", "B", RiskLevel::Medium)];
        let overlay = RiskOverlay::compute(&TreeSnapshot::capture(&tree), &alerts);
        overlay.apply(&mut tree);
        assert_eq!(tree.highest_risk, Severity::Medium);
        assert_eq!(tree.visible_children[0].highest_risk, Severity::None);
        assert_eq!(tree.visible_children[1].highest_risk, Severity::Medium);
    }

    #[test]
    fn no_alerts_means_no_risk_anywhere() {
        let tree = two_supplier_tree();
        let overlay = RiskOverlay::compute(&TreeSnapshot::capture(&tree), &[]);
        for id in tree.all_ids() {
            assert_eq!(overlay.severity(&id), Severity::None);
        }
    }

    #[test]
    fn snapshot_captures_hidden_children() {
        let tree = HierarchyNode::initialize(raw(
            "R",
            "",
            vec![raw("A", "A", vec![raw("AA", "AA", vec![])])],
        ));
        let snapshot = TreeSnapshot::capture(&tree);
        assert_eq!(snapshot.root.children[0].children.len(), 1);
        assert_eq!(snapshot.root.children[0].children[0].manufacturer_key, "AA");
    }
}
