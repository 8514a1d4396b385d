//! Visibility
//!
//! Which nodes are on screen: roots always, children only under expanded
//! parents, items only when their kind passes the filter.

use crate::layout::NodePosition;
use crate::tree::{collect_ids, level_ok, NodeKind, TreeNode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Ids of nodes whose children are shown. Every update returns a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionSet(BTreeSet<String>);

impl ExpansionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Expanded <-> collapsed for one node
    pub fn toggled(&self, id: &str) -> Self {
        let mut next = self.0.clone();
        if !next.remove(id) {
            next.insert(id.to_string());
        }
        Self(next)
    }

    /// Every node at every level, so all three levels show at once
    pub fn expanded_all(forest: &[TreeNode]) -> Self {
        collect_ids(forest).into_iter().collect()
    }

    pub fn collapsed_all() -> Self {
        Self::default()
    }
}

impl FromIterator<String> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which item kinds are shown. Areas and projects always pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindFilter {
    pub tasks: bool,
    pub bugs: bool,
    pub features: bool,
}

impl Default for KindFilter {
    fn default() -> Self {
        Self {
            tasks: true,
            bugs: true,
            features: true,
        }
    }
}

impl KindFilter {
    pub fn shows(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Area | NodeKind::Project => true,
            NodeKind::Task => self.tasks,
            NodeKind::Bug => self.bugs,
            NodeKind::Feature => self.features,
        }
    }

    pub fn toggled(self, kind: NodeKind) -> Self {
        match kind {
            NodeKind::Task => Self { tasks: !self.tasks, ..self },
            NodeKind::Bug => Self { bugs: !self.bugs, ..self },
            NodeKind::Feature => Self { features: !self.features, ..self },
            NodeKind::Area | NodeKind::Project => self,
        }
    }
}

/// Visible subset of `positions`, in input order, with every kind shown
pub fn visible(positions: &[NodePosition], forest: &[TreeNode], expansion: &ExpansionSet) -> Vec<NodePosition> {
    visible_filtered(positions, forest, expansion, &KindFilter::default())
}

/// Visible subset of `positions`, in input order
pub fn visible_filtered(
    positions: &[NodePosition],
    forest: &[TreeNode],
    expansion: &ExpansionSet,
    filter: &KindFilter,
) -> Vec<NodePosition> {
    let ids = visible_ids(forest, expansion, filter);
    positions
        .iter()
        .filter(|p| ids.contains(p.id.as_str()))
        .cloned()
        .collect()
}

fn visible_ids<'a>(forest: &'a [TreeNode], expansion: &ExpansionSet, filter: &KindFilter) -> HashSet<&'a str> {
    fn descend<'a>(
        node: &'a TreeNode,
        expansion: &ExpansionSet,
        filter: &KindFilter,
        ids: &mut HashSet<&'a str>,
    ) {
        ids.insert(node.id.as_str());
        if !expansion.contains(&node.id) {
            return;
        }
        for child in &node.children {
            if level_ok(child, Some(node)) && filter.shows(child.kind) {
                descend(child, expansion, filter, ids);
            }
        }
    }

    let mut ids = HashSet::new();
    for root in forest.iter().filter(|n| level_ok(n, None)) {
        descend(root, expansion, filter, &mut ids);
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout, LayoutConfig, PositionMap};
    use crate::tree::build_forest;
    use crate::tree::fixtures::*;

    fn visible_ids_of(data: &crate::records::ForestData, expansion: &ExpansionSet, filter: &KindFilter) -> Vec<String> {
        let forest = build_forest(data);
        let positions = layout(&forest, &LayoutConfig::default(), &PositionMap::new());
        visible_filtered(&positions, &forest, expansion, filter)
            .into_iter()
            .map(|p| p.id)
            .collect()
    }

    #[test]
    fn test_roots_only_when_collapsed() {
        let ids = visible_ids_of(&two_areas(), &ExpansionSet::new(), &KindFilter::default());
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[test]
    fn test_expand_and_collapse_scenario() {
        let data = health();
        let expanded = ExpansionSet::new().toggled("a1").toggled("p1");
        assert_eq!(visible_ids_of(&data, &expanded, &KindFilter::default()), vec!["a1", "p1", "t1"]);

        // Collapsing a1 hides p1 and t1 even though p1 stays expanded
        let collapsed = expanded.toggled("a1");
        assert!(collapsed.contains("p1"));
        assert_eq!(visible_ids_of(&data, &collapsed, &KindFilter::default()), vec!["a1"]);
    }

    #[test]
    fn test_expand_all_shows_every_level() {
        let data = two_areas();
        let forest = build_forest(&data);
        let all = ExpansionSet::expanded_all(&forest);

        assert_eq!(all.len(), data.record_count());
        assert_eq!(visible_ids_of(&data, &all, &KindFilter::default()).len(), data.record_count());
        assert!(ExpansionSet::collapsed_all().is_empty());
    }

    #[test]
    fn test_monotonic_in_expansion() {
        let data = two_areas();
        let small = ExpansionSet::new().toggled("a1");
        let large = small.toggled("p1").toggled("a2");

        let small_ids = visible_ids_of(&data, &small, &KindFilter::default());
        let large_ids = visible_ids_of(&data, &large, &KindFilter::default());
        assert!(small_ids.iter().all(|id| large_ids.contains(id)));
        assert!(large_ids.len() > small_ids.len());
    }

    #[test]
    fn test_kind_filter_hides_items() {
        let data = two_areas();
        let forest = build_forest(&data);
        let all = ExpansionSet::expanded_all(&forest);
        let no_bugs = KindFilter::default().toggled(NodeKind::Bug);

        let ids = visible_ids_of(&data, &all, &no_bugs);
        assert!(!ids.contains(&"b1".to_string()));
        assert!(ids.contains(&"t1".to_string()));
        // Projects are never filtered
        assert_eq!(KindFilter::default().toggled(NodeKind::Project), KindFilter::default());
    }

    #[test]
    fn test_output_keeps_input_order() {
        let data = two_areas();
        let forest = build_forest(&data);
        let positions = layout(&forest, &LayoutConfig::default(), &PositionMap::new());
        let mut reversed = positions.clone();
        reversed.reverse();

        let shown = visible(&reversed, &forest, &ExpansionSet::expanded_all(&forest));
        let ids: Vec<&str> = shown.iter().map(|p| p.id.as_str()).collect();
        let expected: Vec<&str> = reversed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, expected);
    }
}
