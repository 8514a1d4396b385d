//! Tree Builder
//!
//! Turns flat area/project/item records into the three-level forest the map
//! renders, plus guarded traversal helpers shared by layout and visibility.

use crate::error::{MapError, MapResult};
use crate::records::{AreaRecord, ForestData, ItemRecord, ProjectRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Deepest level a node may have (items)
pub const MAX_LEVEL: u8 = 2;

/// What a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Area,
    Project,
    Task,
    Bug,
    Feature,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Area => "area",
            NodeKind::Project => "project",
            NodeKind::Task => "task",
            NodeKind::Bug => "bug",
            NodeKind::Feature => "feature",
        }
    }

    /// Tree level a node of this kind lives at
    pub fn level(&self) -> u8 {
        match self {
            NodeKind::Area => 0,
            NodeKind::Project => 1,
            NodeKind::Task | NodeKind::Bug | NodeKind::Feature => 2,
        }
    }

    pub fn is_item(&self) -> bool {
        self.level() == MAX_LEVEL
    }
}

impl std::str::FromStr for NodeKind {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area" => Ok(NodeKind::Area),
            "project" => Ok(NodeKind::Project),
            "task" => Ok(NodeKind::Task),
            "bug" => Ok(NodeKind::Bug),
            "feature" => Ok(NodeKind::Feature),
            other => Err(MapError::InvalidTree(format!("unknown node kind: {}", other))),
        }
    }
}

/// Back-reference to the record a node was built from.
/// Only used for lookups such as "which area owns this project".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceRef {
    Area { id: String },
    Project { id: String, area_id: String },
    Item { id: String, project_id: String },
}

impl SourceRef {
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            SourceRef::Area { .. } => None,
            SourceRef::Project { area_id, .. } => Some(area_id),
            SourceRef::Item { project_id, .. } => Some(project_id),
        }
    }
}

/// One area, project or item in the forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    /// 0 = area, 1 = project, 2 = item
    pub level: u8,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    /// Source fetch order
    pub children: Vec<TreeNode>,
    pub source: SourceRef,
}

impl TreeNode {
    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes below this one, at any depth
    pub fn descendant_count(&self) -> usize {
        self.children.iter().map(|c| 1 + c.descendant_count()).sum()
    }
}

/// Build the forest from the individual record lists.
///
/// Projects whose `area_id` and items whose `project_id` point nowhere are
/// dropped silently. Items inherit their project's color when they have none.
pub fn build(
    areas: &[AreaRecord],
    projects: &[ProjectRecord],
    tasks: &[ItemRecord],
    bugs: &[ItemRecord],
    features: &[ItemRecord],
) -> Vec<TreeNode> {
    let mut projects_by_area: HashMap<&str, Vec<&ProjectRecord>> = HashMap::new();
    for project in projects {
        projects_by_area.entry(project.area_id.as_str()).or_default().push(project);
    }

    let mut items_by_project: HashMap<&str, Vec<(&ItemRecord, NodeKind)>> = HashMap::new();
    for (kind, records) in [(NodeKind::Task, tasks), (NodeKind::Bug, bugs), (NodeKind::Feature, features)] {
        for record in records {
            items_by_project.entry(record.project_id.as_str()).or_default().push((record, kind));
        }
    }

    areas
        .iter()
        .map(|area| {
            let children = projects_by_area
                .get(area.id.as_str())
                .map(|projects| {
                    projects
                        .iter()
                        .map(|project| project_node(project, items_by_project.get(project.id.as_str())))
                        .collect()
                })
                .unwrap_or_default();

            TreeNode {
                id: area.id.clone(),
                name: area.name.clone(),
                kind: NodeKind::Area,
                level: 0,
                color: area.color.clone(),
                icon: area.icon.clone(),
                status: area.status.clone(),
                priority: None,
                children,
                source: SourceRef::Area { id: area.id.clone() },
            }
        })
        .collect()
}

/// Build the forest from a full `fetch_forest` payload
pub fn build_forest(data: &ForestData) -> Vec<TreeNode> {
    build(&data.areas, &data.projects, &data.tasks, &data.bugs, &data.features)
}

fn project_node(project: &ProjectRecord, items: Option<&Vec<(&ItemRecord, NodeKind)>>) -> TreeNode {
    let children = items
        .map(|items| items.iter().map(|(record, kind)| item_node(record, *kind, project)).collect())
        .unwrap_or_default();

    TreeNode {
        id: project.id.clone(),
        name: project.name.clone(),
        kind: NodeKind::Project,
        level: 1,
        color: project.color.clone(),
        icon: project.icon.clone(),
        status: project.status.clone(),
        priority: project.priority.clone(),
        children,
        source: SourceRef::Project {
            id: project.id.clone(),
            area_id: project.area_id.clone(),
        },
    }
}

fn item_node(record: &ItemRecord, kind: NodeKind, project: &ProjectRecord) -> TreeNode {
    TreeNode {
        id: record.id.clone(),
        name: record.name.clone(),
        kind,
        level: 2,
        color: record.color.clone().or_else(|| project.color.clone()),
        icon: record.icon.clone(),
        status: record.status.clone(),
        priority: record.priority.clone(),
        children: Vec::new(),
        source: SourceRef::Item {
            id: record.id.clone(),
            project_id: project.id.clone(),
        },
    }
}

// ========================
// Guarded traversal
// ========================

/// True when `node` sits exactly one level below `parent` (or at 0 for roots)
/// and no deeper than `MAX_LEVEL`.
pub(crate) fn level_ok(node: &TreeNode, parent: Option<&TreeNode>) -> bool {
    let expected = parent.map_or(0, |p| p.level + 1);
    node.level == expected && node.level <= MAX_LEVEL
}

/// Depth-first pre-order walk over well-formed nodes.
/// Subtrees whose level breaks the area -> project -> item shape are skipped.
pub(crate) fn walk<'a, F>(forest: &'a [TreeNode], f: &mut F)
where
    F: FnMut(&'a TreeNode, Option<&'a TreeNode>),
{
    fn visit<'a, F>(nodes: &'a [TreeNode], parent: Option<&'a TreeNode>, f: &mut F)
    where
        F: FnMut(&'a TreeNode, Option<&'a TreeNode>),
    {
        for node in nodes {
            if !level_ok(node, parent) {
                tracing::warn!(id = %node.id, level = node.level, "skipping node with unexpected level");
                continue;
            }
            f(node, parent);
            visit(&node.children, Some(node), f);
        }
    }

    visit(forest, None, f);
}

/// Every node id in depth-first order, all three levels
pub fn collect_ids(forest: &[TreeNode]) -> Vec<String> {
    let mut ids = Vec::new();
    walk(forest, &mut |node, _| ids.push(node.id.clone()));
    ids
}

pub fn node_count(forest: &[TreeNode]) -> usize {
    let mut count = 0;
    walk(forest, &mut |_, _| count += 1);
    count
}

pub fn find_node<'a>(forest: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    let mut found = None;
    walk(forest, &mut |node, _| {
        if found.is_none() && node.id == id {
            found = Some(node);
        }
    });
    found
}

/// Reject forests whose levels do not follow parent + 1
pub fn check_levels(forest: &[TreeNode]) -> MapResult<()> {
    fn check(nodes: &[TreeNode], parent: Option<&TreeNode>) -> MapResult<()> {
        for node in nodes {
            if !level_ok(node, parent) {
                return Err(MapError::InvalidTree(format!(
                    "node {} has level {} under {}",
                    node.id,
                    node.level,
                    parent.map_or("<root>", |p| p.id.as_str())
                )));
            }
            check(&node.children, Some(node))?;
        }
        Ok(())
    }

    check(forest, None)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn area(id: &str, name: &str) -> AreaRecord {
        AreaRecord {
            id: id.to_string(),
            name: name.to_string(),
            color: Some("#4f8a8b".to_string()),
            icon: None,
            status: None,
        }
    }

    pub fn project(id: &str, area_id: &str, name: &str) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            area_id: area_id.to_string(),
            name: name.to_string(),
            color: Some("#f4a259".to_string()),
            icon: None,
            status: Some("active".to_string()),
            priority: Some("high".to_string()),
        }
    }

    pub fn item(id: &str, project_id: &str, name: &str) -> ItemRecord {
        ItemRecord {
            id: id.to_string(),
            project_id: project_id.to_string(),
            name: name.to_string(),
            color: None,
            icon: None,
            status: Some("todo".to_string()),
            priority: None,
        }
    }

    /// Health -> Gym -> Run
    pub fn health() -> ForestData {
        ForestData {
            areas: vec![area("a1", "Health")],
            projects: vec![project("p1", "a1", "Gym")],
            tasks: vec![item("t1", "p1", "Run")],
            ..Default::default()
        }
    }

    pub fn two_areas() -> ForestData {
        ForestData {
            areas: vec![area("a1", "Health"), area("a2", "Career")],
            projects: vec![
                project("p1", "a1", "Gym"),
                project("p2", "a2", "Promotion"),
                project("p3", "a1", "Diet"),
            ],
            tasks: vec![item("t1", "p1", "Run"), item("t2", "p2", "Write review")],
            bugs: vec![item("b1", "p1", "Knee hurts")],
            features: vec![item("f1", "p3", "Meal plan")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_build_three_levels() {
        let forest = build_forest(&health());

        assert_eq!(forest.len(), 1);
        let a1 = &forest[0];
        assert_eq!(a1.kind, NodeKind::Area);
        assert_eq!(a1.level, 0);
        assert_eq!(a1.children.len(), 1);

        let p1 = &a1.children[0];
        assert_eq!(p1.level, 1);
        assert_eq!(p1.source.parent_id(), Some("a1"));

        let t1 = &p1.children[0];
        assert_eq!(t1.kind, NodeKind::Task);
        assert_eq!(t1.level, 2);
        // No explicit color: inherited from the project
        assert_eq!(t1.color.as_deref(), Some("#f4a259"));
    }

    #[test]
    fn test_child_order_follows_fetch_order() {
        let forest = build_forest(&two_areas());

        let a1_children: Vec<&str> = forest[0].children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(a1_children, vec!["p1", "p3"]);

        // Tasks before bugs before features
        let p1_children: Vec<(&str, NodeKind)> =
            forest[0].children[0].children.iter().map(|c| (c.id.as_str(), c.kind)).collect();
        assert_eq!(p1_children, vec![("t1", NodeKind::Task), ("b1", NodeKind::Bug)]);
    }

    #[test]
    fn test_orphans_dropped() {
        let mut data = two_areas();
        data.projects.push(project("p9", "missing-area", "Orphan project"));
        data.tasks.push(item("t9", "p9", "Under orphan project"));
        data.bugs.push(item("b9", "missing-project", "Orphan bug"));

        let forest = build_forest(&data);
        let ids = collect_ids(&forest);

        assert!(!ids.contains(&"p9".to_string()));
        assert!(!ids.contains(&"t9".to_string()));
        assert!(!ids.contains(&"b9".to_string()));
        // Everything else survives
        assert_eq!(node_count(&forest), two_areas().record_count());
    }

    #[test]
    fn test_levels_follow_parent() {
        let forest = build_forest(&two_areas());
        assert!(check_levels(&forest).is_ok());

        walk(&forest, &mut |node, parent| {
            assert_eq!(node.level, parent.map_or(0, |p| p.level + 1));
        });
    }

    #[test]
    fn test_malformed_level_rejected_and_skipped() {
        let mut forest = build_forest(&health());
        forest[0].children[0].level = 2;

        assert!(matches!(check_levels(&forest), Err(MapError::InvalidTree(_))));
        // The walk refuses to descend into the broken project
        assert_eq!(collect_ids(&forest), vec!["a1".to_string()]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let data = two_areas();
        assert_eq!(build_forest(&data), build_forest(&data));
    }

    #[test]
    fn test_descendant_count_and_find() {
        let forest = build_forest(&two_areas());
        assert_eq!(forest[0].descendant_count(), 5);
        assert_eq!(find_node(&forest, "f1").map(|n| n.kind), Some(NodeKind::Feature));
        assert!(find_node(&forest, "nope").is_none());
    }

    #[test]
    fn test_kind_parses_from_name() {
        assert_eq!("bug".parse::<NodeKind>(), Ok(NodeKind::Bug));
        assert_eq!(NodeKind::Feature.as_str(), "feature");
        for kind in [NodeKind::Area, NodeKind::Project, NodeKind::Task, NodeKind::Bug, NodeKind::Feature] {
            assert_eq!(kind.as_str().parse::<NodeKind>(), Ok(kind));
        }
        assert!(matches!("epic".parse::<NodeKind>(), Err(MapError::InvalidTree(_))));
    }
}
