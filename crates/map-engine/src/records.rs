//! Source Records
//!
//! Flat, foreign-key-linked rows as returned by the data source.

use serde::{Deserialize, Serialize};

/// Top-level grouping row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRecord {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub status: Option<String>,
}

/// Project row, linked to its area by `area_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub area_id: String,
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Task, bug or feature row, linked to its project by `project_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub project_id: String,
    #[serde(alias = "title")]
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Everything `fetch_forest` returns, one list per table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestData {
    pub areas: Vec<AreaRecord>,
    pub projects: Vec<ProjectRecord>,
    pub tasks: Vec<ItemRecord>,
    pub bugs: Vec<ItemRecord>,
    pub features: Vec<ItemRecord>,
}

impl ForestData {
    /// Total number of rows across all lists, orphans included
    pub fn record_count(&self) -> usize {
        self.areas.len() + self.projects.len() + self.tasks.len() + self.bugs.len() + self.features.len()
    }
}
