//! Data Source
//!
//! Boundary trait for the relational store the forest is fetched from.

use crate::error::MapResult;
use crate::records::ForestData;
use crate::tree::NodeKind;
use async_trait::async_trait;

#[async_trait(?Send)]
pub trait ForestSource {
    /// All open areas, projects and items as flat lists.
    /// Which statuses count as closed is the implementor's call.
    async fn fetch_forest(&self) -> MapResult<ForestData>;

    /// Delete one record. The caller refetches the whole forest on success.
    async fn delete_record(&self, id: &str, kind: NodeKind) -> MapResult<()>;
}
