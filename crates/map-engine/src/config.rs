//! Map Configuration
//!
//! Every tunable constant of the map in one plain record. Missing sections
//! and fields fall back to their defaults.

use crate::connections::NodeSizes;
use crate::drag::{ArrangeConfig, DragConfig};
use crate::error::{MapError, MapResult};
use crate::layout::LayoutConfig;
use crate::viewport::ViewportConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub layout: LayoutConfig,
    pub viewport: ViewportConfig,
    pub drag: DragConfig,
    pub arrange: ArrangeConfig,
    pub sizes: NodeSizes,
}

impl MapConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> MapResult<Self> {
        let config: MapConfig = serde_json::from_str(json).map_err(|e| MapError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MapResult<()> {
        if self.layout.area_spacing <= 0.0 || self.layout.vertical_spacing <= 0.0 {
            return Err(MapError::Config("layout spacing must be positive".to_string()));
        }
        if self.drag.threshold < 0.0 {
            return Err(MapError::Config("drag threshold must not be negative".to_string()));
        }
        self.viewport.validate()?;
        self.arrange.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MapConfig::from_json(r#"{ "layout": { "vertical_spacing": 120 }, "drag": { "threshold": 8 } }"#)
            .expect("valid config");

        assert_eq!(config.layout.vertical_spacing, 120.0);
        assert_eq!(config.layout.area_spacing, 400.0);
        assert_eq!(config.drag.threshold, 8.0);
        assert_eq!(config.viewport, ViewportConfig::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(MapConfig::from_json("{}").expect("valid config"), MapConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            MapConfig::from_json(r#"{ "layout": { "area_spacing": 0 } }"#),
            Err(MapError::Config(_))
        ));
        assert!(matches!(MapConfig::from_json("not json"), Err(MapError::Config(_))));
        assert!(matches!(
            MapConfig::from_json(r#"{ "viewport": { "max_zoom": 0.5 } }"#),
            Err(MapError::Config(_))
        ));
    }
}
