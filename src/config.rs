use std::{fs, path::Path};

use serde::Deserialize;

use crate::{Result, flow::consts::MAX_BRANCHES};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// maximum number of branches a decision node may own, defaults to 3
    pub max_branches: usize,
    /// ignore a connection identical to an existing edge, defaults to true
    pub dedupe_connections: bool,
    /// where sidebar-added nodes land relative to the viewport
    pub placement: PlacementConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// horizontal offset from the viewport origin, in flow units
    pub offset_x: f64,
    /// vertical offset from the viewport origin, in flow units
    pub offset_y: f64,
    /// extra vertical offset per node already on the canvas
    pub stagger_y: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_branches: MAX_BRANCHES,
            dedupe_connections: true,
            placement: PlacementConfig::default(),
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            offset_x: 400.0,
            offset_y: 200.0,
            stagger_y: 50.0,
        }
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use crate::{Config, FlowError};

    #[test]
    fn test_config_deserialize() {
        let toml_str = r#"
        max_branches = 5
        dedupe_connections = false

        [placement]
        offset_x = 120.0
        stagger_y = 10.0
        "#;
        let config = Config::load_from_str(toml_str).unwrap();
        assert_eq!(config.max_branches, 5);
        assert!(!config.dedupe_connections);
        assert_eq!(config.placement.offset_x, 120.0);
        assert_eq!(config.placement.offset_y, 200.0);
        assert_eq!(config.placement.stagger_y, 10.0);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::load_from_str("").unwrap();
        assert_eq!(config.max_branches, 3);
        assert!(config.dedupe_connections);
        assert_eq!(config.placement.offset_x, 400.0);
    }

    #[test]
    fn test_config_invalid() {
        let err = Config::load_from_str("max_branches = \"three\"").unwrap_err();
        assert!(matches!(err, FlowError::Config(_)));
    }

    #[test]
    fn test_config_missing_file() {
        let err = Config::create("/nonexistent/flowcanvas.toml").unwrap_err();
        assert!(matches!(err, FlowError::IoError(_)));
    }
}
