use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults applied to scene labels that leave the scale window or padding
/// unset. The window is a placement-scale range; zoom-equivalents are its
/// `log2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub default_min_placement_scale: f32,
    pub default_max_placement_scale: f32,
    pub default_padding: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_min_placement_scale: 1.0,
            // Three zoom levels of headroom above the tile's own zoom.
            default_max_placement_scale: 8.0,
            default_padding: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
}

// Partial-override file shape: absent fields keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    engine: Option<EngineConfigFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EngineConfigFile {
    default_min_placement_scale: Option<f32>,
    default_max_placement_scale: Option<f32>,
    default_padding: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(engine) = parsed.engine {
        if let Some(v) = engine.default_min_placement_scale {
            config.engine.default_min_placement_scale = v;
        }
        if let Some(v) = engine.default_max_placement_scale {
            config.engine.default_max_placement_scale = v;
        }
        if let Some(v) = engine.default_padding {
            config.engine.default_padding = v;
        }
    }

    Ok(config)
}
