use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::drawing::{Color, WHITE};
use crate::hit_test::ERASE_TOLERANCE;
use crate::rough::RoughOptions;
use crate::tool_config::ToolConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub erase_tolerance: f32,
    pub roughness: f32,
    pub bowing: f32,
    pub font_path: Option<PathBuf>,
    pub tools: ToolConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            background: WHITE,
            erase_tolerance: ERASE_TOLERANCE,
            roughness: 1.0,
            bowing: 1.0,
            font_path: None,
            tools: ToolConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!(
            "loaded config {} ({}x{})",
            path.display(),
            config.width,
            config.height
        );
        Ok(config)
    }

    pub fn rough_options(&self) -> RoughOptions {
        RoughOptions {
            roughness: self.roughness,
            bowing: self.bowing,
            ..RoughOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::Tool;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"width": 640, "roughness": 0.5}"#).unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 720);
        assert_eq!(config.erase_tolerance, 1.0);
        assert_eq!(config.rough_options().roughness, 0.5);
        assert_eq!(config.tools.style(Tool::Brush).size, Some(8.0));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
