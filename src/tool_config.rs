use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::drawing::{BLACK, Color, Style, Tool};
use crate::factory::default_size;

/// Current style for every tool. Element creation only reads from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    styles: HashMap<Tool, Style>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        let styles = Tool::ALL
            .iter()
            .map(|&tool| {
                (
                    tool,
                    Style {
                        stroke: BLACK,
                        fill: None,
                        size: Some(default_size(tool)),
                    },
                )
            })
            .collect();
        Self { styles }
    }
}

impl ToolConfig {
    pub fn style(&self, tool: Tool) -> Style {
        self.styles.get(&tool).copied().unwrap_or(Style {
            stroke: BLACK,
            fill: None,
            size: Some(default_size(tool)),
        })
    }

    fn entry(&mut self, tool: Tool) -> &mut Style {
        let fallback = self.style(tool);
        self.styles.entry(tool).or_insert(fallback)
    }

    pub fn set_stroke(&mut self, tool: Tool, color: Color) {
        self.entry(tool).stroke = color;
        log::debug!("{} stroke set to {:?}", tool, color);
    }

    pub fn set_fill(&mut self, tool: Tool, fill: Option<Color>) {
        self.entry(tool).fill = fill;
        log::debug!("{} fill set to {:?}", tool, fill);
    }

    pub fn set_size(&mut self, tool: Tool, size: f32) {
        self.entry(tool).size = Some(size);
        log::debug!("{} size set to {}", tool, size);
    }
}
