use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-channel bounds for the random circle colors. The defaults cover a
/// mid-range band so fills come out neither washed-out nor near-black.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColorBounds {
    pub min_r: u8,
    pub max_r: u8,
    pub min_g: u8,
    pub max_g: u8,
    pub min_b: u8,
    pub max_b: u8,
}

impl Default for ColorBounds {
    fn default() -> Self {
        Self {
            min_r: 50,
            max_r: 200,
            min_g: 50,
            max_g: 200,
            min_b: 50,
            max_b: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Canvas width; the first circle sits at (width/2, height/2).
    pub width: f32,
    pub height: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Clearance enforced between touching circles.
    pub gap: f32,
    pub color: ColorBounds,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            min_radius: 10.0,
            max_radius: 50.0,
            gap: 2.0,
            color: ColorBounds::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            background: "#EEEEEE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariablesFile {
    font_family: Option<String>,
    font_size: Option<f32>,
    label_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    min_radius: Option<f32>,
    max_radius: Option<f32>,
    gap: Option<f32>,
    min_r: Option<u8>,
    max_r: Option<u8>,
    min_g: Option<u8>,
    max_g: Option<u8>,
    min_b: Option<u8>,
    max_b: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariablesFile>,
    layout: Option<LayoutConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "default" || theme_name == "chart" {
            config.theme = Theme::chart_default();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.width {
            config.layout.width = v;
        }
        if let Some(v) = layout.height {
            config.layout.height = v;
        }
        if let Some(v) = layout.min_radius {
            config.layout.min_radius = v;
        }
        if let Some(v) = layout.max_radius {
            config.layout.max_radius = v;
        }
        if let Some(v) = layout.gap {
            config.layout.gap = v;
        }
        if let Some(v) = layout.min_r {
            config.layout.color.min_r = v;
        }
        if let Some(v) = layout.max_r {
            config.layout.color.max_r = v;
        }
        if let Some(v) = layout.min_g {
            config.layout.color.min_g = v;
        }
        if let Some(v) = layout.max_g {
            config.layout.color.max_g = v;
        }
        if let Some(v) = layout.min_b {
            config.layout.color.min_b = v;
        }
        if let Some(v) = layout.max_b {
            config.layout.color.max_b = v;
        }
    }

    config.render.width = config.layout.width;
    config.render.height = config.layout.height;
    config.render.background = config.theme.background.clone();

    Ok(config)
}
