use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub label_color: String,
    pub background: String,
}

impl Theme {
    pub fn chart_default() -> Self {
        Self {
            font_family: "trebuchet ms, verdana, arial, sans-serif".to_string(),
            font_size: 14.0,
            label_color: "#FFFFFF".to_string(),
            background: "#EEEEEE".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            label_color: "#FFFFFF".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::chart_default()
    }
}
