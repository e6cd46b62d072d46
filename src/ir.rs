use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One weighted input item. Fields beyond `label` and `value` are kept
/// in `extra` and carried through to the output circle untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub label: String,
    /// Item weight; must be >= 0.
    pub value: f32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new(label: impl Into<String>, value: f32) -> Self {
        Self {
            label: label.into(),
            value,
            extra: Map::new(),
        }
    }
}

/// Parse a JSON array of items, e.g. `[{"label":"A","value":100}]`.
pub fn parse_items(input: &str) -> Result<Vec<Item>> {
    let items: Vec<Item> = serde_json::from_str(input)?;
    Ok(items)
}
