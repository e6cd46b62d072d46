use crate::layout::Layout;
use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serializable snapshot of a computed layout, for tooling and tests.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub unplaced: usize,
    pub circles: Vec<CircleDump>,
}

#[derive(Debug, Serialize)]
pub struct CircleDump {
    pub label: String,
    pub value: f32,
    pub r: f32,
    pub color: String,
    pub x: f32,
    pub y: f32,
    /// False for circles left at the canvas-center placeholder.
    pub placed: bool,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let placed_count = layout.circles.len() - layout.unplaced;
        let circles = layout
            .circles
            .iter()
            .enumerate()
            .map(|(idx, circle)| CircleDump {
                label: circle.label.clone(),
                value: circle.value,
                r: circle.r,
                color: circle.color.clone(),
                x: circle.x,
                y: circle.y,
                placed: idx < placed_count,
            })
            .collect();
        Self {
            width: layout.width,
            height: layout.height,
            unplaced: layout.unplaced,
            circles,
        }
    }

    pub fn write_json(&self, output: Option<&Path>) -> Result<()> {
        match output {
            Some(path) => {
                let file = File::create(path)?;
                let mut writer = BufWriter::new(file);
                serde_json::to_writer_pretty(&mut writer, self)?;
                writer.flush()?;
            }
            None => {
                let json = serde_json::to_string_pretty(self)?;
                println!("{json}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::Item;
    use crate::layout::compute_layout;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn dump_marks_every_circle_placed_on_success() {
        let items = vec![Item::new("a", 10.0), Item::new("b", 5.0)];
        let mut rng = StdRng::seed_from_u64(4);
        let layout = compute_layout(&items, &LayoutConfig::default(), &mut rng).unwrap();
        let dump = LayoutDump::from_layout(&layout);
        assert_eq!(dump.circles.len(), 2);
        assert!(dump.circles.iter().all(|c| c.placed));
        assert_eq!(dump.unplaced, 0);

        let json = serde_json::to_string(&dump).unwrap();
        assert!(json.contains("\"label\":\"a\""));
    }
}
