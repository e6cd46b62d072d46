//! Circle-packing placement engine.
//!
//! Items are sorted by descending value, mapped to radii and colors, and
//! placed one by one: the first circle at the canvas center, the second
//! at a random angle next to it, and every later circle at a point
//! tangent to two already-placed anchors, backtracking through the
//! anchor chain when both tangent candidates collide with something.

use std::cmp::Ordering;

use rand::Rng;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::LayoutConfig;
use crate::geometry::{Disk, degree_to_radian, round2, tangent_points};
use crate::ir::Item;
use crate::scale::{RadiusScale, random_color};

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("minRadius ({min}) must be less than maxRadius ({max})")]
    InvalidRadiusRange { min: f32, max: f32 },
    #[error("item '{label}' has negative value {value}; values must be >= 0")]
    NegativeValue { label: String, value: f32 },
}

/// One positioned circle. Carries the source item's label, value and
/// passthrough fields alongside the derived radius, color and center.
#[derive(Debug, Clone, Serialize)]
pub struct CircleLayout {
    pub label: String,
    pub value: f32,
    pub r: f32,
    pub color: String,
    pub x: f32,
    pub y: f32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CircleLayout {
    fn disk(&self) -> Disk {
        Disk::new(self.x, self.y, self.r)
    }
}

/// A computed layout. `circles` is ordered by descending value; when
/// `unplaced > 0` the trailing `unplaced` circles could not be placed
/// without overlap and still sit at the canvas-center placeholder.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub circles: Vec<CircleLayout>,
    pub width: f32,
    pub height: f32,
    pub unplaced: usize,
}

impl Layout {
    /// Circles that received a real position (a prefix of `circles`).
    pub fn placed(&self) -> &[CircleLayout] {
        &self.circles[..self.circles.len() - self.unplaced]
    }
}

/// Compute the bubble layout for `items`.
///
/// Pure given its inputs: the same items, config and RNG stream always
/// produce the same layout. Equal values keep their input order (stable
/// sort). Non-positive canvas dimensions are clamped to 1 so the origin
/// placeholder stays finite. Runs an O(n²) overlap scan in the worst
/// case, which dominates for item counts in the hundreds.
pub fn compute_layout(
    items: &[Item],
    config: &LayoutConfig,
    rng: &mut impl Rng,
) -> Result<Layout, LayoutError> {
    let width = config.width.max(1.0);
    let height = config.height.max(1.0);

    if items.is_empty() {
        return Ok(Layout {
            circles: Vec::new(),
            width,
            height,
            unplaced: 0,
        });
    }

    if config.min_radius >= config.max_radius {
        return Err(LayoutError::InvalidRadiusRange {
            min: config.min_radius,
            max: config.max_radius,
        });
    }
    if let Some(item) = items.iter().find(|item| item.value < 0.0) {
        return Err(LayoutError::NegativeValue {
            label: item.label.clone(),
            value: item.value,
        });
    }

    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));

    let scale = RadiusScale::new(sorted[0].value, config.min_radius, config.max_radius);
    let mut circles: Vec<CircleLayout> = sorted
        .iter()
        .map(|item| CircleLayout {
            label: item.label.clone(),
            value: item.value,
            r: scale.map(item.value),
            color: random_color(&config.color, rng),
            x: width / 2.0,
            y: height / 2.0,
            extra: item.extra.clone(),
        })
        .collect();

    if circles.len() >= 2 {
        let offset = circles[0].r + circles[1].r + config.gap;
        let theta = degree_to_radian(rng.gen_range(0.0..360.0));
        // Screen coordinates: y grows downward, so the angle is mirrored.
        circles[1].x = round2(circles[1].x + offset * theta.cos());
        circles[1].y = round2(circles[1].y - offset * theta.sin());
    }

    let unplaced = place_chain(&mut circles, config.gap);

    Ok(Layout {
        circles,
        width,
        height,
        unplaced,
    })
}

/// Place `circles[2..]` assuming the first two already have positions.
/// Returns how many trailing circles could not be placed.
///
/// Anchors for slot `i` are `circles[ci]` and `circles[i-1]`. A tangent
/// candidate is accepted only if it clears every placed circle; when
/// both candidates fail (or the anchors admit no tangent point at all)
/// the chain pointer advances and the slot is retried. Running out of
/// anchors ends placement: the remaining circles keep the placeholder.
fn place_chain(circles: &mut [CircleLayout], gap: f32) -> usize {
    let n = circles.len();
    let mut ci = 0usize;
    let mut i = 2usize;

    while i < n {
        let candidates = tangent_points(
            circles[ci].disk(),
            circles[i - 1].disk(),
            circles[i].r + gap,
        );
        let accepted = candidates.and_then(|(p1, p2)| {
            if clears_all(circles, i, p1) {
                Some(p1)
            } else if clears_all(circles, i, p2) {
                Some(p2)
            } else {
                None
            }
        });

        match accepted {
            Some((x, y)) => {
                circles[i].x = x;
                circles[i].y = y;
                i += 1;
            }
            None => {
                ci += 1;
                if ci + 2 > i {
                    return n - i;
                }
            }
        }
    }
    0
}

/// True if a circle of `circles[i].r` centered at `point` overlaps no
/// circle placed before slot `i`.
fn clears_all(circles: &[CircleLayout], i: usize, point: (f32, f32)) -> bool {
    let r = circles[i].r;
    for placed in circles[..i].iter().rev() {
        let dx = point.0 - placed.x;
        let dy = point.1 - placed.y;
        let min_dist = r + placed.r;
        if dx * dx + dy * dy < min_dist * min_dist {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn circle(x: f32, y: f32, r: f32) -> CircleLayout {
        CircleLayout {
            label: String::new(),
            value: 0.0,
            r,
            color: "#000000".to_string(),
            x,
            y,
            extra: Map::new(),
        }
    }

    #[test]
    fn chain_places_third_circle_touching_both_anchors() {
        let mut circles = vec![
            circle(400.0, 300.0, 50.0),
            circle(470.0, 280.0, 20.0),
            circle(400.0, 300.0, 10.0),
        ];
        let unplaced = place_chain(&mut circles, 2.0);
        assert_eq!(unplaced, 0);
        let d0 = ((circles[2].x - 400.0).powi(2) + (circles[2].y - 300.0).powi(2)).sqrt();
        assert!((d0 - 62.0).abs() < 0.05, "distance to first anchor: {d0}");
        let d1 = ((circles[2].x - 470.0).powi(2) + (circles[2].y - 280.0).powi(2)).sqrt();
        assert!((d1 - 32.0).abs() < 0.05, "distance to second anchor: {d1}");
    }

    #[test]
    fn chain_exhaustion_reports_unplaced_count() {
        // Anchors placed far apart by hand: no tangent point exists for
        // either anchor pair, so the chain pointer runs out immediately.
        let mut circles = vec![
            circle(0.0, 0.0, 10.0),
            circle(1000.0, 3.0, 10.0),
            circle(0.0, 0.0, 5.0),
            circle(0.0, 0.0, 5.0),
        ];
        let unplaced = place_chain(&mut circles, 2.0);
        assert_eq!(unplaced, 2);
        // Unplaced circles keep whatever placeholder they carried in.
        assert_eq!(circles[2].x, 0.0);
        assert_eq!(circles[3].x, 0.0);
    }

    #[test]
    fn sorts_descending_and_keeps_input_order_on_ties() {
        let items = vec![
            Item::new("small", 10.0),
            Item::new("tie-a", 40.0),
            Item::new("big", 90.0),
            Item::new("tie-b", 40.0),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let layout = compute_layout(&items, &LayoutConfig::default(), &mut rng).unwrap();
        let labels: Vec<&str> = layout.circles.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["big", "tie-a", "tie-b", "small"]);
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let items = vec![Item::new("a", 1.0)];
        let config = LayoutConfig {
            min_radius: 50.0,
            max_radius: 10.0,
            ..LayoutConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let err = compute_layout(&items, &config, &mut rng).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidRadiusRange {
                min: 50.0,
                max: 10.0
            }
        );
    }

    #[test]
    fn rejects_negative_values_before_placing_anything() {
        let items = vec![Item::new("ok", 5.0), Item::new("bad", -1.0)];
        let mut rng = StdRng::seed_from_u64(0);
        let err = compute_layout(&items, &LayoutConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(err, LayoutError::NegativeValue { ref label, .. } if label == "bad"));
    }

    #[test]
    fn all_zero_values_map_to_min_radius() {
        let items = vec![Item::new("a", 0.0), Item::new("b", 0.0), Item::new("c", 0.0)];
        let config = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let layout = compute_layout(&items, &config, &mut rng).unwrap();
        for circle in &layout.circles {
            assert_eq!(circle.r, config.min_radius);
        }
    }

    #[test]
    fn nonpositive_canvas_is_clamped_to_unit_size() {
        let items = vec![Item::new("a", 1.0)];
        let config = LayoutConfig {
            width: 0.0,
            height: -5.0,
            ..LayoutConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let layout = compute_layout(&items, &config, &mut rng).unwrap();
        assert_eq!(layout.width, 1.0);
        assert_eq!(layout.height, 1.0);
        assert_eq!(layout.circles[0].x, 0.5);
        assert_eq!(layout.circles[0].y, 0.5);
    }

    #[test]
    fn placed_slice_excludes_unplaced_tail() {
        let layout = Layout {
            circles: vec![circle(0.0, 0.0, 1.0), circle(5.0, 0.0, 1.0)],
            width: 10.0,
            height: 10.0,
            unplaced: 1,
        };
        assert_eq!(layout.placed().len(), 1);
    }
}
