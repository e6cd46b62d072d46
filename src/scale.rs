//! Value-to-radius and random-color mapping.

use rand::Rng;

use crate::config::ColorBounds;

/// Affine value→radius map. Built once per layout from the largest item
/// value; larger values always map to larger (or equal) radii.
#[derive(Debug, Clone, Copy)]
pub struct RadiusScale {
    slope: f32,
    min_radius: f32,
}

impl RadiusScale {
    /// `max_value == 0` (every item weightless) degenerates to a flat
    /// map onto `min_radius` instead of dividing by zero.
    pub fn new(max_value: f32, min_radius: f32, max_radius: f32) -> Self {
        let slope = if max_value > 0.0 {
            (max_radius - min_radius) / max_value
        } else {
            0.0
        };
        Self { slope, min_radius }
    }

    pub fn map(&self, value: f32) -> f32 {
        self.slope * value + self.min_radius
    }
}

/// Draw a `#rrggbb` color with each channel uniform in `[min, max)`.
pub fn random_color(bounds: &ColorBounds, rng: &mut impl Rng) -> String {
    let red = random_channel(bounds.min_r, bounds.max_r, rng);
    let green = random_channel(bounds.min_g, bounds.max_g, rng);
    let blue = random_channel(bounds.min_b, bounds.max_b, rng);
    format!("#{red:02x}{green:02x}{blue:02x}")
}

fn random_channel(min: u8, max: u8, rng: &mut impl Rng) -> u8 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..max)
}
