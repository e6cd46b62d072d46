//! Pure geometry for the packing engine: angle conversion and the
//! two-circle tangent-point solver.

/// A placed circle, reduced to what the solver needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

impl Disk {
    pub fn new(x: f32, y: f32, r: f32) -> Self {
        Self { x, y, r }
    }
}

pub fn degree_to_radian(degree: f32) -> f32 {
    std::f32::consts::PI / 180.0 * degree
}

/// Round to two decimals. Emitted coordinates go through this so that
/// float jitter cannot flip the caller's overlap comparisons.
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Points simultaneously at distance `a.r + target_r` from `a` and
/// `b.r + target_r` from `b`, i.e. the intersection of the two offset
/// circles. These are the candidate centers for a new circle of radius
/// `target_r` touching both anchors.
///
/// Returns `None` when the offset circles do not intersect (the new
/// circle cannot touch both anchors at this radius).
pub fn tangent_points(a: Disk, b: Disk, target_r: f32) -> Option<((f32, f32), (f32, f32))> {
    let r1 = a.r + target_r;
    let r2 = b.r + target_r;

    if a.y == b.y {
        // Horizontally aligned anchors: the candidates mirror about the
        // center line. Exact only when both effective radii match; kept
        // as in the original formulation.
        let anchor = if a.x <= b.x { a } else { b };
        let rr = anchor.r + target_r;
        let span = rr * rr - anchor.r * anchor.r;
        if span < 0.0 {
            return None;
        }
        let dy = span.sqrt();
        let x = round2(anchor.x + anchor.r);
        return Some((
            (x, round2(anchor.y - dy)),
            (x, round2(anchor.y + dy)),
        ));
    }

    // Radical line y = ta*x + tb of the two offset circles, substituted
    // into the first circle equation to get a quadratic in x.
    let ta = (b.x - a.x) / (a.y - b.y);
    let tb = (a.x * a.x - b.x * b.x + a.y * a.y - b.y * b.y - r1 * r1 + r2 * r2)
        / (2.0 * (a.y - b.y));
    let tc = tb - a.y;

    let qa = 1.0 + ta * ta;
    let qb = -2.0 * a.x + 2.0 * ta * tc;
    let qc = a.x * a.x + tc * tc - r1 * r1;

    let disc = qb * qb - 4.0 * qa * qc;
    if disc < 0.0 {
        return None;
    }

    let root = disc.sqrt();
    let x1 = (-qb + root) / (2.0 * qa);
    let x2 = (-qb - root) / (2.0 * qa);
    Some((
        (round2(x1), round2(ta * x1 + tb)),
        (round2(x2), round2(ta * x2 + tb)),
    ))
}
