//! Arc approximation by straight chords.

use super::Point3;
use std::f64::consts::PI;

/// Number of chords used for a full circle.
pub const ARC_CHORDS: usize = 32;

/// Points approximating a counter-clockwise arc in the XY plane.
///
/// Angles are in degrees. The sweep runs from `angle_start` to `angle_end`
/// counter-clockwise, wrapped into `[0, 360)`. An empty sweep yields no
/// points; otherwise both end points are included and the sweep is split
/// proportionally to [`ARC_CHORDS`] per full turn. All points share
/// `center.z`.
pub fn arc_points(center: &Point3, radius: f64, angle_start: f64, angle_end: f64) -> Vec<Point3> {
    let a1 = angle_start.to_radians();
    let a2 = angle_end.to_radians();
    let mut sweep = a2 - a1;
    if sweep < 0.0 {
        sweep += 2.0 * PI;
    }
    if sweep >= 2.0 * PI {
        sweep -= 2.0 * PI;
    }
    if sweep.abs() < f64::EPSILON {
        return Vec::new();
    }

    // guard against rounding pushing an exact chord count up by one
    let chords = (sweep / (2.0 * PI)) * ARC_CHORDS as f64 - 1e-9;
    let segments = chords.ceil().max(1.0) as usize;
    let step = sweep / segments as f64;
    (0..=segments)
        .map(|i| {
            let angle = a1 + step * i as f64;
            Point3::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
                center.z,
            )
        })
        .collect()
}

/// Polar angle of `point` around `center` in degrees, in `[0, 360)`.
pub fn polar_angle(center: &Point3, point: &Point3) -> f64 {
    let angle = (point.y - center.y).atan2(point.x - center.x).to_degrees();
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}
