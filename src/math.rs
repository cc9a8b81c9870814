use glam::Vec2;

use crate::consts::POINT_IN_POLYGON_EPSILON;

/// Wraps an angle in degrees into `(-180, 180]`
#[must_use]
pub fn normalize_angle_deg(angle: f32) -> f32 {
    // In-range values are returned untouched so the result is stable under reapplication
    if angle > -180.0 && angle <= 180.0 {
        return angle;
    }

    // rem_euclid can round up to exactly 360 for tiny negative inputs
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Direction of `v` in degrees, measured from +X towards +Y
#[must_use]
#[inline]
pub fn heading_deg(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

/// Unit vector pointing along `heading` (degrees)
#[must_use]
#[inline]
pub fn dir_from_heading(heading: f32) -> Vec2 {
    Vec2::from_angle(heading.to_radians())
}

/// Ray-casting parity test
///
/// A horizontal ray is cast from `point` towards +X and the polygon edges it
/// crosses are counted. Edges with both ends on the same side of the ray
/// (including horizontal edges) never count.
///
/// # Arguments
///
/// * `point` - The point to test
/// * `polygon` - Closed polygon; the last vertex connects back to the first
#[must_use]
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let Some(&last) = polygon.last() else {
        return false;
    };

    let mut inside = false;
    let mut prev = last;
    for &cur in polygon {
        if (cur.y > point.y) != (prev.y > point.y) {
            let cross_x = (prev.x - cur.x) * (point.y - cur.y)
                / (prev.y - cur.y + POINT_IN_POLYGON_EPSILON)
                + cur.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        prev = cur;
    }

    inside
}

/// Closest point to `p` on the segment `a`-`b`, and the clamped projection factor
///
/// A zero-length segment returns `a` with a factor of 0.
#[must_use]
pub fn project_onto_segment(p: Vec2, a: Vec2, b: Vec2) -> (Vec2, f32) {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return (a, 0.0);
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t, t)
}

#[must_use]
#[inline]
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    p.distance(project_onto_segment(p, a, b).0)
}
