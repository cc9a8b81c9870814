use glam::Vec2;

use super::Aabb;
use crate::error::{ConfigError, ConfigResult};

/// Linearly resamples `waypoints` into a dense centerline.
///
/// Each waypoint pair contributes `samples_per_segment` points starting at the
/// first waypoint of the pair; the final waypoint is appended once at the end.
///
/// # Arguments
///
/// * `waypoints` - Ordered raw track control points, at least 2
/// * `samples_per_segment` - Points emitted per waypoint pair, at least 1
pub fn build_centerline(waypoints: &[Vec2], samples_per_segment: usize) -> ConfigResult<Vec<Vec2>> {
    if waypoints.len() < 2 {
        return Err(ConfigError::TooFewWaypoints(waypoints.len()));
    }

    if samples_per_segment == 0 {
        return Err(ConfigError::ZeroSampleDensity);
    }

    let mut centerline = Vec::with_capacity((waypoints.len() - 1) * samples_per_segment + 1);
    let num_samples = samples_per_segment as f32;

    for pair in waypoints.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        centerline.extend((0..samples_per_segment).map(|i| a.lerp(b, i as f32 / num_samples)));
    }

    centerline.push(waypoints[waypoints.len() - 1]);

    Ok(centerline)
}

/// Target area for [`fit_to_viewport`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Empty border kept on every side
    pub margin: f32,
}

/// A uniform scale followed by a translation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    pub scale: f32,
    pub offset: Vec2,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewportTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Vec2::ZERO,
    };

    #[must_use]
    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        p * self.scale + self.offset
    }

    #[must_use]
    pub fn apply_all(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}

/// Finds the transform that centers the bounding box of `points` in a
/// `width x height` area inset by `margin`, keeping the aspect ratio.
///
/// The scale is the smaller of the two per-axis scales. An axis with zero
/// extent does not constrain the scale; if both do, the scale stays 1.
#[must_use]
pub fn fit_to_viewport(points: &[Vec2], width: f32, height: f32, margin: f32) -> ViewportTransform {
    let Some(bounds) = Aabb::from_points(points) else {
        return ViewportTransform::IDENTITY;
    };

    let extent = bounds.size();
    let avail = Vec2::new(width - 2.0 * margin, height - 2.0 * margin);

    let scale_x = (extent.x > 0.0).then(|| avail.x / extent.x);
    let scale_y = (extent.y > 0.0).then(|| avail.y / extent.y);
    let scale = match (scale_x, scale_y) {
        (Some(sx), Some(sy)) => sx.min(sy),
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => 1.0,
    };

    let viewport_center = Vec2::new(width, height) * 0.5;
    ViewportTransform {
        scale,
        offset: viewport_center - bounds.center() * scale,
    }
}

/// Drivable area around a centerline
#[derive(Clone, Debug, Default)]
pub struct RoadPolygon {
    /// Left edge followed by the right edge reversed
    pub polygon: Vec<Vec2>,
    pub left: Vec<Vec2>,
    pub right: Vec<Vec2>,
}

/// Offsets `centerline` by half of `width` on both sides.
///
/// Each vertex is moved along the average of the left normals of its two
/// neighbouring segments, which keeps the edges from folding over at turns.
/// The endpoints of an open centerline use their single segment's normal; a
/// closed centerline (first point equal to the last) averages across the seam
/// so both ends land on the same offset points.
pub fn build_road_polygon(centerline: &[Vec2], width: f32) -> ConfigResult<RoadPolygon> {
    if centerline.len() < 2 {
        return Err(ConfigError::TooFewWaypoints(centerline.len()));
    }

    if width.is_nan() || width <= 0.0 {
        return Err(ConfigError::NonPositiveRoadWidth(width));
    }

    let segment_normals: Vec<Vec2> = centerline
        .windows(2)
        .map(|seg| (seg[1] - seg[0]).normalize_or(Vec2::X).perp())
        .collect();

    let last_seg = segment_normals.len() - 1;
    let closed = centerline.len() > 2 && centerline[0] == centerline[centerline.len() - 1];

    let vertex_normal = |i: usize| -> Vec2 {
        let (before, after) = match i {
            0 if closed => (segment_normals[last_seg], segment_normals[0]),
            0 => return segment_normals[0],
            _ if i > last_seg && closed => (segment_normals[last_seg], segment_normals[0]),
            _ if i > last_seg => return segment_normals[last_seg],
            _ => (segment_normals[i - 1], segment_normals[i]),
        };

        // Opposite normals (a full reversal) cancel out
        (before + after).try_normalize().unwrap_or(after)
    };

    let half_width = width * 0.5;
    let (left, right): (Vec<Vec2>, Vec<Vec2>) = centerline
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let offset = vertex_normal(i) * half_width;
            (p + offset, p - offset)
        })
        .unzip();

    let mut polygon = Vec::with_capacity(left.len() + right.len());
    polygon.extend_from_slice(&left);
    polygon.extend(right.iter().rev());

    Ok(RoadPolygon {
        polygon,
        left,
        right,
    })
}
