use glam::Vec2;
use log::info;

use super::{Aabb, RoadPolygon, TrackConfig, ViewportTransform, build_centerline, build_road_polygon, fit_to_viewport};
use crate::{
    error::{ConfigError, ConfigResult},
    math::{self, heading_deg},
};

/// Where a point lands on the centerline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentProjection {
    /// Index of the segment, which runs from sample `index` to `index + 1`
    pub index: usize,
    /// Closest point on the segment
    pub point: Vec2,
    /// Position of `point` along the segment, from 0 to 1
    pub t: f32,
    pub distance: f32,
}

/// A built track: centerline, road polygon and the lookups run against them every tick.
///
/// Every nearest-something search is a linear scan in index order, and ties
/// go to the lowest index.
#[derive(Clone, Debug)]
pub struct Track {
    centerline: Vec<Vec2>,
    road: RoadPolygon,
    bounds: Aabb,
    /// Arc length from the first sample to each sample
    arc_lengths: Vec<f32>,
    transform: ViewportTransform,
    closed: bool,
    road_width: f32,
}

impl Track {
    pub fn new(waypoints: &[Vec2], config: &TrackConfig) -> ConfigResult<Self> {
        config.validate()?;

        if waypoints.len() < 2 {
            return Err(ConfigError::TooFewWaypoints(waypoints.len()));
        }

        let mut waypoints = waypoints.to_vec();
        if config.closed && waypoints.first() != waypoints.last() {
            waypoints.push(waypoints[0]);
        }

        let transform = config.viewport.map_or(ViewportTransform::IDENTITY, |viewport| {
            fit_to_viewport(&waypoints, viewport.width, viewport.height, viewport.margin)
        });
        let waypoints = transform.apply_all(&waypoints);

        let centerline = build_centerline(&waypoints, config.samples_per_segment)?;
        let road = build_road_polygon(&centerline, config.road_width)?;

        // Polygon is non-empty since the centerline has at least 2 points
        let bounds = Aabb::from_points(&road.polygon).unwrap_or_default();

        let mut arc_lengths = Vec::with_capacity(centerline.len());
        let mut total = 0.0;
        arc_lengths.push(total);
        for seg in centerline.windows(2) {
            total += seg[0].distance(seg[1]);
            arc_lengths.push(total);
        }

        info!(
            "Built {} track: {} waypoints, {} centerline samples, {:.1} units long",
            if config.closed { "closed" } else { "open" },
            waypoints.len(),
            centerline.len(),
            total
        );

        Ok(Self {
            centerline,
            road,
            bounds,
            arc_lengths,
            transform,
            closed: config.closed,
            road_width: config.road_width,
        })
    }

    #[inline]
    pub fn centerline(&self) -> &[Vec2] {
        &self.centerline
    }

    /// Closed drivable-area polygon, for collision tests and rendering
    #[inline]
    pub fn polygon(&self) -> &[Vec2] {
        &self.road.polygon
    }

    #[inline]
    pub fn left_edge(&self) -> &[Vec2] {
        &self.road.left
    }

    #[inline]
    pub fn right_edge(&self) -> &[Vec2] {
        &self.road.right
    }

    #[inline]
    pub const fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Transform applied to the raw waypoints (identity without a viewport)
    #[inline]
    pub const fn transform(&self) -> ViewportTransform {
        self.transform
    }

    #[inline]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub const fn road_width(&self) -> f32 {
        self.road_width
    }

    #[inline]
    pub fn num_segments(&self) -> usize {
        self.centerline.len() - 1
    }

    /// Total centerline length
    #[inline]
    pub fn length(&self) -> f32 {
        self.arc_lengths[self.arc_lengths.len() - 1]
    }

    /// The point the finish is measured against: the last centerline sample
    #[inline]
    pub fn goal(&self) -> Vec2 {
        self.centerline[self.centerline.len() - 1]
    }

    /// Whether `p` is on the road
    pub fn contains(&self, p: Vec2) -> bool {
        self.bounds.contains(p) && math::point_in_polygon(p, &self.road.polygon)
    }

    /// Direction of segment `index` in degrees
    ///
    /// A zero-length segment reports 0 (pointing along +X).
    #[must_use]
    pub fn segment_heading(&self, index: usize) -> f32 {
        let dir = self.centerline[index + 1] - self.centerline[index];
        heading_deg(dir.normalize_or(Vec2::X))
    }

    /// Segment whose midpoint is closest to `p`
    #[must_use]
    pub fn nearest_segment_by_midpoint(&self, p: Vec2) -> usize {
        let mut best = (0, f32::INFINITY);
        for (i, seg) in self.centerline.windows(2).enumerate() {
            let dist_sq = p.distance_squared((seg[0] + seg[1]) * 0.5);
            if dist_sq < best.1 {
                best = (i, dist_sq);
            }
        }

        best.0
    }

    /// Segment closest to `p` by clamped perpendicular projection
    #[must_use]
    pub fn nearest_segment(&self, p: Vec2) -> SegmentProjection {
        let mut best = SegmentProjection {
            index: 0,
            point: self.centerline[0],
            t: 0.0,
            distance: f32::INFINITY,
        };

        for (index, seg) in self.centerline.windows(2).enumerate() {
            let (point, t) = math::project_onto_segment(p, seg[0], seg[1]);
            let distance = p.distance(point);
            if distance < best.distance {
                best = SegmentProjection {
                    index,
                    point,
                    t,
                    distance,
                };
            }
        }

        best
    }

    /// Index of the centerline sample closest to `p`
    #[must_use]
    pub fn nearest_sample(&self, p: Vec2) -> usize {
        let mut best = (0, f32::INFINITY);
        for (i, &sample) in self.centerline.iter().enumerate() {
            let dist_sq = p.distance_squared(sample);
            if dist_sq < best.1 {
                best = (i, dist_sq);
            }
        }

        best.0
    }

    /// The sample `ahead` indices past `index`
    ///
    /// Open tracks stop at the last sample. Closed tracks wrap around, skipping
    /// the duplicated seam sample.
    #[must_use]
    pub fn sample_ahead(&self, index: usize, ahead: usize) -> Vec2 {
        let last = self.centerline.len() - 1;
        let target = if self.closed {
            (index + ahead) % last
        } else {
            (index + ahead).min(last)
        };

        self.centerline[target]
    }

    /// Arc length from the start of the centerline to a projection on it
    #[must_use]
    pub fn progress_along(&self, projection: &SegmentProjection) -> f32 {
        let seg_len = self.arc_lengths[projection.index + 1] - self.arc_lengths[projection.index];
        self.arc_lengths[projection.index] + seg_len * projection.t
    }

    /// Remaining centerline distance from `p` to the goal
    #[must_use]
    pub fn distance_to_goal(&self, p: Vec2) -> f32 {
        self.length() - self.progress_along(&self.nearest_segment(p))
    }

    /// Point `distance` along the centerline from its start, clamped to the track
    #[must_use]
    pub fn point_at(&self, distance: f32) -> Vec2 {
        let distance = distance.clamp(0.0, self.length());
        let index = self
            .arc_lengths
            .partition_point(|&arc| arc <= distance)
            .saturating_sub(1)
            .min(self.num_segments() - 1);

        let seg_len = self.arc_lengths[index + 1] - self.arc_lengths[index];
        if seg_len <= 0.0 {
            return self.centerline[index];
        }

        let t = (distance - self.arc_lengths[index]) / seg_len;
        self.centerline[index].lerp(self.centerline[index + 1], t)
    }

    /// Start position and heading, facing along the first segment that has a length.
    ///
    /// Closed tracks start on the first sample. Open tracks start `clearance`
    /// further along the centerline, so a car centered there does not hang
    /// off the start of the road.
    #[must_use]
    pub fn spawn_pose(&self, clearance: f32) -> (Vec2, f32) {
        let start = self.centerline[0];
        let heading = self
            .centerline
            .iter()
            .skip(1)
            .find(|&&p| p != start)
            .map_or(0.0, |&p| heading_deg(p - start));

        let pos = if self.closed {
            start
        } else {
            self.point_at(clearance)
        };

        (pos, heading)
    }
}
