use super::Viewport;
use crate::{
    consts,
    error::{ConfigError, ConfigResult},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackConfig {
    /// Full width of the drivable road, in simulation units
    pub road_width: f32,
    /// Interpolated centerline points per waypoint pair
    ///
    /// NOTE: At sharp turns, a sample spacing below half the road width folds the inner road edge
    pub samples_per_segment: usize,
    /// Treat the waypoints as a loop
    ///
    /// NOTE: The first waypoint is appended to the end if the list does not already close itself
    pub closed: bool,
    /// Fit the waypoints into this area before building anything
    ///
    /// If None, waypoints are used as simulation coordinates directly
    pub viewport: Option<Viewport>,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TrackConfig {
    pub const DEFAULT: Self = Self {
        road_width: consts::track::ROAD_WIDTH,
        samples_per_segment: consts::track::SAMPLES_PER_SEGMENT,
        closed: false,
        viewport: None,
    };

    pub fn validate(&self) -> ConfigResult<()> {
        if self.road_width.is_nan() || self.road_width <= 0.0 {
            return Err(ConfigError::NonPositiveRoadWidth(self.road_width));
        }

        if self.samples_per_segment == 0 {
            return Err(ConfigError::ZeroSampleDensity);
        }

        if let Some(Viewport {
            width,
            height,
            margin,
        }) = self.viewport
        {
            // A zero area would collapse the track, a negative one would mirror it
            let usable = width - 2.0 * margin > 0.0 && height - 2.0 * margin > 0.0;
            if !usable || margin < 0.0 {
                return Err(ConfigError::InvalidViewport {
                    width,
                    height,
                    margin,
                });
            }
        }

        Ok(())
    }
}
