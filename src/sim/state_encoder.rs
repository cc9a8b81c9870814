use super::CarState;
use crate::{
    consts::encoder as encoder_consts,
    math::{heading_deg, normalize_angle_deg},
    track::Track,
};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpeedBin {
    Stopped,
    Slow,
    Fast,
}

/// Which way the car points relative to the track.
///
/// Left means the car is turned further than the track (positive heading side).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingBin {
    HardLeft,
    Left,
    Straight,
    Right,
    HardRight,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LateralBin {
    Center,
    Off,
    Far,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FutureBin {
    Left,
    Straight,
    Right,
}

/// The discrete state the agent learns over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiscreteState {
    pub speed: SpeedBin,
    pub heading: HeadingBin,
    pub lateral: LateralBin,
    pub future: FutureBin,
}

impl DiscreteState {
    /// Bin indices in `(speed, heading, lateral, future)` order
    #[must_use]
    pub const fn as_tuple(self) -> (u8, u8, u8, u8) {
        (
            self.speed as u8,
            self.heading as u8,
            self.lateral as u8,
            self.future as u8,
        )
    }
}

/// Continuous measurements of the car against the track, before binning
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Observation {
    pub speed: f32,
    /// Track direction minus car heading, in `(-180, 180]`
    pub heading_error: f32,
    /// Distance from the car to the closest point of the centerline
    pub lateral_offset: f32,
    /// Heading error against the direction to a point further down the track
    pub future_heading_error: f32,
    /// Centerline distance left to the goal
    pub distance_to_goal: f32,
    /// Centerline distance covered from the start
    pub progress: f32,
}

/// Bin thresholds.
///
/// Every comparison is a strict `<` against the listed bound, except the
/// future-right bin which needs a strict `>`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EncoderConfig {
    pub speed_stopped: f32,
    pub speed_slow: f32,
    /// Beyond this heading error (either sign) the bin is "hard"
    pub heading_hard: f32,
    /// Within this heading error (either sign) the bin is straight
    pub heading_soft: f32,
    pub lateral_center: f32,
    pub lateral_off: f32,
    pub future_heading: f32,
    /// How many centerline samples ahead the lookahead point is
    pub lookahead: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl EncoderConfig {
    pub const DEFAULT: Self = Self {
        speed_stopped: encoder_consts::SPEED_STOPPED,
        speed_slow: encoder_consts::SPEED_SLOW,
        heading_hard: encoder_consts::HEADING_HARD,
        heading_soft: encoder_consts::HEADING_SOFT,
        lateral_center: encoder_consts::LATERAL_CENTER,
        lateral_off: encoder_consts::LATERAL_OFF,
        future_heading: encoder_consts::FUTURE_HEADING,
        lookahead: encoder_consts::LOOKAHEAD_SAMPLES,
    };
}

/// Turns car/track measurements into a [`DiscreteState`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StateEncoder {
    pub config: EncoderConfig,
}

impl StateEncoder {
    #[must_use]
    pub const fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn speed_bin(&self, speed: f32) -> SpeedBin {
        let speed = speed.abs();
        if speed < self.config.speed_stopped {
            SpeedBin::Stopped
        } else if speed < self.config.speed_slow {
            SpeedBin::Slow
        } else {
            SpeedBin::Fast
        }
    }

    #[must_use]
    pub fn heading_bin(&self, heading_error: f32) -> HeadingBin {
        let err = normalize_angle_deg(heading_error);
        if err < -self.config.heading_hard {
            HeadingBin::HardLeft
        } else if err < -self.config.heading_soft {
            HeadingBin::Left
        } else if err < self.config.heading_soft {
            HeadingBin::Straight
        } else if err < self.config.heading_hard {
            HeadingBin::Right
        } else {
            HeadingBin::HardRight
        }
    }

    #[must_use]
    pub fn lateral_bin(&self, lateral_offset: f32) -> LateralBin {
        if lateral_offset < self.config.lateral_center {
            LateralBin::Center
        } else if lateral_offset < self.config.lateral_off {
            LateralBin::Off
        } else {
            LateralBin::Far
        }
    }

    #[must_use]
    pub fn future_bin(&self, future_heading_error: f32) -> FutureBin {
        let err = normalize_angle_deg(future_heading_error);
        if err < -self.config.future_heading {
            FutureBin::Left
        } else if err > self.config.future_heading {
            FutureBin::Right
        } else {
            FutureBin::Straight
        }
    }

    #[must_use]
    pub fn discretize(&self, obs: &Observation) -> DiscreteState {
        DiscreteState {
            speed: self.speed_bin(obs.speed),
            heading: self.heading_bin(obs.heading_error),
            lateral: self.lateral_bin(obs.lateral_offset),
            future: self.future_bin(obs.future_heading_error),
        }
    }

    /// Measures `car` against `track`
    #[must_use]
    pub fn observe(&self, car: &CarState, track: &Track) -> Observation {
        let segment = track.nearest_segment_by_midpoint(car.pos);
        let heading_error = normalize_angle_deg(track.segment_heading(segment) - car.heading);

        let projection = track.nearest_segment(car.pos);
        let progress = track.progress_along(&projection);

        let sample = track.nearest_sample(car.pos);
        let from = track.centerline()[sample];
        let to = track.sample_ahead(sample, self.config.lookahead);
        let future_heading_error = match (to - from).try_normalize() {
            Some(dir) => normalize_angle_deg(heading_deg(dir) - car.heading),
            None => 0.0,
        };

        Observation {
            speed: car.speed,
            heading_error,
            lateral_offset: projection.distance,
            future_heading_error,
            distance_to_goal: track.length() - progress,
            progress,
        }
    }

    #[must_use]
    pub fn encode(&self, car: &CarState, track: &Track) -> (DiscreteState, Observation) {
        let obs = self.observe(car, track);
        (self.discretize(&obs), obs)
    }
}

/// Standalone binning with the default thresholds
#[must_use]
pub fn discretize_state(
    speed: f32,
    heading_error: f32,
    lateral_offset: f32,
    future_heading_error: f32,
) -> DiscreteState {
    StateEncoder::default().discretize(&Observation {
        speed,
        heading_error,
        lateral_offset,
        future_heading_error,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::TrackConfig;
    use glam::Vec2;

    #[test]
    fn speed_boundaries_are_strict() {
        let enc = StateEncoder::default();
        assert_eq!(enc.speed_bin(0.0), SpeedBin::Stopped);
        assert_eq!(enc.speed_bin(0.49), SpeedBin::Stopped);
        assert_eq!(enc.speed_bin(0.5), SpeedBin::Slow);
        assert_eq!(enc.speed_bin(-0.5), SpeedBin::Slow);
        assert_eq!(enc.speed_bin(2.5), SpeedBin::Fast);
        assert_eq!(enc.speed_bin(-2.5), SpeedBin::Fast);
    }

    #[test]
    fn heading_boundaries_are_strict() {
        let enc = StateEncoder::default();
        assert_eq!(enc.heading_bin(-21.0), HeadingBin::HardLeft);
        assert_eq!(enc.heading_bin(-20.0), HeadingBin::Left);
        assert_eq!(enc.heading_bin(-5.0), HeadingBin::Straight);
        assert_eq!(enc.heading_bin(4.9), HeadingBin::Straight);
        assert_eq!(enc.heading_bin(5.0), HeadingBin::Right);
        assert_eq!(enc.heading_bin(20.0), HeadingBin::HardRight);
        assert_eq!(enc.heading_bin(180.0), HeadingBin::HardRight);
        // Wrapped before binning
        assert_eq!(enc.heading_bin(350.0), HeadingBin::Left);
    }

    #[test]
    fn lateral_and_future_boundaries() {
        let enc = StateEncoder::default();
        assert_eq!(enc.lateral_bin(9.99), LateralBin::Center);
        assert_eq!(enc.lateral_bin(10.0), LateralBin::Off);
        assert_eq!(enc.lateral_bin(30.0), LateralBin::Far);

        assert_eq!(enc.future_bin(-10.5), FutureBin::Left);
        assert_eq!(enc.future_bin(-10.0), FutureBin::Straight);
        assert_eq!(enc.future_bin(10.0), FutureBin::Straight);
        assert_eq!(enc.future_bin(10.5), FutureBin::Right);
    }

    #[test]
    fn free_function_matches_bins() {
        let state = discretize_state(0.5, -20.0, 0.0, 45.0);
        assert_eq!(state.as_tuple(), (1, 1, 0, 2));
    }

    #[test]
    fn observe_on_straight_track() {
        let config = TrackConfig {
            road_width: 100.0,
            samples_per_segment: 1,
            ..TrackConfig::DEFAULT
        };
        let waypoints: Vec<Vec2> = (0..=20).map(|i| Vec2::new(i as f32 * 10.0, 0.0)).collect();
        let track = Track::new(&waypoints, &config).unwrap();
        let enc = StateEncoder::default();

        let car = CarState {
            pos: Vec2::new(52.0, 15.0),
            heading: 30.0,
            speed: 3.0,
            collided: false,
        };
        let (state, obs) = enc.encode(&car, &track);

        assert!((obs.heading_error + 30.0).abs() < 1e-4);
        assert!((obs.future_heading_error + 30.0).abs() < 1e-4);
        assert!((obs.lateral_offset - 15.0).abs() < 1e-4);
        assert!((obs.progress - 52.0).abs() < 1e-3);
        assert!((obs.distance_to_goal - 148.0).abs() < 1e-3);

        assert_eq!(state.speed, SpeedBin::Fast);
        assert_eq!(state.heading, HeadingBin::HardLeft);
        assert_eq!(state.lateral, LateralBin::Off);
        assert_eq!(state.future, FutureBin::Left);
    }

    #[test]
    fn lookahead_at_goal_is_straight() {
        let config = TrackConfig {
            samples_per_segment: 1,
            ..TrackConfig::DEFAULT
        };
        let track = Track::new(&[Vec2::ZERO, Vec2::new(100.0, 0.0)], &config).unwrap();

        let car = CarState::at(Vec2::new(100.0, 0.0), 70.0);
        let obs = StateEncoder::default().observe(&car, &track);
        assert_eq!(obs.future_heading_error, 0.0);
        assert!(obs.distance_to_goal.abs() < 1e-4);
    }
}
