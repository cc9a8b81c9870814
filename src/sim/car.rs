use glam::Vec2;

use super::{CarConfig, CarControls, SteerIntent, ThrottleIntent};
use crate::{math::dir_from_heading, track::Track};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarState {
    pub pos: Vec2,
    /// Degrees, measured from +X towards +Y
    ///
    /// NOTE: Never wrapped, it accumulates every turn the car makes
    pub heading: f32,
    /// Signed speed along the heading, negative when reversing
    pub speed: f32,
    /// True if the last tick ended against the road edge and was rolled back
    pub collided: bool,
}

impl Default for CarState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CarState {
    pub const DEFAULT: Self = Self {
        pos: Vec2::ZERO,
        heading: 0.0,
        speed: 0.0,
        collided: false,
    };

    #[must_use]
    pub const fn at(pos: Vec2, heading: f32) -> Self {
        Self {
            pos,
            heading,
            ..Self::DEFAULT
        }
    }

    #[inline]
    pub fn forward(&self) -> Vec2 {
        dir_from_heading(self.heading)
    }

    /// World-space corners of a `hitbox_size` rectangle centered on the car,
    /// rotated by its heading
    ///
    /// Order: back-right, front-right, front-left, back-left (with +Y as left)
    #[must_use]
    pub fn corners(&self, hitbox_size: Vec2) -> [Vec2; 4] {
        let half = hitbox_size * 0.5;
        let rot = self.forward();

        [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|local| rot.rotate(local) + self.pos)
    }
}

/// A single car driven by discrete controls with fixed-step kinematics.
pub struct Car {
    config: CarConfig,
    state: CarState,
    /// Pose at the start of the current tick, restored on collision
    prev_pos: Vec2,
    prev_heading: f32,
}

impl Car {
    #[must_use]
    pub const fn new(config: CarConfig, pos: Vec2, heading: f32) -> Self {
        Self {
            config,
            state: CarState::at(pos, heading),
            prev_pos: pos,
            prev_heading: heading,
        }
    }

    #[inline]
    pub const fn config(&self) -> &CarConfig {
        &self.config
    }

    #[inline]
    pub const fn get_state(&self) -> CarState {
        self.state
    }

    pub fn set_state(&mut self, state: CarState) {
        self.state = state;
        self.prev_pos = state.pos;
        self.prev_heading = state.heading;
    }

    /// Puts the car back at `pos`, stopped and facing `heading`
    pub fn respawn(&mut self, pos: Vec2, heading: f32) {
        self.set_state(CarState::at(pos, heading));
    }

    #[inline]
    pub const fn pos(&self) -> Vec2 {
        self.state.pos
    }

    #[inline]
    pub const fn heading(&self) -> f32 {
        self.state.heading
    }

    #[inline]
    pub const fn speed(&self) -> f32 {
        self.state.speed
    }

    #[inline]
    pub const fn collided(&self) -> bool {
        self.state.collided
    }

    /// Pose the car had before the most recent tick
    #[inline]
    pub const fn prev_pose(&self) -> (Vec2, f32) {
        (self.prev_pos, self.prev_heading)
    }

    #[must_use]
    pub fn corners(&self) -> [Vec2; 4] {
        self.state.corners(self.config.hitbox_size)
    }

    fn apply_controls(&mut self, controls: CarControls) {
        let config = &self.config;
        let state = &mut self.state;

        match controls.steer {
            SteerIntent::Left => state.heading += config.turn_rate,
            SteerIntent::Right => state.heading -= config.turn_rate,
            SteerIntent::None => {}
        }

        match controls.throttle {
            ThrottleIntent::Accelerate => state.speed += config.acceleration,
            ThrottleIntent::Brake => state.speed -= config.acceleration,
            ThrottleIntent::None => state.speed *= config.friction,
        }

        state.speed = state.speed.clamp(config.min_speed(), config.max_speed);
    }

    /// Advances the car by one tick.
    ///
    /// If any corner of the hitbox ends up off the road the whole move is
    /// undone: position and heading go back to the start of the tick, and the
    /// speed reverses, scaled by the bounce factor.
    pub fn step(&mut self, controls: CarControls, track: &Track) {
        self.prev_pos = self.state.pos;
        self.prev_heading = self.state.heading;

        self.apply_controls(controls);
        self.state.pos += self.state.forward() * self.state.speed;

        let off_road = self.corners().into_iter().any(|corner| !track.contains(corner));
        if off_road {
            self.state.pos = self.prev_pos;
            self.state.heading = self.prev_heading;
            self.state.speed *= -self.config.bounce_factor;
        }

        self.state.collided = off_road;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::TrackConfig;

    const ACCEL: CarControls = CarControls::new(SteerIntent::None, ThrottleIntent::Accelerate);
    const BRAKE: CarControls = CarControls::new(SteerIntent::None, ThrottleIntent::Brake);

    fn wide_track() -> Track {
        let config = TrackConfig {
            road_width: 200.0,
            samples_per_segment: 4,
            ..TrackConfig::DEFAULT
        };
        Track::new(&[Vec2::new(0.0, 0.0), Vec2::new(2000.0, 0.0)], &config).unwrap()
    }

    #[test]
    fn corners_follow_heading() {
        let state = CarState::at(Vec2::new(10.0, 10.0), 90.0);
        let corners = state.corners(Vec2::new(50.0, 30.0));

        // Rotated a quarter turn: length now runs along Y
        let expected = [
            Vec2::new(25.0, -15.0),
            Vec2::new(25.0, 35.0),
            Vec2::new(-5.0, 35.0),
            Vec2::new(-5.0, -15.0),
        ];
        for (corner, expected) in corners.iter().zip(expected) {
            assert!((*corner - expected).length() < 1e-4, "{corner} != {expected}");
        }
    }

    #[test]
    fn throttle_and_clamp() {
        let track = wide_track();
        let mut car = Car::new(CarConfig::DEFAULT, Vec2::new(100.0, 0.0), 0.0);

        car.step(ACCEL, &track);
        assert!((car.speed() - 0.2).abs() < 1e-6);
        assert!((car.pos().x - 100.2).abs() < 1e-4);

        for _ in 0..100 {
            car.step(ACCEL, &track);
        }
        assert_eq!(car.speed(), CarConfig::DEFAULT.max_speed);

        for _ in 0..200 {
            car.step(BRAKE, &track);
        }
        assert_eq!(car.speed(), CarConfig::DEFAULT.min_speed());
        assert_eq!(car.speed(), -2.5);
        assert!(!car.collided());
    }

    #[test]
    fn coasting_applies_friction() {
        let track = wide_track();
        let mut car = Car::new(CarConfig::DEFAULT, Vec2::new(100.0, 0.0), 0.0);
        car.set_state(CarState {
            speed: 4.0,
            ..car.get_state()
        });

        car.step(CarControls::DEFAULT, &track);
        assert!((car.speed() - 3.8).abs() < 1e-6);
    }

    #[test]
    fn steering_is_unwrapped() {
        let track = wide_track();
        let mut car = Car::new(CarConfig::DEFAULT, Vec2::new(500.0, 0.0), 0.0);
        let left = CarControls::new(SteerIntent::Left, ThrottleIntent::None);
        let right = CarControls::new(SteerIntent::Right, ThrottleIntent::None);

        for _ in 0..80 {
            car.step(left, &track);
        }
        assert_eq!(car.heading(), 400.0);

        car.step(right, &track);
        assert_eq!(car.heading(), 395.0);
    }

    #[test]
    fn collision_rolls_back_pose() {
        let track = wide_track();

        // Nose 1 unit short of the left road edge at y = 100
        let start = Vec2::new(500.0, 74.0);
        let mut car = Car::new(CarConfig::DEFAULT, start, 90.0);
        car.set_state(CarState {
            speed: 3.0,
            ..car.get_state()
        });

        car.step(ACCEL, &track);

        assert!(car.collided());
        assert_eq!(car.pos(), start);
        assert_eq!(car.heading(), 90.0);
        assert!((car.speed() - (-0.2 * 3.2)).abs() < 1e-6);
        assert_eq!(car.prev_pose(), (start, 90.0));

        // Bounced away from the edge, the next tick is clear again
        car.step(CarControls::DEFAULT, &track);
        assert!(!car.collided());
        assert!(car.pos().y < start.y);
    }
}
