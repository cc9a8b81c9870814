use glam::Vec2;

use crate::consts::{self, car as car_consts, car::drive as drive_consts};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarConfig {
    /// Full size of the hitbox (NOT the half-size/extent)
    ///
    /// X runs along the heading, Y across it
    pub hitbox_size: Vec2,
    /// Forward top speed, in units per tick
    ///
    /// NOTE: Reverse speed is capped at half of this
    pub max_speed: f32,
    /// Speed change per tick while throttle or brake is held
    pub acceleration: f32,
    /// Heading change per tick while steering, in degrees
    pub turn_rate: f32,
    /// Speed multiplier per tick while coasting
    pub friction: f32,
    /// Fraction of speed kept, reversed, after hitting the road edge
    pub bounce_factor: f32,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CarConfig {
    pub const DEFAULT: Self = Self {
        hitbox_size: Vec2::new(car_consts::LENGTH, car_consts::WIDTH),
        max_speed: drive_consts::MAX_SPEED,
        acceleration: drive_consts::ACCELERATION,
        turn_rate: drive_consts::TURN_RATE,
        friction: consts::FRICTION_FACTOR,
        bounce_factor: consts::COLLISION_BOUNCE_FACTOR,
    };

    #[inline]
    pub const fn min_speed(&self) -> f32 {
        -self.max_speed / 2.0
    }
}
