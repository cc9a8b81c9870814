//! Default tuning values for the simulation.
//!
//! Everything here is only a default: the config structs copy these values and
//! can be overridden per run.

/// Per-tick factor applied to speed when neither throttle nor brake is held
pub const FRICTION_FACTOR: f32 = 0.95;

/// Fraction of speed kept (and reversed) after bouncing off the road edge
pub const COLLISION_BOUNCE_FACTOR: f32 = 0.2;

/// Added to the edge height in the ray-casting crossing test
pub const POINT_IN_POLYGON_EPSILON: f32 = 1e-12;

pub mod car {
    /// Length of the car along its heading
    pub const LENGTH: f32 = 50.0;
    /// Width of the car across its heading
    pub const WIDTH: f32 = 30.0;

    pub mod drive {
        /// Forward top speed, in units per tick
        pub const MAX_SPEED: f32 = 5.0;
        /// Speed change per tick of throttle or brake
        pub const ACCELERATION: f32 = 0.2;
        /// Degrees of heading change per tick of steering
        pub const TURN_RATE: f32 = 5.0;
    }
}

pub mod track {
    pub const ROAD_WIDTH: f32 = 80.0;
    pub const SAMPLES_PER_SEGMENT: usize = 20;
}

pub mod encoder {
    pub const SPEED_STOPPED: f32 = 0.5;
    pub const SPEED_SLOW: f32 = 2.5;

    pub const HEADING_HARD: f32 = 20.0;
    pub const HEADING_SOFT: f32 = 5.0;

    pub const LATERAL_CENTER: f32 = 10.0;
    pub const LATERAL_OFF: f32 = 30.0;

    pub const FUTURE_HEADING: f32 = 10.0;
    /// How many centerline samples ahead the lookahead point sits
    pub const LOOKAHEAD_SAMPLES: usize = 10;
}

pub mod reward {
    pub const PROGRESS_WEIGHT: f32 = 1.0;
    pub const BACKWARD_PENALTY: f32 = 0.5;
    pub const MOVING_BONUS: f32 = 0.05;
    pub const STALL_PENALTY: f32 = 0.1;
    pub const HEADING_WEIGHT: f32 = 0.01;
    pub const LATERAL_WEIGHT: f32 = 0.5;
    pub const LATERAL_NORM: f32 = 30.0;
    pub const COLLISION_PENALTY: f32 = 10.0;
    pub const FINISH_BONUS: f32 = 100.0;
}

pub mod agent {
    pub const ALPHA: f32 = 0.1;
    pub const GAMMA: f32 = 0.95;
    pub const EPSILON: f32 = 1.0;
    pub const EPSILON_DECAY: f32 = 0.9995;
    pub const EPSILON_MIN: f32 = 0.05;
}

pub mod episode {
    /// Distance to goal under which a lap counts as finished
    pub const FINISH_THRESHOLD: f32 = 20.0;
    /// Lateral offset past which the car is considered lost and respawned
    pub const DRIFT_RESET_DISTANCE: f32 = 120.0;
}
