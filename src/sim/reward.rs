use crate::consts::reward as reward_consts;

/// Weights of the reward terms.
///
/// All penalties are given as positive magnitudes and subtracted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardConfig {
    /// Reward per unit of centerline distance gained towards the goal
    pub progress_weight: f32,
    /// Flat penalty for any tick that loses ground
    pub backward_penalty: f32,
    /// Bonus for moving forward at all
    pub moving_bonus: f32,
    /// Penalty for standing still or reversing
    pub stall_penalty: f32,
    /// Penalty per degree of heading error
    pub heading_weight: f32,
    /// Penalty at (or past) `lateral_norm` distance from the centerline
    pub lateral_weight: f32,
    pub lateral_norm: f32,
    pub collision_penalty: f32,
    /// Added straight into the action-value table when a lap is finished
    ///
    /// NOTE: Not part of [`RewardModel::reward`]
    pub finish_bonus: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl RewardConfig {
    pub const DEFAULT: Self = Self {
        progress_weight: reward_consts::PROGRESS_WEIGHT,
        backward_penalty: reward_consts::BACKWARD_PENALTY,
        moving_bonus: reward_consts::MOVING_BONUS,
        stall_penalty: reward_consts::STALL_PENALTY,
        heading_weight: reward_consts::HEADING_WEIGHT,
        lateral_weight: reward_consts::LATERAL_WEIGHT,
        lateral_norm: reward_consts::LATERAL_NORM,
        collision_penalty: reward_consts::COLLISION_PENALTY,
        finish_bonus: reward_consts::FINISH_BONUS,
    };
}

/// What happened during one tick, as far as the reward is concerned
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transition {
    pub prev_distance_to_goal: f32,
    pub distance_to_goal: f32,
    pub speed: f32,
    pub heading_error: f32,
    pub lateral_offset: f32,
    pub collided: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RewardModel {
    pub config: RewardConfig,
}

impl RewardModel {
    #[must_use]
    pub const fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    /// Shaped reward for a single tick
    #[must_use]
    pub fn reward(&self, t: &Transition) -> f32 {
        let c = &self.config;

        let progress = t.prev_distance_to_goal - t.distance_to_goal;
        let mut reward = c.progress_weight * progress.max(0.0);
        if progress < 0.0 {
            reward -= c.backward_penalty;
        }

        reward += if t.speed > 0.0 {
            c.moving_bonus
        } else {
            -c.stall_penalty
        };

        reward -= c.heading_weight * t.heading_error.abs();

        let lateral = if c.lateral_norm > 0.0 {
            (t.lateral_offset / c.lateral_norm).min(1.0)
        } else {
            1.0
        };
        reward -= c.lateral_weight * lateral;

        if t.collided {
            reward -= c.collision_penalty;
        }

        reward
    }
}
