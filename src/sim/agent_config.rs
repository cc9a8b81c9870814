use super::ActionSet;
use crate::{
    consts::agent as agent_consts,
    error::{ConfigError, ConfigResult},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentConfig {
    /// Learning rate, in `(0, 1]`
    pub alpha: f32,
    /// Discount factor, in `[0, 1]`
    pub gamma: f32,
    /// Starting exploration rate, in `[0, 1]`
    pub epsilon: f32,
    /// Multiplier applied to epsilon after every tick, in `(0, 1]`
    pub epsilon_decay: f32,
    /// Epsilon never decays below this
    pub epsilon_min: f32,
    pub action_set: ActionSet,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl AgentConfig {
    pub const DEFAULT: Self = Self {
        alpha: agent_consts::ALPHA,
        gamma: agent_consts::GAMMA,
        epsilon: agent_consts::EPSILON,
        epsilon_decay: agent_consts::EPSILON_DECAY,
        epsilon_min: agent_consts::EPSILON_MIN,
        action_set: ActionSet::Full,
    };

    pub fn validate(&self) -> ConfigResult<()> {
        let checks = [
            ("alpha", self.alpha, self.alpha > 0.0 && self.alpha <= 1.0),
            ("gamma", self.gamma, (0.0..=1.0).contains(&self.gamma)),
            ("epsilon", self.epsilon, (0.0..=1.0).contains(&self.epsilon)),
            (
                "epsilon_decay",
                self.epsilon_decay,
                self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0,
            ),
            (
                "epsilon_min",
                self.epsilon_min,
                (0.0..=1.0).contains(&self.epsilon_min),
            ),
        ];

        match checks.into_iter().find(|&(_, _, ok)| !ok) {
            Some((name, value, _)) => Err(ConfigError::InvalidHyperparameter { name, value }),
            None => Ok(()),
        }
    }
}
