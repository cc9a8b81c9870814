use super::{AgentConfig, CarConfig, EncoderConfig, RewardConfig};
use crate::{
    consts::episode as episode_consts,
    error::{ConfigError, ConfigResult},
    track::TrackConfig,
};

/// Everything needed to build an [`EpisodeController`](super::EpisodeController) besides the waypoints
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    pub track: TrackConfig,
    pub car: CarConfig,
    pub encoder: EncoderConfig,
    pub reward: RewardConfig,
    pub agent: AgentConfig,
    /// A lap finishes when the remaining centerline distance drops below this
    pub finish_threshold: f32,
    /// The car is respawned when it gets further than this from the centerline
    pub drift_reset_distance: f32,
    /// Optional RNG seed for deterministic behavior
    /// If None, a random seed will be used
    pub rng_seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SimConfig {
    pub const DEFAULT: Self = Self {
        track: TrackConfig::DEFAULT,
        car: CarConfig::DEFAULT,
        encoder: EncoderConfig::DEFAULT,
        reward: RewardConfig::DEFAULT,
        agent: AgentConfig::DEFAULT,
        finish_threshold: episode_consts::FINISH_THRESHOLD,
        drift_reset_distance: episode_consts::DRIFT_RESET_DISTANCE,
        rng_seed: None,
    };

    pub fn validate(&self) -> ConfigResult<()> {
        self.track.validate()?;
        self.agent.validate()?;

        for (name, value) in [
            ("finish_threshold", self.finish_threshold),
            ("drift_reset_distance", self.drift_reset_distance),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositiveThreshold { name, value });
            }
        }

        Ok(())
    }
}
