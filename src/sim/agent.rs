use fastrand::Rng;
use log::trace;

use super::{ActionSet, AgentConfig, DiscreteState, QTable};
use crate::error::ConfigResult;

/// Tabular Q-learning with epsilon-greedy exploration.
///
/// The agent never owns a random source; callers pass one in so that a seeded
/// run replays exactly.
#[derive(Clone, Debug)]
pub struct QLearningAgent {
    config: AgentConfig,
    epsilon: f32,
    table: QTable,
}

impl QLearningAgent {
    pub fn new(config: AgentConfig) -> ConfigResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            epsilon: config.epsilon,
            table: QTable::new(config.action_set.num_actions()),
        })
    }

    #[inline]
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }

    #[inline]
    pub const fn action_set(&self) -> ActionSet {
        self.config.action_set
    }

    #[inline]
    pub const fn num_actions(&self) -> usize {
        self.table.num_actions()
    }

    /// Current exploration rate
    #[inline]
    pub const fn epsilon(&self) -> f32 {
        self.epsilon
    }

    #[inline]
    pub const fn table(&self) -> &QTable {
        &self.table
    }

    #[inline]
    pub fn table_mut(&mut self) -> &mut QTable {
        &mut self.table
    }

    /// Greedy action, lowest action code on ties
    #[must_use]
    pub fn best_action(&self, state: &DiscreteState) -> usize {
        self.table.best_action(state)
    }

    /// Epsilon-greedy: a uniformly random action with probability epsilon,
    /// otherwise [`Self::best_action`]
    pub fn select_action(&self, state: &DiscreteState, rng: &mut Rng) -> usize {
        if rng.f32() < self.epsilon {
            rng.usize(0..self.num_actions())
        } else {
            self.best_action(state)
        }
    }

    /// One-step Bellman update of `Q[state][action]` towards
    /// `reward + gamma * max(Q[next_state])`
    ///
    /// Returns the temporal-difference error.
    pub fn update(
        &mut self,
        state: DiscreteState,
        action: usize,
        reward: f32,
        next_state: &DiscreteState,
    ) -> f32 {
        let target = reward + self.config.gamma * self.table.max_value(next_state);
        let q = &mut self.table.values_mut(state)[action];
        let td_error = target - *q;
        *q += self.config.alpha * td_error;

        trace!("Q{:?}[{action}] -> {} (td {td_error})", state.as_tuple(), *q);
        td_error
    }

    /// Adds `bonus` straight onto `Q[state][action]`, outside the Bellman update
    pub fn add_bonus(&mut self, state: DiscreteState, action: usize, bonus: f32) {
        self.table.values_mut(state)[action] += bonus;
    }

    /// `epsilon = max(epsilon_min, epsilon * epsilon_decay)`
    pub fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ConfigError, sim::discretize_state};

    fn greedy_config() -> AgentConfig {
        AgentConfig {
            epsilon: 0.0,
            epsilon_min: 0.0,
            ..AgentConfig::DEFAULT
        }
    }

    #[test]
    fn converges_to_constant_reward() {
        let mut agent = QLearningAgent::new(AgentConfig {
            alpha: 0.2,
            gamma: 0.0,
            action_set: ActionSet::Basic,
            ..greedy_config()
        })
        .unwrap();
        let state = discretize_state(1.0, 0.0, 0.0, 0.0);

        for _ in 0..500 {
            agent.update(state, 0, 3.0, &state);
        }

        assert!((agent.table().get(&state, 0) - 3.0).abs() < 1e-4);
    }

    #[test]
    fn update_uses_next_state_max() {
        let mut agent = QLearningAgent::new(AgentConfig {
            alpha: 0.5,
            gamma: 0.9,
            ..greedy_config()
        })
        .unwrap();
        let s = discretize_state(1.0, 0.0, 0.0, 0.0);
        let next = discretize_state(3.0, 0.0, 0.0, 0.0);
        agent.table_mut().values_mut(next)[6] = 10.0;

        let td = agent.update(s, 2, 1.0, &next);

        assert!((td - 10.0).abs() < 1e-5);
        assert!((agent.table().get(&s, 2) - 5.0).abs() < 1e-5);
        // Only the updated cell changes
        assert_eq!(agent.table().get(&s, 1), 0.0);
    }

    #[test]
    fn greedy_selection_is_stable() {
        let mut agent = QLearningAgent::new(greedy_config()).unwrap();
        let state = discretize_state(1.0, 0.0, 0.0, 0.0);
        let mut rng = Rng::with_seed(7);

        assert_eq!(agent.select_action(&state, &mut rng), 0);

        agent.add_bonus(state, 3, 1.0);
        agent.add_bonus(state, 5, 1.0);
        for _ in 0..20 {
            assert_eq!(agent.select_action(&state, &mut rng), 3);
        }
    }

    #[test]
    fn exploration_covers_all_actions() {
        let agent = QLearningAgent::new(AgentConfig {
            epsilon: 1.0,
            ..AgentConfig::DEFAULT
        })
        .unwrap();
        let state = discretize_state(1.0, 0.0, 0.0, 0.0);
        let mut rng = Rng::with_seed(1234);

        let mut seen = [false; 9];
        for _ in 0..1000 {
            seen[agent.select_action(&state, &mut rng)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn same_seed_same_choices() {
        let agent = QLearningAgent::new(AgentConfig {
            epsilon: 0.5,
            ..AgentConfig::DEFAULT
        })
        .unwrap();
        let state = discretize_state(1.0, 0.0, 0.0, 0.0);

        let run = |seed| {
            let mut rng = Rng::with_seed(seed);
            (0..50)
                .map(|_| agent.select_action(&state, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn epsilon_decays_to_floor() {
        let mut agent = QLearningAgent::new(AgentConfig {
            epsilon: 1.0,
            epsilon_decay: 0.5,
            epsilon_min: 0.1,
            ..AgentConfig::DEFAULT
        })
        .unwrap();

        agent.decay_epsilon();
        assert_eq!(agent.epsilon(), 0.5);
        for _ in 0..10 {
            agent.decay_epsilon();
        }
        assert_eq!(agent.epsilon(), 0.1);
    }

    #[test]
    fn rejects_bad_hyperparameters() {
        let bad_alpha = AgentConfig {
            alpha: 0.0,
            ..AgentConfig::DEFAULT
        };
        assert_eq!(
            QLearningAgent::new(bad_alpha).unwrap_err(),
            ConfigError::InvalidHyperparameter {
                name: "alpha",
                value: 0.0
            }
        );

        let bad_gamma = AgentConfig {
            gamma: 1.5,
            ..AgentConfig::DEFAULT
        };
        assert!(QLearningAgent::new(bad_gamma).is_err());
    }
}
