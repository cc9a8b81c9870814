use fastrand::Rng;
use glam::Vec2;
use log::{debug, info, trace};

use super::{
    Car, CarState, DiscreteState, LapStats, Observation, QLearningAgent, RewardModel, SimConfig,
    StateEncoder, Transition,
};
use crate::{error::ConfigResult, track::Track};

/// How a tick ended, as far as the lap is concerned
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LapEvent {
    #[default]
    None,
    /// The goal was reached; holds the lap time in ticks
    Completed { lap_ticks: u64 },
    /// The car strayed too far from the centerline and was respawned
    Drifted,
}

/// Everything a renderer or logger might want from one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInfo {
    /// Ticks simulated since the controller was built, including this one
    pub tick_count: u64,
    pub action: usize,
    /// Car at the end of the tick, before any respawn
    pub car: CarState,
    /// Discrete state reached by the tick
    pub state: DiscreteState,
    pub observation: Observation,
    pub reward: f32,
    pub event: LapEvent,
    /// Lap stats after the tick (and after any respawn)
    pub lap: LapStats,
    pub epsilon: f32,
}

/// Runs the learning loop one tick at a time.
///
/// Owns the track, the car, the agent and the random source. Respawns only
/// touch the car and the lap counters; the agent's table carries over.
pub struct EpisodeController {
    config: SimConfig,
    rng: Rng,
    track: Track,
    car: Car,
    encoder: StateEncoder,
    reward_model: RewardModel,
    agent: QLearningAgent,
    spawn_pos: Vec2,
    spawn_heading: f32,
    /// State and measurements of the car as it is now
    state: DiscreteState,
    observation: Observation,
    /// Centerline distance covered this lap, unwrapped across the seam of a closed track
    lap_progress: f32,
    /// Lap progress at which the goal is reached
    finish_at: f32,
    lap: LapStats,
    tick_count: u64,
}

impl EpisodeController {
    pub fn new(waypoints: &[Vec2], config: SimConfig) -> ConfigResult<Self> {
        config.validate()?;

        let track = Track::new(waypoints, &config.track)?;
        let agent = QLearningAgent::new(config.agent)?;
        // Half the hitbox diagonal keeps every corner on the road at either end of an open track
        let clearance = config.car.hitbox_size.length() * 0.5;
        let (spawn_pos, spawn_heading) = track.spawn_pose(clearance);
        let finish_at = if track.is_closed() {
            track.length()
        } else {
            (track.length() - clearance).max(0.0)
        };

        let rng = match config.rng_seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };

        info!(
            "Created episode controller: {} actions, spawn at ({:.1}, {:.1}) facing {:.1} deg",
            agent.num_actions(),
            spawn_pos.x,
            spawn_pos.y,
            spawn_heading
        );

        let car = Car::new(config.car, spawn_pos, spawn_heading);
        let encoder = StateEncoder::new(config.encoder);
        let (state, mut observation) = encoder.encode(&car.get_state(), &track);
        observation.distance_to_goal = finish_at - observation.progress;

        Ok(Self {
            config,
            rng,
            car,
            encoder,
            reward_model: RewardModel::new(config.reward),
            agent,
            spawn_pos,
            spawn_heading,
            state,
            observation,
            lap_progress: observation.progress,
            finish_at,
            lap: LapStats::new(),
            tick_count: 0,
            track,
        })
    }

    #[inline]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub const fn track(&self) -> &Track {
        &self.track
    }

    #[inline]
    pub const fn car(&self) -> &Car {
        &self.car
    }

    #[inline]
    pub const fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    #[inline]
    pub const fn lap_stats(&self) -> LapStats {
        self.lap
    }

    /// Discrete state of the car as it is now
    #[inline]
    pub const fn state(&self) -> DiscreteState {
        self.state
    }

    #[inline]
    pub const fn observation(&self) -> Observation {
        self.observation
    }

    #[inline]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[inline]
    pub const fn spawn_pose(&self) -> (Vec2, f32) {
        (self.spawn_pos, self.spawn_heading)
    }

    /// Lets the agent pick an action and simulates one tick with it
    pub fn tick(&mut self) -> TickInfo {
        let action = self.agent.select_action(&self.state, &mut self.rng);
        self.tick_with_action(action)
    }

    /// Simulates one tick with an externally chosen action; the agent still learns from it
    ///
    /// # Panics
    ///
    /// If `action` is not below the agent's action count
    pub fn tick_with_action(&mut self, action: usize) -> TickInfo {
        let action_set = self.agent.action_set();
        let Some(controls) = action_set.controls(action) else {
            panic!(
                "action {action} is out of range for {action_set:?} ({} actions)",
                action_set.num_actions()
            );
        };

        let state = self.state;
        let prev_distance_to_goal = self.observation.distance_to_goal;

        self.car.step(controls, &self.track);
        let car = self.car.get_state();
        let observation = self.observe(&car);
        let next_state = self.encoder.discretize(&observation);

        let reward = self.reward_model.reward(&Transition {
            prev_distance_to_goal,
            distance_to_goal: observation.distance_to_goal,
            speed: car.speed,
            heading_error: observation.heading_error,
            lateral_offset: observation.lateral_offset,
            collided: car.collided,
        });

        self.agent.update(state, action, reward, &next_state);
        self.agent.decay_epsilon();

        self.tick_count += 1;
        self.lap.lap_ticks += 1;
        self.state = next_state;
        self.observation = observation;

        let event = if observation.distance_to_goal < self.config.finish_threshold {
            let lap_ticks = self.lap.lap_ticks;
            self.agent
                .add_bonus(state, action, self.config.reward.finish_bonus);
            self.lap.complete_lap();
            info!(
                "Lap {} finished in {lap_ticks} ticks (best {:?}), epsilon {:.3}, {} states seen",
                self.lap.laps_completed,
                self.lap.best_lap,
                self.agent.epsilon(),
                self.agent.table().len()
            );

            self.reset();
            LapEvent::Completed { lap_ticks }
        } else if observation.lateral_offset > self.config.drift_reset_distance {
            debug!(
                "Attempt {} drifted {:.1} units off the centerline after {} ticks",
                self.lap.attempts, observation.lateral_offset, self.lap.lap_ticks
            );

            self.reset();
            LapEvent::Drifted
        } else {
            LapEvent::None
        };

        trace!(
            "tick {}: action {action}, reward {reward:.3}, state {:?}",
            self.tick_count,
            next_state.as_tuple()
        );

        TickInfo {
            tick_count: self.tick_count,
            action,
            car,
            state: next_state,
            observation,
            reward,
            event,
            lap: self.lap,
            epsilon: self.agent.epsilon(),
        }
    }

    /// Runs `ticks` agent-driven ticks
    pub fn step(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Measures the car against the track, with the goal distance taken from
    /// this lap's progress
    fn observe(&mut self, car: &CarState) -> Observation {
        let mut observation = self.encoder.observe(car, &self.track);

        if self.track.is_closed() {
            // The seam makes raw progress jump by a whole lap, so only the wrapped change is kept
            let length = self.track.length();
            let mut delta = observation.progress - self.observation.progress;
            if delta > length * 0.5 {
                delta -= length;
            } else if delta < -length * 0.5 {
                delta += length;
            }
            self.lap_progress += delta;
        } else {
            self.lap_progress = observation.progress;
        }

        observation.distance_to_goal = self.finish_at - self.lap_progress;
        observation
    }

    /// Starts a new attempt: car back to the spawn pose, lap timer and progress cleared
    ///
    /// NOTE: The agent (and its table) is left untouched
    pub fn reset(&mut self) {
        self.lap.start_attempt();
        self.car.respawn(self.spawn_pos, self.spawn_heading);

        let (state, observation) = self.encoder.encode(&self.car.get_state(), &self.track);
        self.state = state;
        self.lap_progress = observation.progress;
        self.observation = Observation {
            distance_to_goal: self.finish_at - self.lap_progress,
            ..observation
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ConfigError,
        sim::{ActionSet, AgentConfig},
        track::{TrackConfig, Viewport},
    };

    const ACCELERATE: usize = 1;
    const BRAKE: usize = 2;
    const LEFT_ACCELERATE: usize = 5;

    fn straight_waypoints() -> Vec<Vec2> {
        vec![Vec2::ZERO, Vec2::new(300.0, 0.0), Vec2::new(600.0, 0.0)]
    }

    fn config() -> SimConfig {
        SimConfig {
            rng_seed: Some(7),
            ..SimConfig::DEFAULT
        }
    }

    #[test]
    fn open_track_spawns_clear_of_the_start() {
        let controller = EpisodeController::new(&straight_waypoints(), config()).unwrap();
        let (pos, heading) = controller.spawn_pose();

        assert!((pos.x - Vec2::new(50.0, 30.0).length() * 0.5).abs() < 1e-3);
        assert_eq!(pos.y, 0.0);
        assert_eq!(heading, 0.0);
        assert!(controller.car().corners().iter().all(|&c| controller.track().contains(c)));

        let lap = controller.lap_stats();
        assert_eq!((lap.attempts, lap.lap_ticks, lap.laps_completed), (1, 0, 0));
    }

    #[test]
    fn accelerating_makes_progress() {
        let mut controller = EpisodeController::new(&straight_waypoints(), config()).unwrap();
        let start = controller.observation().distance_to_goal;

        let mut info = controller.tick_with_action(ACCELERATE);
        for _ in 0..9 {
            info = controller.tick_with_action(ACCELERATE);
        }

        assert_eq!(info.tick_count, 10);
        assert_eq!(info.lap.lap_ticks, 10);
        assert_eq!(info.event, LapEvent::None);
        assert!(!info.car.collided);
        assert!((start - info.observation.distance_to_goal - 11.0).abs() < 1e-3);
        assert!(info.reward > 0.0);
    }

    #[test]
    fn drifting_respawns_and_keeps_the_table() {
        let mut controller = EpisodeController::new(
            &straight_waypoints(),
            SimConfig {
                drift_reset_distance: 1.0,
                ..config()
            },
        )
        .unwrap();

        let info = (0..20)
            .map(|_| controller.tick_with_action(LEFT_ACCELERATE))
            .find(|info| info.event != LapEvent::None)
            .unwrap();

        assert_eq!(info.event, LapEvent::Drifted);
        assert!(info.observation.lateral_offset > 1.0);
        assert_ne!(info.car.pos, controller.spawn_pose().0);

        let (spawn_pos, spawn_heading) = controller.spawn_pose();
        assert_eq!(controller.car().get_state(), CarState::at(spawn_pos, spawn_heading));
        assert_eq!(info.lap.attempts, 2);
        assert_eq!(info.lap.lap_ticks, 0);
        assert_eq!(info.lap.laps_completed, 0);
        assert_eq!(info.lap.best_lap, None);
        assert!(!controller.agent().table().is_empty());
    }

    #[test]
    fn reversing_over_the_seam_is_not_a_lap() {
        let waypoints = [
            Vec2::new(0.0, 0.0),
            Vec2::new(400.0, 0.0),
            Vec2::new(400.0, 400.0),
            Vec2::new(0.0, 400.0),
        ];
        let mut controller = EpisodeController::new(
            &waypoints,
            SimConfig {
                track: TrackConfig {
                    closed: true,
                    ..TrackConfig::DEFAULT
                },
                ..config()
            },
        )
        .unwrap();
        assert_eq!(controller.spawn_pose(), (Vec2::ZERO, 0.0));
        assert!((controller.observation().distance_to_goal - 1600.0).abs() < 1e-2);

        for _ in 0..30 {
            let info = controller.tick_with_action(BRAKE);
            assert_eq!(info.event, LapEvent::None);
            assert!(info.observation.distance_to_goal > 1500.0);
        }
    }

    #[test]
    fn manual_reset_starts_new_attempt() {
        let mut controller = EpisodeController::new(&straight_waypoints(), config()).unwrap();
        controller.step(25);
        assert_eq!(controller.tick_count(), 25);

        controller.reset();

        let (spawn_pos, _) = controller.spawn_pose();
        assert_eq!(controller.car().pos(), spawn_pos);
        assert_eq!(controller.lap_stats().lap_ticks, 0);
        assert!(controller.lap_stats().attempts >= 2);
        assert_eq!(controller.tick_count(), 25);
    }

    #[test]
    fn rejects_bad_config() {
        let bad = SimConfig {
            finish_threshold: 0.0,
            ..config()
        };
        assert!(EpisodeController::new(&straight_waypoints(), bad).is_err());
        assert!(EpisodeController::new(&[Vec2::ZERO], config()).is_err());

        // Nothing left of a 100x100 viewport once the margins are taken
        let collapsed = SimConfig {
            track: TrackConfig {
                viewport: Some(Viewport {
                    width: 100.0,
                    height: 100.0,
                    margin: 50.0,
                }),
                ..TrackConfig::DEFAULT
            },
            ..config()
        };
        assert!(matches!(
            EpisodeController::new(&[Vec2::ZERO, Vec2::new(300.0, 0.0)], collapsed),
            Err(ConfigError::InvalidViewport { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn action_outside_set_panics() {
        let mut controller = EpisodeController::new(
            &straight_waypoints(),
            SimConfig {
                agent: AgentConfig {
                    action_set: ActionSet::Basic,
                    ..AgentConfig::DEFAULT
                },
                ..config()
            },
        )
        .unwrap();
        controller.tick_with_action(ActionSet::Basic.num_actions());
    }
}
