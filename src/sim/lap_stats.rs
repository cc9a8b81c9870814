/// Lap timing across a training run, in ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LapStats {
    /// Ticks since the current attempt started
    pub lap_ticks: u64,
    /// Fastest finished lap so far
    pub best_lap: Option<u64>,
    /// Most recently finished lap
    pub last_lap: Option<u64>,
    /// Attempts started, counting the first one
    pub attempts: u64,
    pub laps_completed: u64,
}

impl LapStats {
    pub(crate) const fn new() -> Self {
        Self {
            lap_ticks: 0,
            best_lap: None,
            last_lap: None,
            attempts: 1,
            laps_completed: 0,
        }
    }

    /// Records the current lap as finished
    pub(crate) fn complete_lap(&mut self) {
        let time = self.lap_ticks;
        self.last_lap = Some(time);
        self.best_lap = Some(self.best_lap.map_or(time, |best| best.min(time)));
        self.laps_completed += 1;
    }

    /// Starts a new attempt, finished or not
    pub(crate) fn start_attempt(&mut self) {
        self.lap_ticks = 0;
        self.attempts += 1;
    }
}
