use super::{CarControls, SteerIntent, ThrottleIntent};

/// Largest action space any [`ActionSet`] uses; sizes the per-state value arrays
pub const MAX_ACTIONS: usize = 9;

const ACTIONS: [CarControls; MAX_ACTIONS] = [
    CarControls::new(SteerIntent::None, ThrottleIntent::None),
    CarControls::new(SteerIntent::None, ThrottleIntent::Accelerate),
    CarControls::new(SteerIntent::None, ThrottleIntent::Brake),
    CarControls::new(SteerIntent::Left, ThrottleIntent::None),
    CarControls::new(SteerIntent::Right, ThrottleIntent::None),
    CarControls::new(SteerIntent::Left, ThrottleIntent::Accelerate),
    CarControls::new(SteerIntent::Right, ThrottleIntent::Accelerate),
    CarControls::new(SteerIntent::Left, ThrottleIntent::Brake),
    CarControls::new(SteerIntent::Right, ThrottleIntent::Brake),
];

/// Which discrete actions the agent picks from.
///
/// Action codes are shared between the sets: the basic set is a prefix of the
/// full one, so code `3` always means "steer left".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActionSet {
    /// No-op, accelerate, brake, left, right
    Basic,
    /// The basic five plus accelerate/brake combined with left/right
    #[default]
    Full,
}

impl ActionSet {
    #[must_use]
    pub const fn num_actions(self) -> usize {
        match self {
            Self::Basic => 5,
            Self::Full => MAX_ACTIONS,
        }
    }

    /// Controls for an action code, or `None` if the code is not in this set
    #[must_use]
    pub const fn controls(self, action: usize) -> Option<CarControls> {
        if action < self.num_actions() {
            Some(ACTIONS[action])
        } else {
            None
        }
    }
}
