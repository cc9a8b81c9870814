#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SteerIntent {
    #[default]
    None,
    /// Increases heading
    Left,
    /// Decreases heading
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThrottleIntent {
    /// Coast, letting friction slow the car
    #[default]
    None,
    Accelerate,
    Brake,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CarControls {
    pub steer: SteerIntent,
    pub throttle: ThrottleIntent,
}

impl Default for CarControls {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CarControls {
    pub const DEFAULT: Self = Self {
        steer: SteerIntent::None,
        throttle: ThrottleIntent::None,
    };

    #[must_use]
    pub const fn new(steer: SteerIntent, throttle: ThrottleIntent) -> Self {
        Self { steer, throttle }
    }
}
