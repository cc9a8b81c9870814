/// Configuration problems caught while building a track or a controller.
///
/// Nothing in the per-tick path returns these; once construction succeeds the
/// simulation only uses fallbacks for numeric edge cases.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("a track needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),
    #[error("road width must be positive, got {0}")]
    NonPositiveRoadWidth(f32),
    #[error("samples per segment must be at least 1")]
    ZeroSampleDensity,
    #[error("viewport {width}x{height} with margin {margin} leaves no area to fit the track into")]
    InvalidViewport { width: f32, height: f32, margin: f32 },
    #[error("invalid hyperparameter `{name}` = {value}")]
    InvalidHyperparameter { name: &'static str, value: f32 },
    #[error("`{name}` must be positive, got {value}")]
    NonPositiveThreshold { name: &'static str, value: f32 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
