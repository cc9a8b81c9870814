pub use fastrand;
pub use glam;

pub mod consts;
pub mod error;
pub mod logging;
pub mod math;
pub mod sim;
pub mod track;

pub use error::{ConfigError, ConfigResult};
pub use sim::{EpisodeController, LapEvent, SimConfig, TickInfo};
pub use track::{Track, TrackConfig};
