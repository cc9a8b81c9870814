mod action;
mod agent;
mod agent_config;
mod car;
mod car_config;
mod car_controls;
mod episode;
mod lap_stats;
mod q_table;
mod reward;
mod sim_config;
mod state_encoder;

pub use action::*;
pub use agent::*;
pub use agent_config::*;
pub use car::*;
pub use car_config::*;
pub use car_controls::*;
pub use episode::*;
pub use lap_stats::*;
pub use q_table::*;
pub use reward::*;
pub use sim_config::*;
pub use state_encoder::*;
