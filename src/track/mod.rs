mod aabb;
mod geometry;
#[allow(clippy::module_inception)]
mod track;
mod track_config;

pub use aabb::*;
pub use geometry::*;
pub use track::*;
pub use track_config::*;
