//! Core data models: the denormalized input row and the four derived tables.

mod fixture;
mod ids;
mod input;
mod player;
mod statistic;
mod team;

pub use fixture::*;
pub use ids::*;
pub use input::*;
pub use player::*;
pub use statistic::*;
pub use team::*;
