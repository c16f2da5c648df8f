//! CLI command implementations

pub mod achievements;
pub mod challenge;
pub mod habits;
pub mod photo;
pub mod plan;
pub mod remind;
pub mod session;
pub mod setup;
pub mod squad;
