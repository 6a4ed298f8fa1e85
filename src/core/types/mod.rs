//! Core data types shared across the crate.

mod configuration;
mod timestamped;
mod trajectory;

pub use configuration::JointConfiguration;
pub use timestamped::Timestamped;
pub use trajectory::{MalformedTrajectory, Trajectory};
