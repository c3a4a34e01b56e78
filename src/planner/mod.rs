pub mod budget;
pub mod calculate;
pub mod ceilings;
pub mod check;
pub mod config;
pub mod constants;
pub mod menu;
pub mod scaling;
pub mod split;

pub use calculate::{calculate, calculate_request};
pub use check::{check, check_request};
pub use config::{ConstraintOverrides, EngineConfig, Limits};
pub use constants::*;
