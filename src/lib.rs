pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;

pub use catalog::ReferenceData;
pub use error::{PortionError, Result};
pub use models::{CalculationResult, CheckResult, GuestMix};
pub use planner::{calculate, check};
