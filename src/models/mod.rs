pub mod category;
pub mod dish;
pub mod guests;
pub mod request;
pub mod result;

pub use category::{Category, Pool, Unit};
pub use dish::{Dish, MenuTemplate};
pub use guests::{BigEaters, GuestMix};
pub use request::{CalculateRequest, CheckRequest, GuestCounts, UserPortion};
pub use result::{
    CalculationResult, CheckResult, ComparisonRow, PortionResult, Severity, Totals, Violation,
    ViolationKind,
};
