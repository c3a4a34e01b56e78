mod persistence;
mod reference;
mod standard;

pub use persistence::{load_calculate_request, load_check_request, load_reference, save_reference};
pub use reference::{ReferenceData, ReferenceSnapshot};
pub use standard::standard_snapshot;
