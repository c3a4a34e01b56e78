pub mod export;
pub mod prompts;
pub mod render;

pub use export::{export_csv, write_portions_csv};
pub use prompts::{collect_request, prompt_dishes, prompt_guests, prompt_yes_no};
pub use render::{display_calculation, display_catalog, display_check};
