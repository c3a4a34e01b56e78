use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortionError {
    #[error("Unknown dish id: {0}")]
    UnknownDish(u32),

    #[error("Dish {0} appears more than once in the menu")]
    DuplicateDish(u32),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown menu template: {0}")]
    UnknownTemplate(String),

    #[error("Invalid reference data: {0}")]
    InvalidReference(String),

    #[error("Invalid guest mix: {0}")]
    InvalidGuestMix(String),

    #[error("Invalid constraint override '{name}': {value}")]
    InvalidOverride { name: &'static str, value: f64 },

    #[error("Portion supplied for dish {0}, which is not on the menu")]
    PortionNotInMenu(u32),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, PortionError>;
