use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{CalculateRequest, CheckRequest};

use super::reference::{ReferenceData, ReferenceSnapshot};

/// Load and validate reference data from a JSON file.
pub fn load_reference<P: AsRef<Path>>(path: P) -> Result<ReferenceData> {
    let content = fs::read_to_string(path)?;
    let snapshot: ReferenceSnapshot = serde_json::from_str(&content)?;
    ReferenceData::new(snapshot)
}

/// Save reference data to a JSON file.
pub fn save_reference<P: AsRef<Path>>(path: P, data: &ReferenceData) -> Result<()> {
    let json = serde_json::to_string_pretty(&data.to_snapshot())?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a `calculate` request body from a JSON file.
pub fn load_calculate_request<P: AsRef<Path>>(path: P) -> Result<CalculateRequest> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a `check` request body from a JSON file.
pub fn load_check_request<P: AsRef<Path>>(path: P) -> Result<CheckRequest> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
