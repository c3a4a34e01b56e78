use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::CalculationResult;

const HEADER: [&str; 10] = [
    "dish_id",
    "dish_name",
    "category",
    "pool",
    "unit",
    "grams_per_person",
    "grams_per_gent",
    "grams_per_lady",
    "total_grams",
    "total_cost",
];

/// Write portions as CSV to any writer.
pub fn write_portions_csv<W: Write>(result: &CalculationResult, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for p in &result.portions {
        wtr.write_record([
            p.dish_id.to_string(),
            p.dish_name.clone(),
            p.category.clone(),
            p.pool.as_str().to_string(),
            p.unit.suffix().to_string(),
            format!("{:.2}", p.grams_per_person),
            format!("{:.2}", p.grams_per_gent),
            format!("{:.2}", p.grams_per_lady),
            format!("{:.1}", p.total_grams),
            p.total_cost.map(|c| format!("{:.2}", c)).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write portions as CSV to a file.
pub fn export_csv(result: &CalculationResult, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_portions_csv(result, file)
}
