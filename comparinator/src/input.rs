//! Reading the starting name lists
//!
//! The input is a CSV file with a `considering` column and a `current` column.
//! The columns may have different lengths; blank cells are skipped.

use crate::engine::InputLists;
use crate::error::{Error, Result};
use std::io::Read;
use std::path::Path;

const CONSIDERING_COLUMN: &str = "considering";
const CURRENT_COLUMN: &str = "current";

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(column))
        .ok_or_else(|| Error::InvalidInput(format!("missing '{}' column", column)))
}

/// Read both name lists from any CSV source
pub fn read_lists_from<R: Read>(reader: R) -> Result<InputLists> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let considering_idx = column_index(&headers, CONSIDERING_COLUMN)?;
    let current_idx = column_index(&headers, CURRENT_COLUMN)?;

    let mut considering = Vec::new();
    let mut current = Vec::new();

    for result in rdr.records() {
        let record = result?;
        if let Some(name) = record.get(considering_idx) {
            considering.push(name.to_string());
        }
        if let Some(name) = record.get(current_idx) {
            current.push(name.to_string());
        }
    }

    let lists = InputLists::new(considering, current);
    log::info!(
        "Read {} considering and {} current names",
        lists.considering.len(),
        lists.current.len()
    );
    Ok(lists)
}

/// Read both name lists from a CSV file
pub fn read_lists<P: AsRef<Path>>(path: P) -> Result<InputLists> {
    let path = path.as_ref();
    log::info!("Reading card lists from {}", path.display());
    let file = std::fs::File::open(path)?;
    read_lists_from(file)
}
