//! Tabular persistence of contract collections.
//!
//! - [`csv`] — one row per contract; list fields are joined with `"; "`.
//! - [`json`] — pretty-printed array of objects.
//!
//! [`store_for`] picks the format from the file extension.

use std::path::Path;

use anyhow::{bail, Result};

use crate::models::{ClassifiedContract, ContractRecord};

pub mod csv;
pub mod json;

pub trait RecordStore {
    fn read(&self, path: &Path) -> Result<Vec<ContractRecord>>;
    fn write_records(&self, path: &Path, records: &[ContractRecord]) -> Result<()>;
    fn write_classified(&self, path: &Path, contracts: &[ClassifiedContract]) -> Result<()>;
}

/// Select a store implementation from `path`'s extension.
pub fn store_for(path: &Path) -> Result<Box<dyn RecordStore>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("csv") => Ok(Box::new(csv::CsvStore::new())),
        Some("json") => Ok(Box::new(json::JsonStore::new())),
        _ => bail!(
            "unsupported file type for {} (expected .csv or .json)",
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_for_extension() {
        assert!(store_for(Path::new("out/contratos.CSV")).is_ok());
        assert!(store_for(Path::new("contratos.json")).is_ok());
        assert!(store_for(Path::new("contratos.xlsx")).is_err());
        assert!(store_for(Path::new("contratos")).is_err());
    }
}
