use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::RecordStore;
use crate::models::{ClassifiedContract, ContractRecord};

/// JSON array-of-objects reader/writer.
pub struct JsonStore;

impl JsonStore {
    pub fn new() -> Self {
        Self
    }

    fn write<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), value)?;
        Ok(())
    }
}

impl RecordStore for JsonStore {
    fn read(&self, path: &Path) -> Result<Vec<ContractRecord>> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let records = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(records)
    }

    fn write_records(&self, path: &Path, records: &[ContractRecord]) -> Result<()> {
        Self::write(path, records)
    }

    fn write_classified(&self, path: &Path, contracts: &[ClassifiedContract]) -> Result<()> {
        Self::write(path, contracts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Classification;

    #[test]
    fn test_classified_contract_is_flat_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let contract = ClassifiedContract {
            record: ContractRecord {
                id_contrato: Some("X".to_string()),
                ..ContractRecord::default()
            },
            classification: Classification {
                objetos: vec!["Mantenimiento".to_string()],
                objeto_contractual: "Mantenimiento".to_string(),
                subcategoria: "Vias".to_string(),
                macrocategoria: "Transporte".to_string(),
                ..Classification::default()
            },
        };

        JsonStore::new().write_classified(&path, &[contract.clone()]).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(value[0]["id_contrato"], "X");
        assert_eq!(value[0]["macrocategoria"], "Transporte");
        assert_eq!(value[0]["objetos"][0], "Mantenimiento");

        let parsed: Vec<ClassifiedContract> = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, vec![contract]);
    }

    #[test]
    fn test_read_accepts_raw_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.json");
        std::fs::write(
            &path,
            r#"[{"descripcion_del_proceso": "Obra civil", "valor_del_contrato": 12}]"#,
        )
        .unwrap();

        let records = JsonStore::new().read(&path).unwrap();
        assert_eq!(records[0].descripcion.as_deref(), Some("Obra civil"));
        assert_eq!(records[0].valor_del_contrato, Some(12.0));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(JsonStore::new()
            .read(Path::new("/nonexistent/contratos.json"))
            .is_err());
    }
}
