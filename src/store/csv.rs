use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::RecordStore;
use crate::models::{ClassifiedContract, ContractRecord};

const LIST_SEPARATOR: &str = "; ";

/// CSV reader/writer. Headers use the record field names; raw Socrata names
/// are accepted when reading.
pub struct CsvStore;

impl CsvStore {
    pub fn new() -> Self {
        Self
    }
}

/// Flat CSV shape of a classified contract.
#[derive(Serialize)]
struct ClassifiedRow<'a> {
    id_contrato: Option<&'a str>,
    nombre_entidad: Option<&'a str>,
    nit_entidad: Option<&'a str>,
    sector: Option<&'a str>,
    estado_contrato: Option<&'a str>,
    modalidad_contrato: Option<&'a str>,
    codigo_categoria: Option<&'a str>,
    descripcion: Option<&'a str>,
    fecha_de_firma: Option<&'a str>,
    valor_del_contrato: Option<f64>,
    proveedor_adjudicado: Option<&'a str>,
    urlproceso: Option<&'a str>,
    anio: Option<i32>,
    codigo_familia_unspsc: Option<&'a str>,
    nombre_familia_unspsc: Option<&'a str>,
    texto: Option<&'a str>,
    objetos: String,
    objeto_contractual: &'a str,
    subcategorias: String,
    subcategoria: &'a str,
    macrocategoria: &'a str,
}

impl<'a> From<&'a ClassifiedContract> for ClassifiedRow<'a> {
    fn from(contract: &'a ClassifiedContract) -> Self {
        let r = &contract.record;
        let c = &contract.classification;
        ClassifiedRow {
            id_contrato: r.id_contrato.as_deref(),
            nombre_entidad: r.nombre_entidad.as_deref(),
            nit_entidad: r.nit_entidad.as_deref(),
            sector: r.sector.as_deref(),
            estado_contrato: r.estado_contrato.as_deref(),
            modalidad_contrato: r.modalidad_contrato.as_deref(),
            codigo_categoria: r.codigo_categoria.as_deref(),
            descripcion: r.descripcion.as_deref(),
            fecha_de_firma: r.fecha_de_firma.as_deref(),
            valor_del_contrato: r.valor_del_contrato,
            proveedor_adjudicado: r.proveedor_adjudicado.as_deref(),
            urlproceso: r.urlproceso.as_deref(),
            anio: r.anio,
            codigo_familia_unspsc: c.codigo_familia_unspsc.as_deref(),
            nombre_familia_unspsc: c.nombre_familia_unspsc.as_deref(),
            texto: c.texto.as_deref(),
            objetos: c.objetos.join(LIST_SEPARATOR),
            objeto_contractual: &c.objeto_contractual,
            subcategorias: c.subcategorias.join(LIST_SEPARATOR),
            subcategoria: &c.subcategoria,
            macrocategoria: &c.macrocategoria,
        }
    }
}

impl RecordStore for CsvStore {
    fn read(&self, path: &Path) -> Result<Vec<ContractRecord>> {
        let mut reader = ::csv::ReaderBuilder::new()
            .flexible(true)
            .trim(::csv::Trim::Headers)
            .from_path(path)
            .with_context(|| format!("opening {}", path.display()))?;

        let mut records = Vec::new();
        for (line, row) in reader.deserialize::<ContractRecord>().enumerate() {
            // header is line 1
            let record = row.with_context(|| format!("{}: row {}", path.display(), line + 2))?;
            records.push(record);
        }
        Ok(records)
    }

    fn write_records(&self, path: &Path, records: &[ContractRecord]) -> Result<()> {
        let mut writer = ::csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_classified(&self, path: &Path, contracts: &[ClassifiedContract]) -> Result<()> {
        let mut writer = ::csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for contract in contracts {
            writer.serialize(ClassifiedRow::from(contract))?;
        }
        writer.flush()?;
        Ok(())
    }
}
