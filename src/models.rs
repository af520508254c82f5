use serde::{Deserialize, Deserializer, Serialize};

/// Label reserved for text that matched no configured keyword.
///
/// Used both as the fallback object/sub-category and as the macro-category of
/// records that are dropped from the final output.
pub const FALLBACK_CATEGORY: &str = "Otros";

/// One SECOP II contract as read from the data source or a tabular file.
///
/// Raw Socrata column names are accepted as aliases so the same type reads
/// both downloaded pages and previously renamed files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    #[serde(default)]
    pub id_contrato: Option<String>,
    #[serde(default)]
    pub nombre_entidad: Option<String>,
    #[serde(default)]
    pub nit_entidad: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub estado_contrato: Option<String>,
    #[serde(default, alias = "modalidad_de_contratacion")]
    pub modalidad_contrato: Option<String>,
    #[serde(default, alias = "codigo_de_categoria_principal")]
    pub codigo_categoria: Option<String>,
    #[serde(default, alias = "descripcion_del_proceso")]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub fecha_de_firma: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub valor_del_contrato: Option<f64>,
    #[serde(default)]
    pub proveedor_adjudicado: Option<String>,
    #[serde(default)]
    pub urlproceso: Option<String>,
    #[serde(default)]
    pub anio: Option<i32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Amount {
    Number(f64),
    Text(String),
}

/// Socrata serves amounts as strings; anything unparseable becomes `None`.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Amount> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Amount::Number(n)) => Some(n),
        Some(Amount::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Outcome of matching one text against one category dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Every matched category, in dictionary order.
    pub all: Vec<String>,
    /// Category whose earliest match is leftmost in the text, or
    /// [`FALLBACK_CATEGORY`] when `all` is empty.
    pub principal: String,
}

impl ClassificationResult {
    pub fn unclassified() -> Self {
        Self {
            all: Vec::new(),
            principal: FALLBACK_CATEGORY.to_string(),
        }
    }
}

/// Fields derived by the pipeline for one contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Normalized, typo-corrected and prefix-stripped description.
    pub texto: Option<String>,
    pub objetos: Vec<String>,
    pub objeto_contractual: String,
    pub subcategorias: Vec<String>,
    pub subcategoria: String,
    pub macrocategoria: String,
    pub codigo_familia_unspsc: Option<String>,
    pub nombre_familia_unspsc: Option<String>,
}

/// A source record together with its derived classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedContract {
    #[serde(flatten)]
    pub record: ContractRecord,
    #[serde(flatten)]
    pub classification: Classification,
}

impl ClassifiedContract {
    pub fn is_retained(&self) -> bool {
        self.classification.macrocategoria != FALLBACK_CATEGORY
    }
}

/// Why a record was dropped before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrefilterDrop {
    Status,
    Sector,
    UnspscFamily,
}

impl std::fmt::Display for PrefilterDrop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefilterDrop::Status => write!(f, "status not allowed"),
            PrefilterDrop::Sector => write!(f, "excluded sector"),
            PrefilterDrop::UnspscFamily => write!(f, "unknown UNSPSC family"),
        }
    }
}

/// Counts of records removed by the prefilter, per reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrefilterStats {
    pub status: usize,
    pub sector: usize,
    pub unspsc_family: usize,
}

impl PrefilterStats {
    pub fn record(&mut self, reason: PrefilterDrop) {
        match reason {
            PrefilterDrop::Status => self.status += 1,
            PrefilterDrop::Sector => self.sector += 1,
            PrefilterDrop::UnspscFamily => self.unspsc_family += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.status + self.sector + self.unspsc_family
    }
}

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

/// Machine-readable summary of a run, used by `--report json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub input: usize,
    pub prefilter: PrefilterStats,
    pub classified: usize,
    pub retained: usize,
    pub discarded: usize,
    pub retained_percentage: f64,
    pub status: Vec<Frequency>,
    pub unspsc_family: Vec<Frequency>,
    pub contractual_object: Vec<Frequency>,
    pub macro_category: Vec<Frequency>,
}
