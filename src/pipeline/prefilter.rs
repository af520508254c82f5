use std::collections::{HashMap, HashSet};

use regex::{Regex, RegexBuilder};

use crate::config::FilterConfig;
use crate::errors::ConfigError;
use crate::models::{ContractRecord, PrefilterDrop};
use crate::text::normalize::normalize_str;

/// UNSPSC family (`72xx`) found in a category code such as `V1.72141500`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnspscMatch {
    pub code: String,
    /// `None` when the family code is not in the configured table.
    pub name: Option<String>,
}

/// Record selection applied before classification: contract status
/// allow-list, sector exclusions and UNSPSC family lookup.
#[derive(Debug, Clone)]
pub struct Prefilter {
    statuses: HashSet<String>,
    excluded_sectors: HashSet<String>,
    families: HashMap<String, String>,
    require_family: bool,
    family_pattern: Regex,
}

impl Prefilter {
    pub fn new(config: &FilterConfig) -> Result<Self, ConfigError> {
        let family_pattern = RegexBuilder::new(r"v1\.(72\d{2})")
            .case_insensitive(true)
            .build()
            .map_err(|e| ConfigError::Pattern(e.to_string()))?;

        Ok(Self {
            statuses: config.statuses.iter().map(|s| normalize_str(s)).collect(),
            excluded_sectors: config
                .excluded_sectors
                .iter()
                .map(|s| normalize_str(s))
                .collect(),
            families: config
                .unspsc_families
                .iter()
                .map(|f| (f.code.clone(), f.name.clone()))
                .collect(),
            require_family: config.require_unspsc_family,
            family_pattern,
        })
    }

    /// Extract the UNSPSC family from a category code.
    pub fn unspsc_family(&self, code: Option<&str>) -> Option<UnspscMatch> {
        let captures = self.family_pattern.captures(code?)?;
        let family = captures.get(1)?.as_str().to_string();
        let name = self.families.get(&family).cloned();
        Some(UnspscMatch { code: family, name })
    }

    /// Decide whether `record` enters classification.
    pub fn check(&self, record: &ContractRecord) -> Result<(), PrefilterDrop> {
        let status = record.estado_contrato.as_deref().map(normalize_str);
        if !status.is_some_and(|s| self.statuses.contains(&s)) {
            return Err(PrefilterDrop::Status);
        }

        if let Some(sector) = record.sector.as_deref() {
            if self.excluded_sectors.contains(&normalize_str(sector)) {
                return Err(PrefilterDrop::Sector);
            }
        }

        if self.require_family {
            let known = self
                .unspsc_family(record.codigo_categoria.as_deref())
                .is_some_and(|f| f.name.is_some());
            if !known {
                return Err(PrefilterDrop::UnspscFamily);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str, sector: &str, code: &str) -> ContractRecord {
        ContractRecord {
            estado_contrato: Some(status.to_string()),
            sector: Some(sector.to_string()),
            codigo_categoria: Some(code.to_string()),
            ..ContractRecord::default()
        }
    }

    fn prefilter() -> Prefilter {
        Prefilter::new(&FilterConfig::default()).unwrap()
    }

    #[test]
    fn test_status_allow_list() {
        let pf = prefilter();
        assert_eq!(pf.check(&record(" En Ejecución ", "Transporte", "V1.72141500")), Ok(()));
        assert_eq!(pf.check(&record("en ejecucion", "Transporte", "")), Ok(()));
        assert_eq!(
            pf.check(&record("Borrador", "Transporte", "")),
            Err(PrefilterDrop::Status)
        );
        assert_eq!(
            pf.check(&ContractRecord::default()),
            Err(PrefilterDrop::Status)
        );
    }

    #[test]
    fn test_excluded_sector() {
        let pf = prefilter();
        assert_eq!(
            pf.check(&record("terminado", "Minas y Energía", "")),
            Err(PrefilterDrop::Sector)
        );
        assert_eq!(
            pf.check(&record("terminado", "defensa", "")),
            Err(PrefilterDrop::Sector)
        );
    }

    #[test]
    fn test_unspsc_family() {
        let pf = prefilter();
        assert_eq!(
            pf.unspsc_family(Some("V1.72141500")),
            Some(UnspscMatch {
                code: "7214".to_string(),
                name: Some("Infraestructura pesada".to_string()),
            })
        );
        assert_eq!(
            pf.unspsc_family(Some("v1.72991500")),
            Some(UnspscMatch {
                code: "7299".to_string(),
                name: None,
            })
        );
        assert_eq!(pf.unspsc_family(Some("V1.81101500")), None);
        assert_eq!(pf.unspsc_family(None), None);
    }

    #[test]
    fn test_require_family() {
        let config = FilterConfig {
            require_unspsc_family: true,
            ..FilterConfig::default()
        };
        let pf = Prefilter::new(&config).unwrap();
        assert_eq!(pf.check(&record("cerrado", "Transporte", "V1.72101500")), Ok(()));
        assert_eq!(
            pf.check(&record("cerrado", "Transporte", "V1.81101500")),
            Err(PrefilterDrop::UnspscFamily)
        );
    }
}
