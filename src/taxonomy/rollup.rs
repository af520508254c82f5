use std::collections::HashMap;

use tracing::warn;

use crate::config::MacroGroup;
use crate::errors::ConfigError;
use crate::models::FALLBACK_CATEGORY;

/// Sub-category → macro-category lookup, inverted once from the partition.
#[derive(Debug, Clone)]
pub struct TaxonomyRollup {
    lookup: HashMap<String, String>,
}

impl TaxonomyRollup {
    /// Invert `groups` and check that every label in `subcategories`, plus the
    /// fallback label, belongs to exactly one macro group.
    pub fn new<'a, I>(groups: &[MacroGroup], subcategories: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut lookup: HashMap<String, String> = HashMap::new();
        for group in groups {
            for sub in &group.subcategories {
                if let Some(first) = lookup.get(sub) {
                    return Err(ConfigError::AmbiguousSubcategory {
                        sub: sub.clone(),
                        first: first.clone(),
                        second: group.label.clone(),
                    });
                }
                lookup.insert(sub.clone(), group.label.clone());
            }
        }

        let mut produced: Vec<&str> = subcategories.into_iter().collect();
        produced.push(FALLBACK_CATEGORY);
        for sub in &produced {
            if !lookup.contains_key(*sub) {
                return Err(ConfigError::UnmappedSubcategory(sub.to_string()));
            }
        }

        for sub in lookup.keys() {
            if !produced.contains(&sub.as_str()) {
                warn!(subcategory = %sub, "macro partition lists a sub-category no dictionary produces");
            }
        }

        Ok(Self { lookup })
    }

    /// Macro-category of `sub`. Validation makes this total over every label
    /// the sub-category classifier can produce; anything else maps to the
    /// fallback.
    pub fn rollup(&self, sub: &str) -> &str {
        self.lookup
            .get(sub)
            .map(String::as_str)
            .unwrap_or(FALLBACK_CATEGORY)
    }
}
