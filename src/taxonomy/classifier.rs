use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use crate::config::CategoryRule;
use crate::errors::ConfigError;
use crate::models::{ClassificationResult, FALLBACK_CATEGORY};
use crate::text::normalize::normalize_str;

#[derive(Debug, Clone)]
struct CompiledCategory {
    label: String,
    /// `\b(?:kw1|kw2|...)\b`; the leftmost match is the category's earliest
    /// occurrence across all of its keywords.
    pattern: Regex,
}

/// Multi-category keyword matcher with leftmost-match priority.
///
/// Category order is significant: when two categories first match at the same
/// offset, the one declared earlier becomes the principal.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    categories: Vec<CompiledCategory>,
}

impl KeywordClassifier {
    /// Compile an ordered category dictionary.
    ///
    /// `dictionary` names the table in error messages ("object", "sub-category").
    pub fn new(dictionary: &'static str, rules: &[CategoryRule]) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut categories = Vec::with_capacity(rules.len());

        for rule in rules {
            let label = rule.label.trim();
            if label.is_empty() {
                return Err(ConfigError::EmptyLabel { dictionary });
            }
            if label == FALLBACK_CATEGORY {
                return Err(ConfigError::ReservedLabel {
                    dictionary,
                    label: label.to_string(),
                });
            }
            if !seen.insert(label) {
                return Err(ConfigError::DuplicateLabel {
                    dictionary,
                    label: label.to_string(),
                });
            }
            if rule.keywords.is_empty() {
                return Err(ConfigError::NoKeywords {
                    dictionary,
                    label: label.to_string(),
                });
            }

            let mut alternatives = Vec::with_capacity(rule.keywords.len());
            for keyword in &rule.keywords {
                let expected = normalize_str(keyword);
                if expected.is_empty() || &expected != keyword {
                    return Err(ConfigError::KeywordNotNormalized {
                        dictionary,
                        label: label.to_string(),
                        keyword: keyword.clone(),
                        expected,
                    });
                }
                alternatives.push(regex::escape(keyword));
            }

            let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
                .case_insensitive(true)
                .build()
                .map_err(|e| ConfigError::Pattern(e.to_string()))?;

            categories.push(CompiledCategory {
                label: label.to_string(),
                pattern,
            });
        }

        Ok(Self { categories })
    }

    /// Category labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.label.as_str())
    }

    /// Classify `text`; a missing text is unclassifiable, not an error.
    pub fn classify(&self, text: Option<&str>) -> ClassificationResult {
        let Some(text) = text else {
            return ClassificationResult::unclassified();
        };

        let mut all = Vec::new();
        let mut principal: Option<(usize, &str)> = None;

        for category in &self.categories {
            let Some(found) = category.pattern.find(text) else {
                continue;
            };
            all.push(category.label.clone());
            // strict comparison: earlier-declared category wins ties
            if principal.map_or(true, |(offset, _)| found.start() < offset) {
                principal = Some((found.start(), &category.label));
            }
        }

        match principal {
            Some((_, label)) => ClassificationResult {
                principal: label.to_string(),
                all,
            },
            None => ClassificationResult::unclassified(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn rule(label: &str, keywords: &[&str]) -> CategoryRule {
        CategoryRule {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn objects() -> KeywordClassifier {
        KeywordClassifier::new("object", &Config::default().objects).unwrap()
    }

    #[test]
    fn test_single_match() {
        let result = objects().classify(Some("mantenimiento rutinario de la via nacional"));
        assert_eq!(result.all, vec!["Mantenimiento"]);
        assert_eq!(result.principal, "Mantenimiento");
    }

    #[test]
    fn test_leftmost_match_wins() {
        let result = objects().classify(Some("adecuacion y mantenimiento de la sede"));
        assert_eq!(result.all, vec!["Adecuacion", "Mantenimiento"]);
        assert_eq!(result.principal, "Adecuacion");
    }

    #[test]
    fn test_offset_overrides_declaration_order() {
        let classifier = KeywordClassifier::new(
            "object",
            &[
                rule("Mantenimiento", &["mantenimiento"]),
                rule("Adecuacion", &["adecuacion"]),
            ],
        )
        .unwrap();
        let result = classifier.classify(Some("adecuacion y mantenimiento de la sede"));
        assert_eq!(result.all, vec!["Mantenimiento", "Adecuacion"]);
        assert_eq!(result.principal, "Adecuacion");
    }

    #[test]
    fn test_same_offset_tie_uses_declaration_order() {
        let first = KeywordClassifier::new(
            "sub-category",
            &[rule("Puente", &["puente"]), rule("Peatonal", &["puente peatonal"])],
        )
        .unwrap();
        assert_eq!(first.classify(Some("puente peatonal")).principal, "Puente");

        let second = KeywordClassifier::new(
            "sub-category",
            &[rule("Peatonal", &["puente peatonal"]), rule("Puente", &["puente"])],
        )
        .unwrap();
        assert_eq!(second.classify(Some("puente peatonal")).principal, "Peatonal");
    }

    #[test]
    fn test_earliest_keyword_within_category() {
        // "via" is declared after "carretera" but occurs first in the text
        let classifier = KeywordClassifier::new(
            "sub-category",
            &[
                rule("Vias", &["carretera", "via"]),
                rule("Puente", &["puente"]),
            ],
        )
        .unwrap();
        let result = classifier.classify(Some("via al puente sobre la carretera"));
        assert_eq!(result.principal, "Vias");
    }

    #[test]
    fn test_whole_word_only() {
        let classifier = KeywordClassifier::new("sub-category", &[rule("Rio", &["rio"])]).unwrap();
        assert_eq!(classifier.classify(Some("territorio")), ClassificationResult::unclassified());
        assert_eq!(classifier.classify(Some("rios")), ClassificationResult::unclassified());
        assert_eq!(classifier.classify(Some("el rio magdalena")).principal, "Rio");
    }

    #[test]
    fn test_phrase_keywords() {
        let classifier =
            KeywordClassifier::new("sub-category", &[rule("Vias", &["via nacional"])]).unwrap();
        assert_eq!(classifier.classify(Some("la via nacional")).principal, "Vias");
        assert_eq!(classifier.classify(Some("la via departamental nacional")), ClassificationResult::unclassified());
    }

    #[test]
    fn test_no_match_and_missing_text() {
        let classifier = objects();
        assert_eq!(
            classifier.classify(Some("interventoria tecnica")),
            ClassificationResult::unclassified()
        );
        assert_eq!(classifier.classify(None), ClassificationResult::unclassified());
    }

    #[test]
    fn test_principal_consistent_with_all() {
        let classifier = KeywordClassifier::new("sub-category", &Config::default().subcategories)
            .unwrap();
        for text in [
            "construccion del puente vehicular sobre el rio",
            "mejoramiento de vivienda rural",
            "estacion de policia",
            "",
            "suministro de papeleria",
        ] {
            let result = classifier.classify(Some(text));
            if result.all.is_empty() {
                assert_eq!(result.principal, FALLBACK_CATEGORY);
            } else {
                assert!(result.all.contains(&result.principal));
            }
        }
    }

    #[test]
    fn test_rejects_bad_dictionaries() {
        assert!(matches!(
            KeywordClassifier::new("object", &[rule("Otros", &["x"])]),
            Err(ConfigError::ReservedLabel { .. })
        ));
        assert!(matches!(
            KeywordClassifier::new("object", &[rule("A", &["x"]), rule("A", &["y"])]),
            Err(ConfigError::DuplicateLabel { .. })
        ));
        assert!(matches!(
            KeywordClassifier::new("object", &[rule("A", &[])]),
            Err(ConfigError::NoKeywords { .. })
        ));
        assert!(matches!(
            KeywordClassifier::new("object", &[rule("A", &["artillería"])]),
            Err(ConfigError::KeywordNotNormalized { .. })
        ));
    }
}
