use crate::config::TypoRule;
use crate::errors::ConfigError;
use crate::text::normalize::normalize_str;

/// Ordered table of literal misspelling → canonical substitutions.
///
/// Each rule is applied once, in table order, as a plain substring
/// replacement, so a misspelling inside a longer token is corrected too.
#[derive(Debug, Clone)]
pub struct TypoCorrector {
    rules: Vec<TypoRule>,
}

impl TypoCorrector {
    /// Build a corrector, rejecting tables where an earlier replacement would
    /// feed a later pattern.
    ///
    /// Both sides of every rule must be non-empty and already normalized,
    /// since correction runs on normalized text.
    pub fn new(rules: &[TypoRule]) -> Result<Self, ConfigError> {
        for (index, rule) in rules.iter().enumerate() {
            if rule.from.is_empty() {
                return Err(ConfigError::EmptyTypoPattern { index });
            }
            if rule.to.is_empty() {
                return Err(ConfigError::EmptyTypoReplacement { index });
            }
            for value in [&rule.from, &rule.to] {
                let expected = normalize_str(value);
                if &expected != value {
                    return Err(ConfigError::TypoNotNormalized {
                        index,
                        value: value.clone(),
                        expected,
                    });
                }
            }
        }

        for (index, rule) in rules.iter().enumerate() {
            if let Some(later) = rules[index + 1..].iter().find(|l| feeds(&rule.to, &l.from)) {
                return Err(ConfigError::TypoRetrigger {
                    earlier: rule.from.clone(),
                    replacement: rule.to.clone(),
                    later: later.from.clone(),
                });
            }
        }
        Ok(Self {
            rules: rules.to_vec(),
        })
    }

    pub fn correct(&self, text: &str) -> String {
        let mut corrected = text.to_string();
        for rule in &self.rules {
            if corrected.contains(&rule.from) {
                corrected = corrected.replace(&rule.from, &rule.to);
            }
        }
        corrected
    }
}

/// Whether inserting `replacement` can create an occurrence of `pattern`:
/// inside it, or straddling either of its edges.
fn feeds(replacement: &str, pattern: &str) -> bool {
    if replacement.contains(pattern) {
        return true;
    }
    pattern.char_indices().skip(1).any(|(split, _)| {
        let (head, tail) = pattern.split_at(split);
        replacement.ends_with(head) || replacement.starts_with(tail)
    })
}
