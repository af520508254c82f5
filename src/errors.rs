use thiserror::Error;

/// Configuration problems detected while building the classification pipeline.
///
/// All of these are fatal: they are reported before any record is processed.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("stop word '{0}' must be a single token")]
    MultiTokenStopWord(String),
    #[error("stop word '{word}' is not in normalized form (expected '{expected}')")]
    StopWordNotNormalized { word: String, expected: String },
    #[error("typo rule #{index} has an empty pattern")]
    EmptyTypoPattern { index: usize },
    #[error("typo rule #{index} has an empty replacement")]
    EmptyTypoReplacement { index: usize },
    #[error("typo rule #{index}: '{value}' is not in normalized form (expected '{expected}')")]
    TypoNotNormalized {
        index: usize,
        value: String,
        expected: String,
    },
    #[error("typo rule '{earlier}' -> '{replacement}' would re-trigger later rule '{later}'")]
    TypoRetrigger {
        earlier: String,
        replacement: String,
        later: String,
    },
    #[error("{dictionary} dictionary: category label must not be empty")]
    EmptyLabel { dictionary: &'static str },
    #[error("{dictionary} dictionary: '{label}' is reserved for unmatched text")]
    ReservedLabel {
        dictionary: &'static str,
        label: String,
    },
    #[error("{dictionary} dictionary: category '{label}' is declared more than once")]
    DuplicateLabel {
        dictionary: &'static str,
        label: String,
    },
    #[error("{dictionary} dictionary: category '{label}' has no keywords")]
    NoKeywords {
        dictionary: &'static str,
        label: String,
    },
    #[error("{dictionary} dictionary: keyword '{keyword}' in '{label}' is not in normalized form (expected '{expected}')")]
    KeywordNotNormalized {
        dictionary: &'static str,
        label: String,
        keyword: String,
        expected: String,
    },
    #[error("sub-category '{0}' is not assigned to any macro-category")]
    UnmappedSubcategory(String),
    #[error("sub-category '{sub}' is assigned to both '{first}' and '{second}'")]
    AmbiguousSubcategory {
        sub: String,
        first: String,
        second: String,
    },
    #[error("invalid pattern: {0}")]
    Pattern(String),
}
