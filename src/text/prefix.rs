use std::collections::HashSet;

use crate::errors::ConfigError;
use crate::text::normalize::normalize_str;

/// Vocabulary of non-informative leading tokens ("el", "realizar", "obra", ...).
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Every entry must be a single token already in normalized form.
    pub fn new<I, S>(words: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.split_whitespace().count() != 1 {
                return Err(ConfigError::MultiTokenStopWord(word.to_string()));
            }
            let expected = normalize_str(word);
            if expected != word {
                return Err(ConfigError::StopWordNotNormalized {
                    word: word.to_string(),
                    expected,
                });
            }
            set.insert(expected);
        }
        Ok(Self { words: set })
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token) || self.words.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

/// Remove leading stop tokens until the first informative one.
///
/// Returns a suffix of `text`; tokens after the first non-stop token are never
/// touched, and each iteration consumes exactly one token.
pub fn strip_prefix<'a>(text: &'a str, stopwords: &StopWords) -> &'a str {
    let mut rest = text.trim_start();
    loop {
        let (first, remainder) = match rest.split_once(char::is_whitespace) {
            Some((first, remainder)) => (first, remainder.trim_start()),
            None => (rest, ""),
        };
        if first.is_empty() || !stopwords.contains(first) {
            return rest;
        }
        rest = remainder;
    }
}
